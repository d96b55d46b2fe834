//! Controllers for the restaurant profile

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::DbPool;
use crate::error::Error;
use crate::models::Restaurant;
use crate::schemas::restaurant::RestaurantResponse;

/// Get a restaurant profile
#[instrument(skip(pool))]
pub(crate) async fn get_restaurant(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let restaurant = Restaurant::get(id, &conn).await?;

	Ok((StatusCode::OK, Json(RestaurantResponse::from(restaurant))))
}
