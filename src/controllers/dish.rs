//! Controllers for the menu

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use validator::Validate;

use crate::DbPool;
use crate::error::Error;
use crate::models::{Dish, NewDish};
use crate::schemas::dish::{
	CreateDishRequest,
	DishResponse,
	UpdateDishRequest,
};

/// The public menu: available dishes ordered by category then name
#[instrument(skip(pool))]
pub(crate) async fn get_dishes(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let dishes = Dish::menu(&conn).await?;

	let response: Vec<DishResponse> =
		dishes.into_iter().map(DishResponse::from).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Get a single dish
#[instrument(skip(pool))]
pub(crate) async fn get_dish(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let dish = Dish::get(id, &conn).await?;

	Ok((StatusCode::OK, Json(DishResponse::from(dish))))
}

/// All dishes including unavailable ones, for menu management
#[instrument(skip(pool))]
pub(crate) async fn get_all_dishes(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let dishes = Dish::get_all(&conn).await?;

	let response: Vec<DishResponse> =
		dishes.into_iter().map(DishResponse::from).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Add a dish to the menu
#[instrument(skip(pool))]
pub(crate) async fn create_dish(
	State(pool): State<DbPool>,
	Json(request): Json<CreateDishRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let dish = NewDish::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(DishResponse::from(dish))))
}

/// Update a dish, including toggling its availability
#[instrument(skip(pool))]
pub(crate) async fn update_dish(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
	Json(request): Json<UpdateDishRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let dish = Dish::update(id, request.into(), &conn).await?;

	Ok((StatusCode::OK, Json(DishResponse::from(dish))))
}

/// Remove a dish from the menu
#[instrument(skip(pool))]
pub(crate) async fn delete_dish(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Dish::delete(id, &conn).await?;

	Ok(NoContent)
}
