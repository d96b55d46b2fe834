//! Controllers for the authenticated guest's own profile

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use validator::Validate;

use crate::DbPool;
use crate::error::Error;
use crate::models::{Profile, ProfileId};
use crate::schemas::profile::{ProfileResponse, UpdateProfileRequest};

/// Get the profile of the authenticated guest
#[instrument(skip(pool))]
pub(crate) async fn get_current_profile(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile = Profile::get(*profile_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

/// Update the contact details of the authenticated guest
#[instrument(skip(pool))]
pub(crate) async fn update_current_profile(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
	Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let profile =
		Profile::update_contact(*profile_id, request.into(), &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}
