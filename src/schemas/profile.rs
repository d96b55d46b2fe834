use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Profile, ProfileUpdate};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id:         i32,
	pub name:       String,
	pub email:      String,
	pub phone:      Option<String>,
	pub admin:      bool,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<Profile> for ProfileResponse {
	fn from(profile: Profile) -> Self {
		Self {
			id:         profile.id,
			name:       profile.name,
			email:      profile.email,
			phone:      profile.phone,
			admin:      profile.admin,
			created_at: profile.created_at,
			updated_at: profile.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "name must be between 1 and 128 characters long",
		code = "name-length"
	))]
	pub name:  Option<String>,
	pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
	fn from(request: UpdateProfileRequest) -> Self {
		Self { name: request.name, phone: request.phone }
	}
}
