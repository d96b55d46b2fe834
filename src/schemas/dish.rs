use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Dish, DishUpdate, NewDish};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishResponse {
	pub id:           i32,
	pub name:         String,
	pub description:  Option<String>,
	pub price_cents:  i32,
	pub category:     String,
	pub image_url:    Option<String>,
	pub is_available: bool,
	pub created_at:   NaiveDateTime,
	pub updated_at:   NaiveDateTime,
}

impl From<Dish> for DishResponse {
	fn from(dish: Dish) -> Self {
		Self {
			id:           dish.id,
			name:         dish.name,
			description:  dish.description,
			price_cents:  dish.price_cents,
			category:     dish.category,
			image_url:    dish.image_url,
			is_available: dish.is_available,
			created_at:   dish.created_at,
			updated_at:   dish.updated_at,
		}
	}
}

fn default_availability() -> bool { true }

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishRequest {
	#[validate(length(
		min = 1,
		message = "a dish name is required",
		code = "name-length"
	))]
	pub name:         String,
	pub description:  Option<String>,
	#[validate(range(
		min = 0,
		message = "price cannot be negative",
		code = "price-range"
	))]
	pub price_cents:  i32,
	#[validate(length(
		min = 1,
		message = "a dish category is required",
		code = "category-length"
	))]
	pub category:     String,
	pub image_url:    Option<String>,
	#[serde(default = "default_availability")]
	pub is_available: bool,
}

impl From<CreateDishRequest> for NewDish {
	fn from(request: CreateDishRequest) -> Self {
		Self {
			name:         request.name,
			description:  request.description,
			price_cents:  request.price_cents,
			category:     request.category,
			image_url:    request.image_url,
			is_available: request.is_available,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDishRequest {
	#[validate(length(
		min = 1,
		message = "a dish name is required",
		code = "name-length"
	))]
	pub name:         Option<String>,
	pub description:  Option<String>,
	#[validate(range(
		min = 0,
		message = "price cannot be negative",
		code = "price-range"
	))]
	pub price_cents:  Option<i32>,
	pub category:     Option<String>,
	pub image_url:    Option<String>,
	pub is_available: Option<bool>,
}

impl From<UpdateDishRequest> for DishUpdate {
	fn from(request: UpdateDishRequest) -> Self {
		Self {
			name:         request.name,
			description:  request.description,
			price_cents:  request.price_cents,
			category:     request.category,
			image_url:    request.image_url,
			is_available: request.is_available,
		}
	}
}
