use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Restaurant;
use crate::slot_time::SlotTime;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
	pub id:               i32,
	pub name:             String,
	pub max_capacity:     i32,
	pub opening_time:     SlotTime,
	pub closing_time:     SlotTime,
	pub service_duration: i32,
	pub phone:            Option<String>,
	pub address:          Option<String>,
	pub description:      Option<String>,
	pub image_url:        Option<String>,
	pub latitude:         Option<f64>,
	pub longitude:        Option<f64>,
	pub created_at:       NaiveDateTime,
}

impl From<Restaurant> for RestaurantResponse {
	fn from(restaurant: Restaurant) -> Self {
		Self {
			id:               restaurant.id,
			name:             restaurant.name,
			max_capacity:     restaurant.max_capacity,
			opening_time:     restaurant.opening_time,
			closing_time:     restaurant.closing_time,
			service_duration: restaurant.service_duration,
			phone:            restaurant.phone,
			address:          restaurant.address,
			description:      restaurant.description,
			image_url:        restaurant.image_url,
			latitude:         restaurant.latitude,
			longitude:        restaurant.longitude,
			created_at:       restaurant.created_at,
		}
	}
}
