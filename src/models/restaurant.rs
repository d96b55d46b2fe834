//! The restaurant profile driving every scheduling decision

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use validator_derive::Validate;

use crate::schema::restaurant;
use crate::slot_time::SlotTime;
use crate::{DbConn, Error};

/// A single restaurant
///
/// Rows are validated on read so a corrupt capacity or opening-hours value
/// surfaces as a validation error instead of a nonsense scheduling decision.
#[derive(
	Clone,
	Debug,
	Deserialize,
	Identifiable,
	Queryable,
	Selectable,
	Serialize,
	Validate,
)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[validate(schema(function = "validate_opening_hours"))]
pub struct Restaurant {
	pub id:               i32,
	pub name:             String,
	#[validate(range(
		min = 1,
		message = "restaurant capacity must be positive",
		code = "capacity-range"
	))]
	pub max_capacity:     i32,
	pub opening_time:     SlotTime,
	pub closing_time:     SlotTime,
	#[validate(range(
		min = 1,
		message = "service duration must be positive",
		code = "service-duration-range"
	))]
	pub service_duration: i32,
	pub phone:            Option<String>,
	pub address:          Option<String>,
	pub description:      Option<String>,
	pub image_url:        Option<String>,
	pub latitude:         Option<f64>,
	pub longitude:        Option<f64>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

fn validate_opening_hours(value: &Restaurant) -> Result<(), ValidationError> {
	if value.closing_time <= value.opening_time {
		return Err(ValidationError::new("opening-hours")
			.with_message("closing time must be after opening time".into()));
	}

	Ok(())
}

impl Restaurant {
	/// Service duration in whole minutes
	///
	/// The duration is validated positive on read
	#[must_use]
	pub fn service_minutes(&self) -> u32 { self.service_duration.unsigned_abs() }

	fn validated(self) -> Result<Self, Error> {
		self.validate()?;

		Ok(self)
	}

	/// Get a [`Restaurant`] given its id
	pub(crate) async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let found: Option<Self> = conn
			.interact(move |conn| {
				restaurant::table.find(query_id).first(conn).optional()
			})
			.await??;

		found
			.ok_or_else(|| Error::NotFound(format!("restaurant {query_id}")))?
			.validated()
	}

	/// Get a [`Restaurant`] and lock its row for the rest of the transaction
	///
	/// Serializes capacity decisions for one restaurant so two racing
	/// bookings cannot both win the last seats.
	pub(crate) fn lock_for_booking(
		query_id: i32,
		conn: &mut PgConnection,
	) -> Result<Self, Error> {
		let found: Option<Self> = restaurant::table
			.find(query_id)
			.for_update()
			.first(conn)
			.optional()?;

		found
			.ok_or_else(|| Error::NotFound(format!("restaurant {query_id}")))?
			.validated()
	}
}
