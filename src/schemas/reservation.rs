use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::availability::{Availability, Slot};
use crate::models::{
	Profile,
	Reservation,
	ReservationStatus,
	ReservationUpdate,
	Restaurant,
};
use crate::slot_time::SlotTime;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub restaurant_id:    i32,
	pub day:              NaiveDate,
	pub start_at:         SlotTime,
	#[validate(range(
		min = 1,
		max = 20,
		message = "party size must be between 1 and 20",
		code = "party-size-range"
	))]
	pub party_size:       i32,
	#[serde(default)]
	pub special_requests: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
	pub day:              Option<NaiveDate>,
	pub start_at:         Option<SlotTime>,
	#[validate(range(
		min = 1,
		max = 20,
		message = "party size must be between 1 and 20",
		code = "party-size-range"
	))]
	pub party_size:       Option<i32>,
	pub special_requests: Option<String>,
}

impl From<UpdateReservationRequest> for ReservationUpdate {
	fn from(request: UpdateReservationRequest) -> Self {
		Self {
			day:              request.day,
			start_at:         request.start_at,
			party_size:       request.party_size,
			special_requests: request.special_requests,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct RejectReservationRequest {
	#[validate(length(
		min = 1,
		message = "a rejection reason is required",
		code = "reason-length"
	))]
	pub reason: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
	pub restaurant_id: i32,
	pub day:           NaiveDate,
	pub start_at:      SlotTime,
	#[validate(range(
		min = 1,
		max = 20,
		message = "party size must be between 1 and 20",
		code = "party-size-range"
	))]
	pub party_size:    i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub available:        bool,
	pub available_spaces: i32,
	pub max_capacity:     i32,
	pub requested_size:   i32,
}

impl From<Availability> for AvailabilityResponse {
	fn from(report: Availability) -> Self {
		Self {
			available:        report.available,
			available_spaces: report.available_spaces,
			max_capacity:     report.max_capacity,
			requested_size:   report.requested_size,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
	pub time:             SlotTime,
	pub available_spaces: i32,
	pub max_capacity:     i32,
}

impl From<Slot> for SlotResponse {
	fn from(slot: Slot) -> Self {
		Self {
			time:             slot.time,
			available_spaces: slot.available_spaces,
			max_capacity:     slot.max_capacity,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsResponse {
	pub restaurant_id:   i32,
	pub day:             NaiveDate,
	pub available_slots: Vec<SlotResponse>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:               i32,
	pub profile_id:       i32,
	pub restaurant_id:    i32,
	pub day:              NaiveDate,
	pub start_at:         SlotTime,
	pub party_size:       i32,
	pub status:           ReservationStatus,
	pub special_requests: String,
	pub rejection_reason: Option<String>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
	fn from(reservation: Reservation) -> Self {
		Self {
			id:               reservation.id,
			profile_id:       reservation.profile_id,
			restaurant_id:    reservation.restaurant_id,
			day:              reservation.day,
			start_at:         reservation.start_at,
			party_size:       reservation.party_size,
			status:           reservation.status,
			special_requests: reservation.special_requests,
			rejection_reason: reservation.rejection_reason,
			created_at:       reservation.created_at,
			updated_at:       reservation.updated_at,
		}
	}
}

/// A reservation with the guest contact details, for restaurant-side
/// listings
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestReservationResponse {
	pub id:               i32,
	pub day:              NaiveDate,
	pub start_at:         SlotTime,
	pub party_size:       i32,
	pub status:           ReservationStatus,
	pub special_requests: String,
	pub guest_name:       String,
	pub guest_email:      String,
	pub guest_phone:      Option<String>,
}

impl From<(Reservation, Profile)> for GuestReservationResponse {
	fn from(value: (Reservation, Profile)) -> Self {
		let (reservation, guest) = value;

		Self {
			id:               reservation.id,
			day:              reservation.day,
			start_at:         reservation.start_at,
			party_size:       reservation.party_size,
			status:           reservation.status,
			special_requests: reservation.special_requests,
			guest_name:       guest.name,
			guest_email:      guest.email,
			guest_phone:      guest.phone,
		}
	}
}

/// A reservation with guest and restaurant details, for the admin overview
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReservationResponse {
	pub id:               i32,
	pub day:              NaiveDate,
	pub start_at:         SlotTime,
	pub party_size:       i32,
	pub status:           ReservationStatus,
	pub special_requests: String,
	pub rejection_reason: Option<String>,
	pub guest_name:       String,
	pub guest_email:      String,
	pub guest_phone:      Option<String>,
	pub restaurant_name:  String,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl From<(Reservation, Profile, Restaurant)> for AdminReservationResponse {
	fn from(value: (Reservation, Profile, Restaurant)) -> Self {
		let (reservation, guest, restaurant) = value;

		Self {
			id:               reservation.id,
			day:              reservation.day,
			start_at:         reservation.start_at,
			party_size:       reservation.party_size,
			status:           reservation.status,
			special_requests: reservation.special_requests,
			rejection_reason: reservation.rejection_reason,
			guest_name:       guest.name,
			guest_email:      guest.email,
			guest_phone:      guest.phone,
			restaurant_name:  restaurant.name,
			created_at:       reservation.created_at,
			updated_at:       reservation.updated_at,
		}
	}
}
