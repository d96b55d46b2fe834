//! Controllers for availability checks and guest-side reservations

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::DbPool;
use crate::availability;
use crate::error::Error;
use crate::mailer::Mailer;
use crate::models::{
	NewReservation,
	Profile,
	ProfileId,
	Reservation,
	Restaurant,
};
use crate::notification::Notification;
use crate::schemas::reservation::{
	AvailabilityQuery,
	AvailabilityResponse,
	AvailableSlotsResponse,
	CreateReservationRequest,
	GuestReservationResponse,
	ReservationResponse,
	SlotResponse,
	UpdateReservationRequest,
};

/// Check whether a party can be seated at a given day and time
///
/// A pure read against the current ledger state, it does not reserve any
/// capacity.
#[instrument(skip(pool))]
pub(crate) async fn get_availability(
	State(pool): State<DbPool>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	query.validate()?;

	let conn = pool.get().await?;

	let report = availability::check(
		&conn,
		query.restaurant_id,
		query.day,
		query.start_at,
		query.party_size,
	)
	.await?;

	Ok((StatusCode::OK, Json(AvailabilityResponse::from(report))))
}

/// List open booking slots for a restaurant on a day
#[instrument(skip(pool))]
pub(crate) async fn get_available_slots(
	State(pool): State<DbPool>,
	Path((restaurant_id, day)): Path<(i32, NaiveDate)>,
) -> Result<impl IntoResponse, Error> {
	if day < Utc::now().date_naive() {
		return Err(Error::ValidationError(
			"cannot book a date in the past".to_string(),
		));
	}

	let conn = pool.get().await?;

	let slots = availability::open_slots(&conn, restaurant_id, day).await?;

	let response = AvailableSlotsResponse {
		restaurant_id,
		day,
		available_slots: slots.into_iter().map(SlotResponse::from).collect(),
	};

	Ok((StatusCode::OK, Json(response)))
}

/// Create a reservation for the authenticated guest
///
/// The new reservation starts out pending and is only inserted if the
/// restaurant still has room for it.
#[instrument(skip(pool, mailer))]
pub(crate) async fn create_reservation(
	State(pool): State<DbPool>,
	State(mailer): State<Mailer>,
	Extension(profile_id): Extension<ProfileId>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let new_reservation = NewReservation {
		profile_id:       *profile_id,
		restaurant_id:    request.restaurant_id,
		day:              request.day,
		start_at:         request.start_at,
		party_size:       request.party_size,
		special_requests: request.special_requests,
	};

	let reservation = new_reservation.insert(&conn).await?;

	let guest = Profile::get(*profile_id, &conn).await?;
	let restaurant = Restaurant::get(reservation.restaurant_id, &conn).await?;

	Notification::Requested { is_modification: false }.fire(
		&mailer,
		&guest,
		&restaurant,
		&reservation,
	);

	Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// Update a reservation owned by the authenticated guest
///
/// A confirmed reservation whose day, time, or party size changed goes back
/// into the approval queue.
#[instrument(skip(pool, mailer))]
pub(crate) async fn update_reservation(
	State(pool): State<DbPool>,
	State(mailer): State<Mailer>,
	Extension(profile_id): Extension<ProfileId>,
	Path(id): Path<i32>,
	Json(request): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let (reservation, demoted) =
		Reservation::modify(id, *profile_id, request.into(), &conn).await?;

	if demoted {
		let guest = Profile::get(*profile_id, &conn).await?;
		let restaurant =
			Restaurant::get(reservation.restaurant_id, &conn).await?;

		Notification::Requested { is_modification: true }.fire(
			&mailer,
			&guest,
			&restaurant,
			&reservation,
		);
	}

	Ok((StatusCode::OK, Json(ReservationResponse::from(reservation))))
}

/// Cancel a reservation, releasing its seats
///
/// Guests may only cancel their own reservations, admins may cancel any.
#[instrument(skip(pool))]
pub(crate) async fn cancel_reservation(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let caller = Profile::get(*profile_id, &conn).await?;

	Reservation::cancel(id, &caller, &conn).await?;

	Ok(NoContent)
}

/// Confirmed reservations for a restaurant and day, ordered by start time
#[instrument(skip(pool))]
pub(crate) async fn get_reservations_by_date(
	State(pool): State<DbPool>,
	Path((restaurant_id, day)): Path<(i32, NaiveDate)>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations =
		Reservation::confirmed_for_day(restaurant_id, day, &conn).await?;

	let response: Vec<GuestReservationResponse> = reservations
		.into_iter()
		.map(GuestReservationResponse::from)
		.collect();

	Ok((StatusCode::OK, Json(response)))
}
