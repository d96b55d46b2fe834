//! Admin controllers for reservation approval and dashboard stats

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use crate::DbPool;
use crate::error::Error;
use crate::mailer::Mailer;
use crate::models::{
	Dish,
	Profile,
	Reservation,
	ReservationFilter,
	Restaurant,
};
use crate::notification::Notification;
use crate::schemas::reservation::{
	AdminReservationResponse,
	RejectReservationRequest,
	ReservationResponse,
};
use crate::schemas::stats::StatsResponse;

/// All reservations, newest booking first, with optional status and day
/// filters
#[instrument(skip(pool))]
pub(crate) async fn get_all_reservations(
	State(pool): State<DbPool>,
	Query(filter): Query<ReservationFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations = Reservation::browse(filter, &conn).await?;

	let response: Vec<AdminReservationResponse> = reservations
		.into_iter()
		.map(AdminReservationResponse::from)
		.collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Reservations awaiting a decision, oldest booking first
#[instrument(skip(pool))]
pub(crate) async fn get_pending_reservations(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations = Reservation::pending(&conn).await?;

	let response: Vec<AdminReservationResponse> = reservations
		.into_iter()
		.map(AdminReservationResponse::from)
		.collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Confirm a pending reservation and notify the guest
#[instrument(skip(pool, mailer))]
pub(crate) async fn accept_reservation(
	State(pool): State<DbPool>,
	State(mailer): State<Mailer>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::accept(id, &conn).await?;

	let guest = Profile::get(reservation.profile_id, &conn).await?;
	let restaurant = Restaurant::get(reservation.restaurant_id, &conn).await?;

	Notification::Confirmed.fire(&mailer, &guest, &restaurant, &reservation);

	Ok((StatusCode::OK, Json(ReservationResponse::from(reservation))))
}

/// Reject a pending reservation with a reason and notify the guest
#[instrument(skip(pool, mailer))]
pub(crate) async fn reject_reservation(
	State(pool): State<DbPool>,
	State(mailer): State<Mailer>,
	Path(id): Path<i32>,
	Json(request): Json<RejectReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let reservation =
		Reservation::reject(id, request.reason.clone(), &conn).await?;

	let guest = Profile::get(reservation.profile_id, &conn).await?;
	let restaurant = Restaurant::get(reservation.restaurant_id, &conn).await?;

	Notification::Rejected { reason: request.reason }.fire(
		&mailer,
		&guest,
		&restaurant,
		&reservation,
	);

	Ok((StatusCode::OK, Json(ReservationResponse::from(reservation))))
}

/// Mark a confirmed reservation as completed
///
/// Meant for the scheduled job that closes out reservations after their
/// service time has passed.
#[instrument(skip(pool))]
pub(crate) async fn complete_reservation(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::complete(id, &conn).await?;

	Ok((StatusCode::OK, Json(ReservationResponse::from(reservation))))
}

/// Dashboard counters for the admin overview
#[instrument(skip(pool))]
pub(crate) async fn get_stats(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let pending_reservations = Reservation::count_pending(&conn).await?;
	let today_reservations =
		Reservation::count_active_on(Utc::now().date_naive(), &conn).await?;
	let (total_dishes, available_dishes) = Dish::counts(&conn).await?;

	let response = StatsResponse {
		pending_reservations,
		today_reservations,
		total_dishes,
		available_dishes,
	};

	Ok((StatusCode::OK, Json(response)))
}
