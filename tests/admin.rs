use axum::http::StatusCode;
use brasserie::models::ReservationStatus;
use brasserie::schemas::reservation::{
	AdminReservationResponse,
	AvailabilityResponse,
	ReservationResponse,
};
use brasserie::schemas::stats::StatsResponse;

mod common;

use common::{ADMIN_ALICE, GUEST_BOB, GUEST_MIA, RESTAURANT_ID, TestEnv};

const DAY: &str = "2031-05-17";

async fn create_reservation(
	env: &TestEnv,
	guest: i32,
	day: &str,
	start_at: &str,
	party_size: i32,
) -> ReservationResponse {
	let create_req = serde_json::json!({
		"restaurantId": RESTAURANT_ID,
		"day": day,
		"startAt": start_at,
		"partySize": party_size,
	});

	let response = env.post_as(guest, "/reservations").json(&create_req).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ReservationResponse>()
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_routes_are_forbidden_for_guests() {
	let env = TestEnv::new().await;

	let response = env.get_as(GUEST_BOB, "/admin/reservations/pending").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env.app.get("/admin/reservations/pending").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn accepting_confirms_a_pending_reservation() {
	let env = TestEnv::new().await;

	let created = create_reservation(&env, GUEST_BOB, DAY, "18:00", 4).await;

	let response = env
		.put_as(
			ADMIN_ALICE,
			&format!("/admin/reservations/{}/accept", created.id),
		)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ReservationResponse>();

	assert_eq!(body.status, ReservationStatus::Confirmed);

	// Request + confirmation emails for the guest
	assert_eq!(env.wait_for_mail(2), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn accepting_twice_is_an_invalid_transition() {
	let env = TestEnv::new().await;

	let created = create_reservation(&env, GUEST_BOB, DAY, "18:00", 4).await;

	let path = format!("/admin/reservations/{}/accept", created.id);

	assert_eq!(
		env.put_as(ADMIN_ALICE, &path).await.status_code(),
		StatusCode::OK
	);
	assert_eq!(
		env.put_as(ADMIN_ALICE, &path).await.status_code(),
		StatusCode::CONFLICT
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn deciding_on_unknown_reservations_is_not_found() {
	let env = TestEnv::new().await;

	let response =
		env.put_as(ADMIN_ALICE, "/admin/reservations/999/accept").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.put_as(ADMIN_ALICE, "/admin/reservations/999/reject")
		.json(&serde_json::json!({ "reason": "overbooked" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejecting_records_the_reason_and_frees_the_seats() {
	let env = TestEnv::new().await;

	let created = create_reservation(&env, GUEST_BOB, DAY, "18:00", 8).await;

	let response = env
		.put_as(
			ADMIN_ALICE,
			&format!("/admin/reservations/{}/reject", created.id),
		)
		.json(&serde_json::json!({ "reason": "private event that evening" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ReservationResponse>();

	assert_eq!(body.status, ReservationStatus::Rejected);
	assert_eq!(
		body.rejection_reason.as_deref(),
		Some("private event that evening")
	);

	// The rejected seats no longer count toward occupancy
	let response = env
		.app
		.get(&format!(
			"/reservations/availability?restaurantId={RESTAURANT_ID}&day={DAY}&startAt=18:00&partySize=10"
		))
		.await;

	assert!(response.json::<AvailabilityResponse>().available);
}

#[tokio::test(flavor = "multi_thread")]
async fn completing_requires_a_confirmed_reservation() {
	let env = TestEnv::new().await;

	let created = create_reservation(&env, GUEST_BOB, DAY, "18:00", 4).await;

	let complete_path =
		format!("/admin/reservations/{}/complete", created.id);

	// Still pending
	assert_eq!(
		env.put_as(ADMIN_ALICE, &complete_path).await.status_code(),
		StatusCode::CONFLICT
	);

	env.put_as(
		ADMIN_ALICE,
		&format!("/admin/reservations/{}/accept", created.id),
	)
	.await;

	let response = env.put_as(ADMIN_ALICE, &complete_path).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<ReservationResponse>().status,
		ReservationStatus::Completed
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_reservations_are_listed_oldest_booking_first() {
	let env = TestEnv::new().await;

	create_reservation(&env, GUEST_BOB, "2031-05-18", "12:00", 2).await;
	create_reservation(&env, GUEST_MIA, DAY, "20:00", 2).await;
	create_reservation(&env, GUEST_BOB, DAY, "12:00", 2).await;

	let response = env.get_as(ADMIN_ALICE, "/admin/reservations/pending").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<AdminReservationResponse>>();

	let order: Vec<(String, String)> = body
		.iter()
		.map(|r| (r.day.to_string(), r.start_at.to_string()))
		.collect();

	assert_eq!(order, vec![
		("2031-05-17".to_string(), "12:00".to_string()),
		("2031-05-17".to_string(), "20:00".to_string()),
		("2031-05-18".to_string(), "12:00".to_string()),
	]);

	assert_eq!(body[0].restaurant_name, "La Brasserie");
	assert_eq!(body[1].guest_name, "Mia");
}

#[tokio::test(flavor = "multi_thread")]
async fn browsing_filters_by_status() {
	let env = TestEnv::new().await;

	let created = create_reservation(&env, GUEST_BOB, DAY, "12:00", 2).await;
	create_reservation(&env, GUEST_MIA, DAY, "20:00", 2).await;

	env.put_as(
		ADMIN_ALICE,
		&format!("/admin/reservations/{}/accept", created.id),
	)
	.await;

	let response = env
		.get_as(ADMIN_ALICE, "/admin/reservations?status=confirmed")
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<AdminReservationResponse>>();

	assert_eq!(body.len(), 1);
	assert_eq!(body[0].id, created.id);

	let response = env.get_as(ADMIN_ALICE, "/admin/reservations").await;

	assert_eq!(response.json::<Vec<AdminReservationResponse>>().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn stats_count_pending_reservations_and_dishes() {
	let env = TestEnv::new().await;

	create_reservation(&env, GUEST_BOB, DAY, "12:00", 2).await;
	create_reservation(&env, GUEST_MIA, DAY, "20:00", 2).await;

	let response = env.get_as(ADMIN_ALICE, "/admin/stats").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<StatsResponse>();

	assert_eq!(body.pending_reservations, 2);
	// The seeded bookings are in the future
	assert_eq!(body.today_reservations, 0);
	assert_eq!(body.total_dishes, 3);
	assert_eq!(body.available_dishes, 2);
}
