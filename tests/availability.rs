use axum::http::StatusCode;
use brasserie::schemas::reservation::{
	AvailabilityResponse,
	AvailableSlotsResponse,
};

mod common;

use common::{GUEST_BOB, RESTAURANT_ID, TestEnv};

const DAY: &str = "2031-05-17";

#[tokio::test(flavor = "multi_thread")]
async fn empty_restaurant_fits_a_full_party() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.get(&format!(
			"/reservations/availability?restaurantId={RESTAURANT_ID}&day={DAY}&startAt=18:00&partySize=10"
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailabilityResponse>();

	assert!(body.available);
	assert_eq!(body.available_spaces, 10);
	assert_eq!(body.max_capacity, 10);
	assert_eq!(body.requested_size, 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_reservations_hold_seats() {
	let env = TestEnv::new().await;

	let create_req = serde_json::json!({
		"restaurantId": RESTAURANT_ID,
		"day": DAY,
		"startAt": "18:00",
		"partySize": 8,
	});

	let response =
		env.post_as(GUEST_BOB, "/reservations").json(&create_req).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env
		.app
		.get(&format!(
			"/reservations/availability?restaurantId={RESTAURANT_ID}&day={DAY}&startAt=18:00&partySize=3"
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailabilityResponse>();

	assert!(!body.available);
	assert_eq!(body.available_spaces, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn overlap_spans_the_whole_service_window() {
	let env = TestEnv::new().await;

	// 8 guests seated 12:00-14:00
	let create_req = serde_json::json!({
		"restaurantId": RESTAURANT_ID,
		"day": DAY,
		"startAt": "12:00",
		"partySize": 8,
	});

	let response =
		env.post_as(GUEST_BOB, "/reservations").json(&create_req).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	// A party arriving at 13:30 would share the room
	let response = env
		.app
		.get(&format!(
			"/reservations/availability?restaurantId={RESTAURANT_ID}&day={DAY}&startAt=13:30&partySize=4"
		))
		.await;

	assert!(!response.json::<AvailabilityResponse>().available);

	// A dinner party at 19:00 does not
	let response = env
		.app
		.get(&format!(
			"/reservations/availability?restaurantId={RESTAURANT_ID}&day={DAY}&startAt=19:00&partySize=4"
		))
		.await;

	let body = response.json::<AvailabilityResponse>();

	assert!(body.available);
	assert_eq!(body.available_spaces, 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn availability_for_unknown_restaurant_is_not_found() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.get(&format!(
			"/reservations/availability?restaurantId=999&day={DAY}&startAt=18:00&partySize=2"
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn availability_rejects_out_of_range_party_sizes() {
	let env = TestEnv::new().await;

	for party_size in [0, 21] {
		let response = env
			.app
			.get(&format!(
				"/reservations/availability?restaurantId={RESTAURANT_ID}&day={DAY}&startAt=18:00&partySize={party_size}"
			))
			.await;

		assert_eq!(
			response.status_code(),
			StatusCode::UNPROCESSABLE_ENTITY
		);
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn slots_keep_an_hour_of_margin_before_closing() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.get(&format!(
			"/reservations/available-slots/{RESTAURANT_ID}/{DAY}"
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<AvailableSlotsResponse>();
	let times: Vec<String> =
		body.available_slots.iter().map(|s| s.time.to_string()).collect();

	assert_eq!(times.first().map(String::as_str), Some("09:00"));
	assert_eq!(times.last().map(String::as_str), Some("20:30"));
	assert!(body.available_slots.iter().all(|s| s.available_spaces == 10));
}

#[tokio::test(flavor = "multi_thread")]
async fn full_slots_are_dropped_from_the_listing() {
	let env = TestEnv::new().await;

	// Fill the whole room at noon
	for (guest, party_size) in [(GUEST_BOB, 6), (common::GUEST_MIA, 4)] {
		let create_req = serde_json::json!({
			"restaurantId": RESTAURANT_ID,
			"day": DAY,
			"startAt": "12:00",
			"partySize": party_size,
		});

		let response =
			env.post_as(guest, "/reservations").json(&create_req).await;

		assert_eq!(response.status_code(), StatusCode::CREATED);
	}

	let response = env
		.app
		.get(&format!(
			"/reservations/available-slots/{RESTAURANT_ID}/{DAY}"
		))
		.await;

	let body = response.json::<AvailableSlotsResponse>();
	let times: Vec<String> =
		body.available_slots.iter().map(|s| s.time.to_string()).collect();

	// The noon party occupies 12:00-14:00, every slot whose double-width
	// window reaches it is full
	assert!(!times.contains(&"12:00".to_string()));
	assert!(!times.contains(&"10:00".to_string()));
	assert!(!times.contains(&"16:00".to_string()));

	assert!(times.contains(&"09:30".to_string()));
	assert!(times.contains(&"16:30".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn slots_for_a_past_date_are_rejected() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.get(&format!(
			"/reservations/available-slots/{RESTAURANT_ID}/2005-01-01"
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
