use axum::http::StatusCode;
use brasserie::schemas::profile::ProfileResponse;

mod common;

use common::{GUEST_BOB, TestEnv};

#[tokio::test(flavor = "multi_thread")]
async fn guests_can_read_their_own_profile() {
	let env = TestEnv::new().await;

	let response = env.get_as(GUEST_BOB, "/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ProfileResponse>();

	assert_eq!(body.id, GUEST_BOB);
	assert_eq!(body.name, "Bob");
	assert_eq!(body.email, "bob@example.com");
	assert!(!body.admin);
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_routes_require_authentication() {
	let env = TestEnv::new().await;

	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env.get_as(999, "/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn updating_contact_details_keeps_unset_fields() {
	let env = TestEnv::new().await;

	let response = env
		.patch_as(GUEST_BOB, "/profile/me")
		.json(&serde_json::json!({ "phone": "+32470999999" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ProfileResponse>();

	assert_eq!(body.name, "Bob");
	assert_eq!(body.phone.as_deref(), Some("+32470999999"));

	let response = env
		.patch_as(GUEST_BOB, "/profile/me")
		.json(&serde_json::json!({ "name": "Bobby" }))
		.await;

	let body = response.json::<ProfileResponse>();

	assert_eq!(body.name, "Bobby");
	assert_eq!(body.phone.as_deref(), Some("+32470999999"));
}
