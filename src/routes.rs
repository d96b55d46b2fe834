use std::time::Duration;

use axum::Router;
use axum::routing::{get, patch, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::admin::{
	accept_reservation,
	complete_reservation,
	get_all_reservations,
	get_pending_reservations,
	get_stats,
	reject_reservation,
};
use crate::controllers::dish::{
	create_dish,
	delete_dish,
	get_all_dishes,
	get_dish,
	get_dishes,
	update_dish,
};
use crate::controllers::healthcheck;
use crate::controllers::profile::{
	get_current_profile,
	update_current_profile,
};
use crate::controllers::reservation::{
	cancel_reservation,
	create_reservation,
	get_availability,
	get_available_slots,
	get_reservations_by_date,
	update_reservation,
};
use crate::controllers::restaurant::get_restaurant;
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/restaurants", restaurant_routes())
		.nest("/reservations", reservation_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/dishes", dish_routes())
		.nest("/admin", admin_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Restaurant profile routes
fn restaurant_routes() -> Router<AppState> {
	Router::new().route("/{id}", get(get_restaurant))
}

/// Reservation routes, availability checks are public
fn reservation_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/", post(create_reservation))
		.route(
			"/{id}",
			patch(update_reservation).delete(cancel_reservation),
		)
		.route("/{restaurant_id}/{day}", get(get_reservations_by_date))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/availability", get(get_availability))
		.route(
			"/available-slots/{restaurant_id}/{day}",
			get(get_available_slots),
		)
		.merge(authenticated)
}

/// Profile routes for the authenticated guest
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/me", get(get_current_profile).patch(update_current_profile))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Public menu routes
fn dish_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_dishes))
		.route("/{id}", get(get_dish))
}

/// Admin routes for reservation approval, menu management, and stats
fn admin_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/reservations", get(get_all_reservations))
		.route("/reservations/pending", get(get_pending_reservations))
		.route("/reservations/{id}/accept", put(accept_reservation))
		.route("/reservations/{id}/reject", put(reject_reservation))
		.route("/reservations/{id}/complete", put(complete_reservation))
		.route("/dishes", get(get_all_dishes).post(create_dish))
		.route("/dishes/{id}", put(update_dish).delete(delete_dish))
		.route("/stats", get(get_stats))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()))
}
