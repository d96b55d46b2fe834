//! # Brasserie backend library
//!
//! Seat-capacity reservation backend for a single-location restaurant:
//! availability checks against the aggregate seating capacity, candidate
//! slot listings, and a reservation approval lifecycle.

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use deadpool_diesel::postgres::{Object, Pool};

use crate::mailer::Mailer;

mod config;

pub mod availability;
pub mod controllers;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod models;
pub mod notification;
pub mod routes;
pub mod schema;
pub mod schemas;
pub mod slot_time;

pub use config::Config;
pub use error::Error;

pub type DbPool = Pool;
pub type DbConn = Object;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
	pub mailer:        Mailer,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for Mailer {
	fn from_ref(input: &AppState) -> Self { input.mailer.clone() }
}
