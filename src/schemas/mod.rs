//! Request and response schemas for the HTTP API

pub mod dish;
pub mod profile;
pub mod reservation;
pub mod restaurant;
pub mod stats;
