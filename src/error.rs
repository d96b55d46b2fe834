//! Library-wide error types and [`From`] impls

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::ReservationStatus;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Availability check failed for the requested party size
	#[error("insufficient capacity, {available_spaces} spaces available")]
	CapacityExceeded { available_spaces: i32 },
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// A reservation transition the state machine does not allow
	#[error("cannot change a {0} reservation")]
	InvalidTransition(ReservationStatus),
	/// Resource not found
	#[error("{0} not found")]
	NotFound(String),
	/// Resource exists but does not belong to the caller
	///
	/// Reported as a plain not-found so callers cannot probe for other
	/// guests' reservations.
	#[error("reservation not found")]
	NotFoundOrForbidden,
	/// The persistent store could not be reached
	#[error("the reservation store is unavailable")]
	StoreUnavailable,
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Malformed email
	#[error("invalid email -- {0:?}")]
	InvalidEmail(lettre::address::AddressError),
	/// Mail queue is full
	#[error("mail queue full -- {0:?}")]
	MailQueueFull(mpsc::error::TrySendError<lettre::Message>),
	/// Mailer stopped unexpectedly
	#[error("mailer stopped -- {0:?}")]
	MailerStopped(mpsc::error::SendError<lettre::Message>),
	/// Generic mailer error
	#[error("mail error -- {0:?}")]
	MailError(lettre::error::Error),
}

// Map internal server errors to application errors, logging the detail and
// keeping the response opaque
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		match value {
			InternalServerError::DatabaseError(_)
			| InternalServerError::DatabaseInteractionError(_)
			| InternalServerError::PoolError(_) => Self::StoreUnavailable,
			_ => Self::InternalServerError,
		}
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();

		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let message = Json(json!({ "detail": self.to_string() }));

		let status = match self {
			Self::CapacityExceeded { .. } | Self::InvalidTransition(_) => {
				StatusCode::CONFLICT
			},
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) | Self::NotFoundOrForbidden => {
				StatusCode::NOT_FOUND
			},
			Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, message).into_response()
	}
}

/// Map database result errors to application errors
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by a query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("resource".to_string())
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				diesel::result::DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			// Check constraint violation, the request data was out of bounds
			diesel::result::Error::DatabaseError(
				diesel::result::DatabaseErrorKind::CheckViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<lettre::address::AddressError> for Error {
	fn from(err: lettre::address::AddressError) -> Self {
		InternalServerError::InvalidEmail(err).into()
	}
}

impl From<mpsc::error::TrySendError<lettre::Message>> for Error {
	fn from(err: mpsc::error::TrySendError<lettre::Message>) -> Self {
		InternalServerError::MailQueueFull(err).into()
	}
}

impl From<mpsc::error::SendError<lettre::Message>> for Error {
	fn from(err: mpsc::error::SendError<lettre::Message>) -> Self {
		InternalServerError::MailerStopped(err).into()
	}
}

impl From<lettre::error::Error> for Error {
	fn from(err: lettre::error::Error) -> Self {
		InternalServerError::MailError(err).into()
	}
}
