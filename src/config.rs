use std::sync::Arc;

use deadpool_diesel::postgres::{Manager, Pool};
use lettre::Address;

use crate::mailer::StubMailbox;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	/// Header carrying the authenticated profile id, set by the upstream
	/// identity gateway
	pub profile_id_header: String,

	pub email_address:       Address,
	pub email_smtp_server:   String,
	pub email_smtp_password: String,
	pub email_queue_size:    usize,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if `DATABASE_URL` is missing or another variable is malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let profile_id_header =
			Self::get_env_var_or("PROFILE_ID_HEADER", "x-profile-id");

		let email_address =
			Self::get_env_var_or("EMAIL_ADDRESS", "noreply@brasserie.example")
				.parse()
				.unwrap();
		let email_smtp_server =
			Self::get_env_var_or("EMAIL_SMTP_SERVER", "stub");
		let email_smtp_password =
			Self::get_env_var_or("EMAIL_SMTP_PASSWORD", "");
		let email_queue_size =
			Self::get_env_var_or("EMAIL_QUEUE_SIZE", "32").parse().unwrap();

		Self {
			database_url,
			profile_id_header,
			email_address,
			email_smtp_server,
			email_smtp_password,
			email_queue_size,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Create a stub mailbox if this config selects the stub mailer
	#[must_use]
	pub fn create_stub_mailbox(&self) -> Option<Arc<StubMailbox>> {
		(self.email_smtp_server == "stub")
			.then(|| Arc::new(StubMailbox::default()))
	}
}
