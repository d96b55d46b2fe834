use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use brasserie::mailer::{Mailer, StubMailbox};
use brasserie::{AppState, Config, DbPool, routes};
use diesel::connection::SimpleConnection;

mod mock_db;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

/// Profile ids created by the seed data
pub const GUEST_BOB: i32 = 1;
#[allow(dead_code)]
pub const GUEST_MIA: i32 = 2;
pub const ADMIN_ALICE: i32 = 3;

/// The seeded restaurant: 10 seats, open 09:00-22:00, 120 minute service
pub const RESTAURANT_ID: i32 = 1;

// Insert order fixes the generated ids the constants above rely on
const SEED: &str = "
	INSERT INTO restaurant
		(name, max_capacity, opening_time, closing_time, service_duration)
	VALUES
		('La Brasserie', 10, '09:00', '22:00', 120);

	INSERT INTO profile (name, email, phone, admin) VALUES
		('Bob', 'bob@example.com', '+32470000001', FALSE),
		('Mia', 'mia@example.com', NULL, FALSE),
		('Alice', 'alice@example.com', '+32470000003', TRUE);

	INSERT INTO dish (name, description, price_cents, category, is_available) VALUES
		('Steak frites', 'With bearnaise sauce', 2450, 'mains', TRUE),
		('Creme brulee', NULL, 950, 'desserts', TRUE),
		('Bouillabaisse', 'Seasonal', 2800, 'mains', FALSE);
";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:          TestServer,
	pub db_guard:     DatabaseGuard,
	pub pool:         DbPool,
	pub stub_mailbox: Arc<StubMailbox>,
	header:           String,
}

impl TestEnv {
	/// Get a test environment with a oneshot database and a stub mailer
	///
	/// # Panics
	/// Panics if building the test server or seeding the database fails
	pub async fn new() -> Self {
		let config = Config::from_env();

		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool();

		{
			let conn = test_pool.get().await.unwrap();
			conn.interact(|conn| conn.batch_execute(SEED))
				.await
				.unwrap()
				.unwrap();
		}

		let stub_mailbox = config
			.create_stub_mailbox()
			.expect("tests expect EMAIL_SMTP_SERVER=stub");
		let mailer = Mailer::new(&config, Some(stub_mailbox.clone()));

		let header = config.profile_id_header.clone();

		let state = AppState {
			config,
			database_pool: test_pool.clone(),
			mailer,
		};
		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv {
			app: test_server,
			db_guard: test_pool_guard,
			pool: test_pool,
			stub_mailbox,
			header,
		}
	}

	fn auth_header(&self, profile_id: i32) -> (HeaderName, HeaderValue) {
		(
			HeaderName::try_from(self.header.clone()).unwrap(),
			HeaderValue::from_str(&profile_id.to_string()).unwrap(),
		)
	}

	#[allow(dead_code)]
	pub fn get_as(&self, profile_id: i32, path: &str) -> TestRequest {
		let (name, value) = self.auth_header(profile_id);

		self.app.get(path).add_header(name, value)
	}

	#[allow(dead_code)]
	pub fn post_as(&self, profile_id: i32, path: &str) -> TestRequest {
		let (name, value) = self.auth_header(profile_id);

		self.app.post(path).add_header(name, value)
	}

	#[allow(dead_code)]
	pub fn patch_as(&self, profile_id: i32, path: &str) -> TestRequest {
		let (name, value) = self.auth_header(profile_id);

		self.app.patch(path).add_header(name, value)
	}

	#[allow(dead_code)]
	pub fn put_as(&self, profile_id: i32, path: &str) -> TestRequest {
		let (name, value) = self.auth_header(profile_id);

		self.app.put(path).add_header(name, value)
	}

	#[allow(dead_code)]
	pub fn delete_as(&self, profile_id: i32, path: &str) -> TestRequest {
		let (name, value) = self.auth_header(profile_id);

		self.app.delete(path).add_header(name, value)
	}

	/// Wait until the stub outbox holds at least `expected` mails and return
	/// the count seen
	#[allow(dead_code)]
	pub fn wait_for_mail(&self, expected: usize) -> usize {
		let mut mailbox = self.stub_mailbox.mailbox.lock();

		while mailbox.len() < expected {
			let wait = self
				.stub_mailbox
				.signal
				.wait_for(&mut mailbox, Duration::from_secs(2));

			if wait.timed_out() {
				break;
			}
		}

		mailbox.len()
	}
}
