//! Guest and admin profiles
//!
//! Credential issuance and sessions live in the identity gateway; this
//! backend only stores contact data and the admin flag.

use std::ops::Deref;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};

use crate::schema::profile;
use crate::{DbConn, Error};

/// The id of an authenticated profile, resolved by the auth middleware and
/// stored as a request extension
#[derive(Clone, Copy, Debug)]
pub struct ProfileId(pub(crate) i32);

impl Deref for ProfileId {
	type Target = i32;

	fn deref(&self) -> &Self::Target { &self.0 }
}

impl std::fmt::Display for ProfileId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A single profile
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
	pub id:         i32,
	pub name:       String,
	pub email:      String,
	pub phone:      Option<String>,
	pub admin:      bool,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl TryFrom<&Profile> for Mailbox {
	type Error = Error;

	fn try_from(value: &Profile) -> Result<Mailbox, Error> {
		Ok(Mailbox::new(Some(value.name.clone()), value.email.parse()?))
	}
}

/// Contact field updates for a profile, unset fields are left unchanged
#[derive(AsChangeset, Clone, Debug, Default, Deserialize)]
#[diesel(table_name = profile)]
pub struct ProfileUpdate {
	pub name:  Option<String>,
	pub phone: Option<String>,
}

impl Profile {
	/// Get a [`Profile`] given its id
	pub(crate) async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let found = conn
			.interact(move |conn| {
				profile::table.find(query_id).first(conn).optional()
			})
			.await??;

		found.ok_or_else(|| Error::NotFound(format!("profile {query_id}")))
	}

	/// Check if a [`Profile`] with a given id exists
	pub(crate) async fn exists(
		query_id: i32,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let exists = conn
			.interact(move |conn| {
				diesel::select(diesel::dsl::exists(
					profile::table.find(query_id),
				))
				.get_result(conn)
			})
			.await??;

		Ok(exists)
	}

	/// Apply a contact update to a [`Profile`]
	pub(crate) async fn update_contact(
		query_id: i32,
		update: ProfileUpdate,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				diesel::update(profile::table.find(query_id))
					.set((
						update,
						profile::updated_at.eq(diesel::dsl::now),
					))
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??;

		updated.ok_or_else(|| Error::NotFound(format!("profile {query_id}")))
	}
}
