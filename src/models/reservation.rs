//! Reservation records and the booking lifecycle state machine
//!
//! A reservation starts out `pending`, an admin confirms or rejects it, and
//! the owning guest may cancel it as long as it is not in a terminal state.
//! Every capacity-affecting change runs its availability check and its write
//! inside one transaction that holds the restaurant row lock.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::availability;
use crate::models::{Profile, Restaurant};
use crate::schema::{profile, reservation, restaurant};
use crate::slot_time::SlotTime;
use crate::{DbConn, Error};

#[derive(
	Clone,
	Copy,
	DbEnum,
	Debug,
	Default,
	Deserialize,
	Eq,
	PartialEq,
	Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReservationStatus"]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
	#[default]
	Pending,
	Confirmed,
	Rejected,
	Cancelled,
	Completed,
}

impl ReservationStatus {
	/// Statuses that count toward occupied capacity
	pub(crate) const ACTIVE: [Self; 2] = [Self::Pending, Self::Confirmed];

	/// Whether the state machine permits no further transitions
	#[must_use]
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
	}
}

impl std::fmt::Display for ReservationStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Pending => "pending",
			Self::Confirmed => "confirmed",
			Self::Rejected => "rejected",
			Self::Cancelled => "cancelled",
			Self::Completed => "completed",
		};

		write!(f, "{name}")
	}
}

/// A single reservation
#[derive(
	Associations,
	Clone,
	Debug,
	Deserialize,
	Identifiable,
	Queryable,
	Selectable,
	Serialize,
)]
#[diesel(belongs_to(Profile))]
#[diesel(belongs_to(Restaurant))]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Reservation {
	pub id:               i32,
	pub profile_id:       i32,
	pub restaurant_id:    i32,
	pub day:              NaiveDate,
	pub start_at:         SlotTime,
	pub party_size:       i32,
	pub status:           ReservationStatus,
	pub special_requests: String,
	pub rejection_reason: Option<String>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
pub struct NewReservation {
	pub profile_id:       i32,
	pub restaurant_id:    i32,
	pub day:              NaiveDate,
	pub start_at:         SlotTime,
	pub party_size:       i32,
	pub special_requests: String,
}

/// Field updates for an existing reservation, unset fields keep their value
#[derive(Clone, Debug, Default)]
pub struct ReservationUpdate {
	pub day:              Option<NaiveDate>,
	pub start_at:         Option<SlotTime>,
	pub party_size:       Option<i32>,
	pub special_requests: Option<String>,
}

impl ReservationUpdate {
	/// Whether applying this update changes the seats the reservation holds
	fn is_capacity_relevant(&self, current: &Reservation) -> bool {
		self.day.is_some_and(|d| d != current.day)
			|| self.start_at.is_some_and(|t| t != current.start_at)
			|| self.party_size.is_some_and(|p| p != current.party_size)
	}
}

/// Filters for browsing reservations
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
	pub status: Option<ReservationStatus>,
	pub day:    Option<NaiveDate>,
}

impl NewReservation {
	/// Insert this reservation if the restaurant still has room for it
	///
	/// The availability check and the insert run in one transaction holding
	/// the restaurant row lock.
	pub(crate) async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let created = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let restaurant = Restaurant::lock_for_booking(
						self.restaurant_id,
						conn,
					)?;

					let report = availability::check_within(
						conn,
						&restaurant,
						self.day,
						self.start_at,
						self.party_size,
						None,
					)?;

					if !report.available {
						return Err(Error::CapacityExceeded {
							available_spaces: report.available_spaces,
						});
					}

					let created = diesel::insert_into(reservation::table)
						.values(&self)
						.returning(Reservation::as_returning())
						.get_result(conn)?;

					Ok(created)
				})
			})
			.await??;

		Ok(created)
	}
}

impl Reservation {
	/// Get a [`Reservation`] given its id
	pub(crate) async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let found = conn
			.interact(move |conn| {
				reservation::table.find(query_id).first(conn).optional()
			})
			.await??;

		found.ok_or_else(|| Error::NotFound(format!("reservation {query_id}")))
	}

	/// Confirmed reservations for one restaurant and day with their guest,
	/// ordered by start time
	pub(crate) async fn confirmed_for_day(
		query_restaurant_id: i32,
		on_day: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<(Self, Profile)>, Error> {
		let reservations = conn
			.interact(move |conn| {
				reservation::table
					.inner_join(profile::table)
					.filter(
						reservation::restaurant_id.eq(query_restaurant_id),
					)
					.filter(reservation::day.eq(on_day))
					.filter(
						reservation::status.eq(ReservationStatus::Confirmed),
					)
					.order(reservation::start_at.asc())
					.select((Self::as_select(), Profile::as_select()))
					.load(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Pending reservations awaiting an admin decision, oldest booking first
	pub(crate) async fn pending(
		conn: &DbConn,
	) -> Result<Vec<(Self, Profile, Restaurant)>, Error> {
		let reservations = conn
			.interact(|conn| {
				reservation::table
					.inner_join(profile::table)
					.inner_join(restaurant::table)
					.filter(reservation::status.eq(ReservationStatus::Pending))
					.order((
						reservation::day.asc(),
						reservation::start_at.asc(),
					))
					.select((
						Self::as_select(),
						Profile::as_select(),
						Restaurant::as_select(),
					))
					.load(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// All reservations, newest booking first, with optional status and day
	/// filters
	pub(crate) async fn browse(
		filter: ReservationFilter,
		conn: &DbConn,
	) -> Result<Vec<(Self, Profile, Restaurant)>, Error> {
		let reservations = conn
			.interact(move |conn| {
				let mut query = reservation::table
					.inner_join(profile::table)
					.inner_join(restaurant::table)
					.select((
						Self::as_select(),
						Profile::as_select(),
						Restaurant::as_select(),
					))
					.into_boxed();

				if let Some(status) = filter.status {
					query = query.filter(reservation::status.eq(status));
				}

				if let Some(on_day) = filter.day {
					query = query.filter(reservation::day.eq(on_day));
				}

				query
					.order((
						reservation::day.desc(),
						reservation::start_at.desc(),
					))
					.load(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Number of reservations awaiting an admin decision
	pub(crate) async fn count_pending(conn: &DbConn) -> Result<i64, Error> {
		let count = conn
			.interact(|conn| {
				reservation::table
					.filter(reservation::status.eq(ReservationStatus::Pending))
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(count)
	}

	/// Number of active reservations on the given day
	pub(crate) async fn count_active_on(
		on_day: NaiveDate,
		conn: &DbConn,
	) -> Result<i64, Error> {
		let count = conn
			.interact(move |conn| {
				reservation::table
					.filter(reservation::day.eq(on_day))
					.filter(
						reservation::status.eq_any(ReservationStatus::ACTIVE),
					)
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(count)
	}

	/// Apply an update on behalf of the owning guest
	///
	/// When the day, time, or party size changed the availability check is
	/// re-run against all *other* reservations, excluding this one's own
	/// seats from the overlap sum. A confirmed reservation whose seats
	/// changed drops back to pending for re-approval; the returned flag is
	/// true when that happened.
	pub(crate) async fn modify(
		query_id: i32,
		caller: i32,
		update: ReservationUpdate,
		conn: &DbConn,
	) -> Result<(Self, bool), Error> {
		let modified = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let current: Self = reservation::table
						.find(query_id)
						.first(conn)
						.optional()?
						.ok_or_else(|| {
							Error::NotFound(format!("reservation {query_id}"))
						})?;

					if current.profile_id != caller {
						return Err(Error::NotFoundOrForbidden);
					}

					if current.status.is_terminal() {
						return Err(Error::InvalidTransition(current.status));
					}

					let day = update.day.unwrap_or(current.day);
					let start_at = update.start_at.unwrap_or(current.start_at);
					let party_size =
						update.party_size.unwrap_or(current.party_size);

					let capacity_relevant =
						update.is_capacity_relevant(&current);

					if capacity_relevant {
						let restaurant = Restaurant::lock_for_booking(
							current.restaurant_id,
							conn,
						)?;

						let report = availability::check_within(
							conn,
							&restaurant,
							day,
							start_at,
							party_size,
							Some(current.id),
						)?;

						if !report.available {
							return Err(Error::CapacityExceeded {
								available_spaces: report.available_spaces,
							});
						}
					}

					let demoted = capacity_relevant
						&& current.status == ReservationStatus::Confirmed;

					let status = if demoted {
						ReservationStatus::Pending
					} else {
						current.status
					};

					let special_requests = update
						.special_requests
						.unwrap_or_else(|| current.special_requests.clone());

					let updated = diesel::update(
						reservation::table.find(query_id),
					)
					.set((
						reservation::day.eq(day),
						reservation::start_at.eq(start_at),
						reservation::party_size.eq(party_size),
						reservation::special_requests.eq(special_requests),
						reservation::status.eq(status),
						reservation::updated_at.eq(diesel::dsl::now),
					))
					.returning(Self::as_returning())
					.get_result(conn)?;

					Ok((updated, demoted))
				})
			})
			.await??;

		Ok(modified)
	}

	/// Cancel a reservation on behalf of its guest or an admin
	///
	/// Releases the held seats; cancelling a terminal reservation is
	/// refused.
	pub(crate) async fn cancel(
		query_id: i32,
		caller: &Profile,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let caller_id = caller.id;
		let caller_is_admin = caller.admin;

		let cancelled = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let current: Self = reservation::table
						.find(query_id)
						.first(conn)
						.optional()?
						.ok_or_else(|| {
							Error::NotFound(format!("reservation {query_id}"))
						})?;

					if current.profile_id != caller_id && !caller_is_admin {
						return Err(Error::NotFoundOrForbidden);
					}

					if current.status.is_terminal() {
						return Err(Error::InvalidTransition(current.status));
					}

					let cancelled = diesel::update(
						reservation::table.find(query_id),
					)
					.set((
						reservation::status.eq(ReservationStatus::Cancelled),
						reservation::updated_at.eq(diesel::dsl::now),
					))
					.returning(Self::as_returning())
					.get_result(conn)?;

					Ok(cancelled)
				})
			})
			.await??;

		Ok(cancelled)
	}

	/// Confirm a pending reservation
	pub(crate) async fn accept(
		query_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let accepted = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					Self::transition(
						conn,
						query_id,
						ReservationStatus::Pending,
						ReservationStatus::Confirmed,
						None,
					)
				})
			})
			.await??;

		Ok(accepted)
	}

	/// Reject a pending reservation, recording the reason for the guest
	pub(crate) async fn reject(
		query_id: i32,
		reason: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let rejected = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					Self::transition(
						conn,
						query_id,
						ReservationStatus::Pending,
						ReservationStatus::Rejected,
						Some(reason),
					)
				})
			})
			.await??;

		Ok(rejected)
	}

	/// Close out a confirmed reservation once its service time has passed
	pub(crate) async fn complete(
		query_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let completed = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					Self::transition(
						conn,
						query_id,
						ReservationStatus::Confirmed,
						ReservationStatus::Completed,
						None,
					)
				})
			})
			.await??;

		Ok(completed)
	}

	/// Move a reservation from `from` to `to`, refusing any other source
	/// status
	fn transition(
		conn: &mut PgConnection,
		query_id: i32,
		from: ReservationStatus,
		to: ReservationStatus,
		reason: Option<String>,
	) -> Result<Self, Error> {
		let current: Self = reservation::table
			.find(query_id)
			.first(conn)
			.optional()?
			.ok_or_else(|| {
				Error::NotFound(format!("reservation {query_id}"))
			})?;

		if current.status != from {
			return Err(Error::InvalidTransition(current.status));
		}

		// The reason stays None except on reject, where the source status
		// guarantees the column was still empty
		let updated = diesel::update(reservation::table.find(query_id))
			.set((
				reservation::status.eq(to),
				reservation::rejection_reason.eq(reason),
				reservation::updated_at.eq(diesel::dsl::now),
			))
			.returning(Self::as_returning())
			.get_result(conn)?;

		Ok(updated)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn terminal_statuses_permit_no_transitions() {
		assert!(ReservationStatus::Rejected.is_terminal());
		assert!(ReservationStatus::Cancelled.is_terminal());
		assert!(ReservationStatus::Completed.is_terminal());

		assert!(!ReservationStatus::Pending.is_terminal());
		assert!(!ReservationStatus::Confirmed.is_terminal());
	}

	#[test]
	fn only_pending_and_confirmed_hold_seats() {
		assert_eq!(
			ReservationStatus::ACTIVE,
			[ReservationStatus::Pending, ReservationStatus::Confirmed]
		);
	}

	#[test]
	fn unchanged_fields_are_not_capacity_relevant() {
		let current = Reservation {
			id:               1,
			profile_id:       1,
			restaurant_id:    1,
			day:              "2031-05-17".parse().unwrap(),
			start_at:         "18:00".parse().unwrap(),
			party_size:       4,
			status:           ReservationStatus::Confirmed,
			special_requests: String::new(),
			rejection_reason: None,
			created_at:       chrono::NaiveDateTime::default(),
			updated_at:       chrono::NaiveDateTime::default(),
		};

		let same_values = ReservationUpdate {
			day: Some(current.day),
			start_at: Some(current.start_at),
			party_size: Some(current.party_size),
			special_requests: Some("window seat".to_string()),
		};

		assert!(!same_values.is_capacity_relevant(&current));

		let bigger_party =
			ReservationUpdate { party_size: Some(6), ..Default::default() };

		assert!(bigger_party.is_capacity_relevant(&current));
	}
}
