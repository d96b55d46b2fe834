//! Capacity arithmetic over overlapping reservations
//!
//! A restaurant has one aggregate seat capacity. A party occupies its seats
//! for the restaurant's service duration, so a request is checked against
//! every pending or confirmed reservation whose service window overlaps the
//! window around the requested time.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::models::{Restaurant, ReservationStatus};
use crate::schema::reservation;
use crate::slot_time::{ServiceWindow, SlotTime};
use crate::{DbConn, Error};

/// Interval between offered booking slots, in minutes
pub const SLOT_INTERVAL_MINUTES: u16 = 30;

/// The outcome of a capacity check for one requested booking
#[derive(Clone, Copy, Debug)]
pub struct Availability {
	pub available:        bool,
	pub available_spaces: i32,
	pub max_capacity:     i32,
	pub requested_size:   i32,
}

/// A bookable slot with its remaining capacity
#[derive(Clone, Copy, Debug)]
pub struct Slot {
	pub time:             SlotTime,
	pub available_spaces: i32,
	pub max_capacity:     i32,
}

/// Sum the party sizes of seated parties whose service window overlaps
/// `window`
///
/// `exclude` drops one reservation from the sum, used when re-checking a
/// booking that is being modified.
fn occupied_in(
	seated: &[(i32, SlotTime, i32)],
	window: &ServiceWindow,
	service_minutes: u32,
	exclude: Option<i32>,
) -> i32 {
	seated
		.iter()
		.filter(|(id, ..)| Some(*id) != exclude)
		.filter(|(_, start, _)| {
			ServiceWindow::of_service(*start, service_minutes).overlaps(window)
		})
		.map(|(.., party_size)| party_size)
		.sum()
}

/// Occupied capacity for a restaurant and day within `window`
///
/// Only pending and confirmed reservations hold seats; rejected, cancelled,
/// and completed ones never count.
pub(crate) fn occupied_capacity(
	conn: &mut PgConnection,
	restaurant: &Restaurant,
	on_day: NaiveDate,
	window: &ServiceWindow,
	exclude: Option<i32>,
) -> Result<i32, Error> {
	let seated = reservation::table
		.filter(reservation::restaurant_id.eq(restaurant.id))
		.filter(reservation::day.eq(on_day))
		.filter(reservation::status.eq_any(ReservationStatus::ACTIVE))
		.select((
			reservation::id,
			reservation::start_at,
			reservation::party_size,
		))
		.load::<(i32, SlotTime, i32)>(conn)?;

	Ok(occupied_in(&seated, window, restaurant.service_minutes(), exclude))
}

/// Check whether a party can be seated at the given day and time
///
/// The window spans a full service duration on either side of the request,
/// catching parties still seated when the new one arrives as well as parties
/// seated until after it leaves.
pub(crate) fn check_within(
	conn: &mut PgConnection,
	restaurant: &Restaurant,
	on_day: NaiveDate,
	at: SlotTime,
	party_size: i32,
	exclude: Option<i32>,
) -> Result<Availability, Error> {
	let window = ServiceWindow::around(at, restaurant.service_minutes());

	let occupied = occupied_capacity(conn, restaurant, on_day, &window, exclude)?;

	let available_spaces = restaurant.max_capacity - occupied;

	Ok(Availability {
		available: available_spaces >= party_size,
		available_spaces,
		max_capacity: restaurant.max_capacity,
		requested_size: party_size,
	})
}

/// Check availability against the current ledger state
///
/// A pure read; reserving the checked capacity is up to the caller.
pub async fn check(
	conn: &DbConn,
	restaurant_id: i32,
	on_day: NaiveDate,
	at: SlotTime,
	party_size: i32,
) -> Result<Availability, Error> {
	let restaurant = Restaurant::get(restaurant_id, conn).await?;

	let report = conn
		.interact(move |conn| {
			check_within(conn, &restaurant, on_day, at, party_size, None)
		})
		.await??;

	Ok(report)
}

/// All open slots for a restaurant on a day, in chronological order
///
/// A slot that fails to evaluate is skipped instead of failing the whole
/// listing.
pub async fn open_slots(
	conn: &DbConn,
	restaurant_id: i32,
	on_day: NaiveDate,
) -> Result<Vec<Slot>, Error> {
	let restaurant = Restaurant::get(restaurant_id, conn).await?;

	let slots = conn
		.interact(move |conn| {
			SlotTime::slots(
				restaurant.opening_time,
				restaurant.closing_time,
				SLOT_INTERVAL_MINUTES,
			)
			.filter_map(|time| {
				match check_within(conn, &restaurant, on_day, time, 1, None) {
					Ok(report) if report.available_spaces > 0 => Some(Slot {
						time,
						available_spaces: report.available_spaces,
						max_capacity: report.max_capacity,
					}),
					Ok(_) => None,
					Err(e) => {
						warn!("skipping slot {time} on {on_day} -- {e}");

						None
					},
				}
			})
			.collect::<Vec<_>>()
		})
		.await?;

	Ok(slots)
}

#[cfg(test)]
mod test {
	use super::*;

	fn at(s: &str) -> SlotTime { s.parse().unwrap() }

	#[test]
	fn occupied_sums_overlapping_parties() {
		let seated =
			[(1, at("12:00"), 4), (2, at("13:00"), 2), (3, at("19:00"), 6)];
		let window = ServiceWindow::around(at("12:30"), 120);

		assert_eq!(occupied_in(&seated, &window, 120, None), 6);
	}

	#[test]
	fn occupied_ignores_disjoint_windows() {
		let seated = [(1, at("09:00"), 8)];
		let window = ServiceWindow::around(at("15:00"), 120);

		assert_eq!(occupied_in(&seated, &window, 120, None), 0);
	}

	#[test]
	fn occupied_counts_touching_endpoints() {
		// Service window [10:00, 12:00] touches the check window starting at
		// 12:00 exactly
		let seated = [(1, at("10:00"), 5)];
		let window = ServiceWindow { start: at("12:00"), end: at("16:00") };

		assert_eq!(occupied_in(&seated, &window, 120, None), 5);
	}

	#[test]
	fn occupied_excludes_the_reservation_being_modified() {
		let seated = [(1, at("12:00"), 8), (2, at("12:30"), 2)];
		let window = ServiceWindow::around(at("12:00"), 120);

		assert_eq!(occupied_in(&seated, &window, 120, Some(1)), 2);
		assert_eq!(occupied_in(&seated, &window, 120, None), 10);
	}
}
