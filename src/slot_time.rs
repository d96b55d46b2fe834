//! Minute-granularity time-of-day values and service window arithmetic

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Time;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day at minute granularity
///
/// All booking arithmetic runs on this type so the wrap policy is fixed in
/// one place: [`add_minutes`](Self::add_minutes) wraps past midnight,
/// [`sub_minutes`](Self::sub_minutes) saturates at `00:00`.
#[derive(
	AsExpression,
	Clone,
	Copy,
	Debug,
	Eq,
	FromSqlRow,
	Hash,
	Ord,
	PartialEq,
	PartialOrd,
)]
#[diesel(sql_type = Time)]
pub struct SlotTime(u16);

impl SlotTime {
	pub const MIDNIGHT: Self = Self(0);

	/// Create a [`SlotTime`] from an hour and minute pair
	#[must_use]
	pub fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
		if hours < 24 && minutes < 60 {
			Some(Self(hours * 60 + minutes))
		} else {
			None
		}
	}

	/// Minutes since midnight, always less than [`MINUTES_PER_DAY`]
	#[must_use]
	pub fn minute_of_day(self) -> u16 { self.0 }

	/// Add minutes, wrapping past midnight
	#[allow(clippy::cast_possible_truncation)]
	#[must_use]
	pub fn add_minutes(self, minutes: u32) -> Self {
		Self(((u32::from(self.0) + minutes) % u32::from(MINUTES_PER_DAY)) as u16)
	}

	/// Subtract minutes, saturating at `00:00`
	///
	/// Subtracting past midnight does NOT wrap into the previous day.
	#[allow(clippy::cast_possible_truncation)]
	#[must_use]
	pub fn sub_minutes(self, minutes: u32) -> Self {
		Self(u32::from(self.0).saturating_sub(minutes) as u16)
	}

	/// Candidate booking slots between `open` and `close`
	///
	/// Yields times starting at `open`, stepping by `interval` minutes, and
	/// stopping strictly before one hour ahead of `close`. The one hour
	/// margin is fixed and independent of any service duration.
	///
	/// # Panics
	/// Panics if `interval` is zero
	pub fn slots(
		open: Self,
		close: Self,
		interval: u16,
	) -> impl Iterator<Item = Self> {
		let last = close.0.saturating_sub(60);

		(open.0..last).step_by(usize::from(interval)).map(Self)
	}
}

impl fmt::Display for SlotTime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
	}
}

impl FromStr for SlotTime {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || {
			Error::ValidationError(format!(
				"'{s}' is not a valid HH:MM time of day"
			))
		};

		let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;

		let hours = hours.parse::<u16>().map_err(|_| invalid())?;
		let minutes = minutes.parse::<u16>().map_err(|_| invalid())?;

		Self::from_hm(hours, minutes).ok_or_else(invalid)
	}
}

impl From<NaiveTime> for SlotTime {
	/// Truncates seconds and below
	#[allow(clippy::cast_possible_truncation)]
	fn from(time: NaiveTime) -> Self {
		Self((time.hour() * 60 + time.minute()) as u16)
	}
}

impl From<SlotTime> for NaiveTime {
	fn from(time: SlotTime) -> Self {
		// Unwrap is safe as a SlotTime is always a valid minute of day
		NaiveTime::from_hms_opt(
			u32::from(time.0 / 60),
			u32::from(time.0 % 60),
			0,
		)
		.unwrap()
	}
}

impl FromSql<Time, Pg> for SlotTime {
	fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
		let time = <NaiveTime as FromSql<Time, Pg>>::from_sql(bytes)?;

		Ok(Self::from(time))
	}
}

impl ToSql<Time, Pg> for SlotTime {
	fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
		// Postgres wire format for TIME is microseconds since midnight
		let micros = i64::from(self.0) * 60_000_000;

		out.write_all(&micros.to_be_bytes())?;

		Ok(IsNull::No)
	}
}

impl Serialize for SlotTime {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// A visitor for zero-padded `HH:MM` time-of-day strings
struct SlotTimeVisitor;

impl Visitor<'_> for SlotTimeVisitor {
	type Value = SlotTime;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "a 24 hour HH:MM time of day")
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: serde::de::Error,
	{
		v.parse().map_err(|_| {
			E::custom(format_args!("'{v}' is not a valid HH:MM time of day"))
		})
	}
}

impl<'de> Deserialize<'de> for SlotTime {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserializer.deserialize_str(SlotTimeVisitor)
	}
}

/// The closed time interval during which a party occupies seats
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServiceWindow {
	pub start: SlotTime,
	pub end:   SlotTime,
}

impl ServiceWindow {
	/// The window a party starting at `start` stays seated for
	#[must_use]
	pub fn of_service(start: SlotTime, service_minutes: u32) -> Self {
		Self { start, end: start.add_minutes(service_minutes) }
	}

	/// The window around `at` that can hold parties still seated when a new
	/// party arrives, or seated until after it leaves
	#[must_use]
	pub fn around(at: SlotTime, service_minutes: u32) -> Self {
		Self {
			start: at.sub_minutes(service_minutes),
			end:   at.add_minutes(service_minutes),
		}
	}

	/// Closed-interval overlap, touching endpoints count
	#[must_use]
	pub fn overlaps(&self, other: &Self) -> bool {
		self.start <= other.end && self.end >= other.start
	}
}
