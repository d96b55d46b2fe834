//! Guest-facing emails for reservation lifecycle events
//!
//! Notifications are fire and forget: a failure is logged and never fails
//! the operation that triggered it.

use crate::mailer::Mailer;
use crate::models::{Profile, Reservation, Restaurant};

/// A lifecycle event the guest is notified about by email
#[derive(Clone, Debug)]
pub enum Notification {
	/// A new or re-submitted booking request entered the approval queue
	Requested { is_modification: bool },
	/// An admin confirmed the booking
	Confirmed,
	/// An admin rejected the booking
	Rejected { reason: String },
}

impl Notification {
	fn subject(&self, restaurant: &Restaurant) -> String {
		match self {
			Self::Requested { is_modification: false } => {
				format!("Reservation request received - {}", restaurant.name)
			},
			Self::Requested { is_modification: true } => {
				format!("Reservation change received - {}", restaurant.name)
			},
			Self::Confirmed => {
				format!("Reservation confirmed - {}", restaurant.name)
			},
			Self::Rejected { .. } => {
				format!("Reservation update - {}", restaurant.name)
			},
		}
	}

	fn body(
		&self,
		profile: &Profile,
		restaurant: &Restaurant,
		reservation: &Reservation,
	) -> String {
		let mut details = format!(
			"Reservation number: {}\nRestaurant: {}\nDate: {}\nTime: \
			 {}\nParty size: {}\n",
			reservation.id,
			restaurant.name,
			reservation.day,
			reservation.start_at,
			reservation.party_size,
		);

		if !reservation.special_requests.is_empty() {
			details.push_str(&format!(
				"Special requests: {}\n",
				reservation.special_requests
			));
		}

		match self {
			Self::Requested { is_modification: false } => format!(
				"Hello {},\n\nWe received your reservation request. You will \
				 hear from us as soon as it has been reviewed.\n\n{details}",
				profile.name,
			),
			Self::Requested { is_modification: true } => format!(
				"Hello {},\n\nWe received your updated reservation. It is \
				 awaiting approval again and you will hear from us as soon \
				 as it has been reviewed.\n\n{details}",
				profile.name,
			),
			Self::Confirmed => format!(
				"Hello {},\n\nYour reservation is confirmed, we look forward \
				 to welcoming you!\n\n{details}",
				profile.name,
			),
			Self::Rejected { reason } => format!(
				"Hello {},\n\nUnfortunately we could not accept your \
				 reservation.\n\nReason: {reason}\n\n{details}",
				profile.name,
			),
		}
	}

	/// Queue this notification for the guest
	///
	/// Failures are logged and swallowed.
	#[instrument(skip_all, fields(reservation_id = reservation.id))]
	pub fn fire(
		&self,
		mailer: &Mailer,
		profile: &Profile,
		restaurant: &Restaurant,
		reservation: &Reservation,
	) {
		let mail = mailer.try_build_message(
			profile,
			&self.subject(restaurant),
			&self.body(profile, restaurant, reservation),
		);

		if let Err(e) = mail.and_then(|m| mailer.try_send(m)) {
			warn!(
				"failed to queue notification for reservation {} -- {e}",
				reservation.id
			);
		}
	}
}
