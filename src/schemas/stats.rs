use serde::{Deserialize, Serialize};

/// Admin dashboard counters
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
	pub pending_reservations: i64,
	pub today_reservations:   i64,
	pub total_dishes:         i64,
	pub available_dishes:     i64,
}
