//! Charging sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::datetime::lenient;
use crate::utils::serde_helpers::null_as_default;

/// States a charge can be in, as accepted by the `state` list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeState {
    Reserved,
    Starting,
    Charging,
    Stopping,
    Paused,
    Scheduled,
    Stopped,
    Completed,
}

crate::impl_state_conversions!(ChargeState {
    Reserved => "reserved",
    Starting => "starting",
    Charging => "charging",
    Stopping => "stopping",
    Paused => "paused",
    Scheduled => "scheduled",
    Stopped => "stopped",
    Completed => "completed",
});

/// A single charging session
///
/// `state` is kept as the raw string so that states added by the vendor
/// later still decode; use [`Charge::parsed_state`] for the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_point_id: Option<i64>,
    /// Energy delivered so far, in kWh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_kwh: Option<f64>,
    #[serde(default, with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub stopped_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub cable_plugged_in_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub fully_charged_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub timeout_at: Option<DateTime<Utc>>,
}

impl Charge {
    /// The state as a [`ChargeState`], if it is one the client knows
    pub fn parsed_state(&self) -> Option<ChargeState> {
        self.state.parse().ok()
    }

    /// Wall-clock duration between start and stop, when both are known
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(stop)) if stop >= start => Some(stop - start),
            _ => None,
        }
    }
}
