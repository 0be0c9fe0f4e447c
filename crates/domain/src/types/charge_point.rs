//! Charge points (charging stations)

use serde::{Deserialize, Serialize};

use super::charge::Charge;
use crate::utils::serde_helpers::null_as_default;

/// A charging station the account has access to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePoint {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visibility: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_meter_reading_kwh: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub firmware_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cable_plugged_in: bool,
    /// Charges embedded in the charge point payload, if the API sent any
    #[serde(default, deserialize_with = "null_as_default")]
    pub charges: Vec<Charge>,
}
