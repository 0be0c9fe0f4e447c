//! Personal wallet and its transaction ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::datetime::lenient;
use crate::utils::serde_helpers::{empty_object_as_none, null_as_default};

/// Transaction states accepted by the `state` list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletTransactionState {
    Complete,
    Pending,
    Failed,
    Reserved,
}

crate::impl_state_conversions!(WalletTransactionState {
    Complete => "complete",
    Pending => "pending",
    Failed => "failed",
    Reserved => "reserved",
});

/// Currency descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO code, e.g. "DKK"
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "default_decimals", deserialize_with = "decimals_or_default")]
    pub decimals: u32,
}

fn default_decimals() -> u32 {
    2
}

fn decimals_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_decimals))
}

/// Wallet balance snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credit: f64,
}

/// The user's personal wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_type: String,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub balance: Option<Balance>,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub currency: Option<Currency>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl Wallet {
    /// Balance amount rendered with the currency's decimals, e.g. "125.50 DKK"
    pub fn formatted_balance(&self) -> Option<String> {
        let balance = self.balance.as_ref()?;
        Some(match &self.currency {
            Some(currency) => format!(
                "{:.*} {}",
                currency.decimals as usize, balance.amount, currency.identifier
            ),
            None => format!("{:.2}", balance.amount),
        })
    }
}

/// One ledger entry of the personal wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_amount: f64,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub from_currency: Option<Currency>,
    #[serde(default)]
    pub from_wallet_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_amount: f64,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub to_currency: Option<Currency>,
    #[serde(default)]
    pub to_wallet_id: Option<i64>,
    #[serde(default)]
    pub charge_id: Option<i64>,
    #[serde(default = "default_exchange_rate", deserialize_with = "exchange_rate_or_default")]
    pub exchange_rate: f64,
    #[serde(default, with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_exchange_rate() -> f64 {
    1.0
}

fn exchange_rate_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_exchange_rate))
}

impl WalletTransaction {
    /// The state as a [`WalletTransactionState`], if it is one the client knows
    pub fn parsed_state(&self) -> Option<WalletTransactionState> {
        self.state.parse().ok()
    }
}
