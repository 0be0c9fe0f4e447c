//! Optional filters for the list endpoints

use chrono::{DateTime, SecondsFormat, Utc};
use monta_domain::{ChargeState, MontaError, Result, WalletTransactionState};

/// Created-at window shared by both filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DateWindow {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl DateWindow {
    fn validate(&self) -> Result<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(MontaError::InvalidInput(format!(
                "fromDate {} is after toDate {}",
                from.to_rfc3339(),
                to.to_rfc3339()
            ))),
            _ => Ok(()),
        }
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        if let Some(from) = self.from {
            query.push(("fromDate", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = self.to {
            query.push(("toDate", to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
    }
}

/// Filter for `GET /charges`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChargeFilter {
    state: Option<ChargeState>,
    window: DateWindow,
}

impl ChargeFilter {
    /// A filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Only charges in `state`
    pub fn state(mut self, state: ChargeState) -> Self {
        self.state = Some(state);
        self
    }

    /// Created at or after `from`
    pub fn from_date(mut self, from: DateTime<Utc>) -> Self {
        self.window.from = Some(from);
        self
    }

    /// Created at or before `to`
    pub fn to_date(mut self, to: DateTime<Utc>) -> Self {
        self.window.to = Some(to);
        self
    }

    /// Query parameters for this filter
    ///
    /// # Errors
    /// Returns `MontaError::InvalidInput` if `from` is after `to`.
    pub(crate) fn to_query(&self) -> Result<Vec<(&'static str, String)>> {
        self.window.validate()?;
        let mut query = Vec::new();
        if let Some(state) = self.state {
            query.push(("state", state.as_str().to_string()));
        }
        self.window.push_query(&mut query);
        Ok(query)
    }
}

/// Filter for `GET /wallet-transactions`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    state: Option<WalletTransactionState>,
    window: DateWindow,
}

impl TransactionFilter {
    /// A filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Only transactions in `state`
    pub fn state(mut self, state: WalletTransactionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Created at or after `from`
    pub fn from_date(mut self, from: DateTime<Utc>) -> Self {
        self.window.from = Some(from);
        self
    }

    /// Created at or before `to`
    pub fn to_date(mut self, to: DateTime<Utc>) -> Self {
        self.window.to = Some(to);
        self
    }

    /// Query parameters for this filter
    ///
    /// # Errors
    /// Returns `MontaError::InvalidInput` if `from` is after `to`.
    pub(crate) fn to_query(&self) -> Result<Vec<(&'static str, String)>> {
        self.window.validate()?;
        let mut query = Vec::new();
        if let Some(state) = self.state {
            query.push(("state", state.as_str().to_string()));
        }
        self.window.push_query(&mut query);
        Ok(query)
    }
}
