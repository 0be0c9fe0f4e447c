//! Value objects decoded from Monta API responses
//!
//! Every record is built once from a response body and never mutated.
//! Wire names are camelCase; the Rust fields are snake_case.

pub mod auth;
pub mod charge;
pub mod charge_point;
pub mod page;
pub mod wallet;

// Re-export for convenience
pub use auth::{Credentials, TokenSet};
pub use charge::{Charge, ChargeState};
pub use charge_point::ChargePoint;
pub use page::{Page, PageMeta};
pub use wallet::{Balance, Currency, Wallet, WalletTransaction, WalletTransactionState};
