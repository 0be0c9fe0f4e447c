//! API constants
//!
//! Centralized location for the Monta endpoint paths and client defaults.

// Base URL and paging
pub const DEFAULT_BASE_URL: &str = "https://public-api.monta.com/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("monta-rs/", env!("CARGO_PKG_VERSION"));

// Refresh tokens this many seconds before they actually expire
pub const DEFAULT_TOKEN_REFRESH_THRESHOLD_SECS: i64 = 300;

// Endpoint paths (relative to the base URL)
pub const PATH_AUTH_TOKEN: &str = "/auth/token";
pub const PATH_AUTH_REFRESH: &str = "/auth/refresh";
pub const PATH_CHARGE_POINTS: &str = "/charge-points";
pub const PATH_CHARGES: &str = "/charges";
pub const PATH_PERSONAL_WALLET: &str = "/wallets/personal";
pub const PATH_WALLET_TRANSACTIONS: &str = "/wallet-transactions";
