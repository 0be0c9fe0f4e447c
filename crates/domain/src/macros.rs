//! Macro for implementing string conversions on API state enums
//!
//! Monta reports states as lowercase strings and accepts the same strings as
//! list filters. This macro generates `as_str`, `Display`, and `FromStr` from a
//! single variant table.
//!
//! # Example
//!
//! ```rust
//! use monta_domain::impl_state_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ConnectorState {
//!     Available,
//!     Occupied,
//! }
//!
//! impl_state_conversions!(ConnectorState {
//!     Available => "available",
//!     Occupied => "occupied",
//! });
//!
//! assert_eq!(ConnectorState::Occupied.as_str(), "occupied");
//! assert_eq!("AVAILABLE".parse::<ConnectorState>(), Ok(ConnectorState::Available));
//! ```

/// Implements `as_str`, `Display`, and `FromStr` for state enums
///
/// Parsing is case-insensitive; output is always the wire spelling.
#[macro_export]
macro_rules! impl_state_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of this state
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }

            /// Every state, in declaration order
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant,)+];
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
