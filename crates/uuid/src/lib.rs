//! User identifier utilities.
//!
//! Every user record is keyed by a random (version 4) UUID rendered in the standard hyphenated
//! form. Externally supplied identifiers (for example, the `:userId` path segment) are checked
//! against that textual layout before any lookup happens.
//!
//! ## Canonical identifier form
//! - Length: 36
//! - Layout: `8-4-4-4-12` hexadecimal groups separated by `-`
//! - Hex digits in either case (`0-9`, `a-f`, `A-F`)
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! Notes:
//! - Generated identifiers are always lowercase, the same value you would get from
//!   `Uuid::new_v4().hyphenated().to_string()`.
//! - Beyond the layout, the version nibble must be `1`-`8` and the variant nibble `8`, `9`, `a` or
//!   `b`. The nil (`00000000-0000-0000-0000-000000000000`) and max (all `f`) identifiers are
//!   accepted as special cases.
//! - A parsed [`UserId`] keeps the exact text it was given. Identifiers are compared as strings,
//!   so `550E8400-...` and `550e8400-...` are distinct keys.

mod service;

// Re-export public types
pub use service::{UserId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
