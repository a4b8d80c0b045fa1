//! Internal implementation of the user identifier type.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;
use ::uuid::Variant;

/// Byte offsets of the group separators in the hyphenated layout.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Length of the hyphenated layout (32 hex digits plus 4 separators).
const CANONICAL_LEN: usize = 36;

/// A user identifier in canonical hyphenated form.
///
/// Once constructed, the contained string is guaranteed to match the `8-4-4-4-12` layout and to
/// carry a known version (or be the nil/max identifier).
///
/// # Construction
/// - [`UserId::new`] (or [`UserId::generate`]) allocates a fresh random identifier.
/// - [`UserId::parse`] validates an externally supplied identifier.
///
/// # Errors
/// [`UserId::parse`] returns [`UuidError::InvalidInput`] if the input is not in canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct UserId(String);

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl UserId {
    /// Generates a new random identifier.
    ///
    /// The identifier follows RFC 4122 version 4 and is rendered lowercase. Collisions are
    /// negligible across the lifetime of a process.
    pub fn new() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Alias for [`UserId::new`], reads better at call sites that allocate ids for new records.
    pub fn generate() -> Self {
        Self::new()
    }

    /// Validates and wraps an identifier string.
    ///
    /// The input is stored exactly as given; no case normalisation takes place.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(invalid_input(input))
    }

    /// Returns true if `input` is a well-formed identifier.
    ///
    /// Checks, in order:
    /// - Exactly 36 bytes long, `-` at offsets 8, 13, 18 and 23
    /// - Every other byte is an ASCII hex digit (either case)
    /// - The value is nil or max, or it carries an RFC 4122 variant and a version in `1..=8`
    pub fn is_canonical(input: &str) -> bool {
        has_hyphenated_layout(input)
            && Uuid::try_parse(input).is_ok_and(|uuid| has_known_version(&uuid))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = UuidError;

    /// Equivalent to calling [`UserId::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = UuidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_canonical(&value) {
            return Ok(Self(value));
        }
        Err(invalid_input(&value))
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn has_hyphenated_layout(input: &str) -> bool {
    input.len() == CANONICAL_LEN
        && input.bytes().enumerate().all(|(i, b)| {
            if HYPHEN_POSITIONS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

fn has_known_version(uuid: &Uuid) -> bool {
    if uuid.is_nil() || uuid.as_u128() == u128::MAX {
        return true;
    }
    matches!(uuid.get_version_num(), 1..=8) && uuid.get_variant() == Variant::RFC4122
}

fn invalid_input(input: &str) -> UuidError {
    UuidError::InvalidInput(format!(
        "identifier must be hyphenated 8-4-4-4-12 hex groups with a known version, got: '{}'",
        input
    ))
}
