//! Identifier types
//!
//! Users, businesses and photos are keyed by opaque strings. User and photo
//! keys are random hex tokens generated here. Business keys come from the
//! seeded dataset. Reviews use a database sequence and collections are
//! numbered per owner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error when parsing an identifier from a path segment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier is too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("identifier contains invalid characters")]
    InvalidCharacters,

    #[error("invalid numeric identifier: {0}")]
    InvalidNumber(String),
}

/// Maximum length of a string key, matching the `VARCHAR(32)` columns
const MAX_KEY_LEN: usize = 32;

fn validate_key(s: &str) -> Result<(), IdParseError> {
    if s.is_empty() {
        return Err(IdParseError::Empty);
    }
    if s.len() > MAX_KEY_LEN {
        return Err(IdParseError::TooLong { max: MAX_KEY_LEN });
    }
    if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(IdParseError::InvalidCharacters);
    }
    Ok(())
}

/// Random lowercase hex token of `bytes` random bytes
fn random_hex(bytes: usize) -> String {
    (0..bytes)
        .map(|_| format!("{:02x}", rand::random::<u8>()))
        .collect()
}

macro_rules! string_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a key that is already known to be valid (e.g. read from storage)
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Parse and validate an untrusted key
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                validate_key(s)?;
                Ok(Self(s.to_string()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

string_key!(
    /// User key: 22 lowercase hex characters for accounts created here
    UserId
);

string_key!(
    /// Business key from the seeded dataset
    BusinessId
);

string_key!(
    /// Photo key, also used as the stored file stem
    PhotoId
);

impl UserId {
    /// Generate a fresh random user key (11 random bytes, hex encoded)
    pub fn generate() -> Self {
        Self(random_hex(11))
    }
}

impl PhotoId {
    /// Generate a fresh random photo key (8 random bytes, hex encoded)
    pub fn generate() -> Self {
        Self(random_hex(8))
    }
}

/// Review identifier assigned by the database sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(i64);

impl ReviewId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| IdParseError::InvalidNumber(s.to_string()))
    }
}

/// Collection number, unique per owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(i32);

impl CollectionId {
    #[inline]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| IdParseError::InvalidNumber(s.to_string()))
    }
}
