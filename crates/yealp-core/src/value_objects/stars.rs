//! Star rating: 0 to 5 in half-star steps

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error when a star value is outside the allowed grid
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("stars must be between 0 and 5 in steps of 0.5 (got {0})")]
pub struct StarRatingError(pub f64);

/// A star rating, stored as a count of half stars (0..=10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StarRating(u8);

impl StarRating {
    pub const MAX_HALVES: u8 = 10;

    /// Build from a count of half stars
    pub fn from_halves(halves: u8) -> Result<Self, StarRatingError> {
        if halves > Self::MAX_HALVES {
            return Err(StarRatingError(f64::from(halves) / 2.0));
        }
        Ok(Self(halves))
    }

    /// Build from a decimal value such as `3.5`
    pub fn from_f64(value: f64) -> Result<Self, StarRatingError> {
        let doubled = value * 2.0;
        if !value.is_finite() || doubled.fract() != 0.0 || !(0.0..=10.0).contains(&doubled) {
            return Err(StarRatingError(value));
        }
        Ok(Self(doubled as u8))
    }

    /// Snap a stored value onto the half-star grid, clamping to 0..=5
    pub fn nearest(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0);
        }
        Self((value * 2.0).round().clamp(0.0, 10.0) as u8)
    }

    #[inline]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    #[inline]
    pub const fn halves(self) -> u8 {
        self.0
    }

    /// Every selectable rating, lowest first
    pub fn choices() -> impl Iterator<Item = Self> {
        (0..=Self::MAX_HALVES).map(Self)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

impl Serialize for StarRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for StarRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).map_err(serde::de::Error::custom)
    }
}
