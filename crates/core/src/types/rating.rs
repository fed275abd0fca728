//! Guest star rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is not a whole number.
    #[error("rating must be a whole number")]
    NotInteger,
    /// The value is below one star.
    #[error("rating must be at least {min}")]
    TooLow {
        /// Minimum allowed rating.
        min: u8,
    },
    /// The value is above five stars.
    #[error("rating must be at most {max}")]
    TooHigh {
        /// Maximum allowed rating.
        max: u8,
    },
}

/// A 1-5 star rating attached to a testimonial.
///
/// Stored as a bare integer in JSON. Deserialization rejects out-of-range
/// values, so a hand-edited data file with `"rating": 9` fails to load rather
/// than leaking an invalid rating into listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: u8 = 1;
    /// Highest allowed rating.
    pub const MAX: u8 = 5;

    /// Create a rating from a whole number of stars.
    ///
    /// # Errors
    ///
    /// Returns an error if `stars` is outside `1..=5`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(stars: i64) -> Result<Self, RatingError> {
        if stars < i64::from(Self::MIN) {
            return Err(RatingError::TooLow { min: Self::MIN });
        }
        if stars > i64::from(Self::MAX) {
            return Err(RatingError::TooHigh { max: Self::MAX });
        }
        // Range-checked above.
        Ok(Self(stars as u8))
    }

    /// Create a rating from a JSON number, accepting integral floats like `5.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number has a fractional part or is out of range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_number(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(RatingError::NotInteger);
        }
        if value < f64::from(Self::MIN) {
            return Err(RatingError::TooLow { min: Self::MIN });
        }
        if value > f64::from(Self::MAX) {
            return Err(RatingError::TooHigh { max: Self::MAX });
        }
        // Whole number within 1..=5.
        Ok(Self(value as u8))
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Whether this is a top rating.
    #[must_use]
    pub const fn is_five_star(self) -> bool {
        self.0 == Self::MAX
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
