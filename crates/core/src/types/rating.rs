//! Product rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, Copy)]
pub enum RatingError {
    /// The value is not a finite number.
    #[error("rating must be a finite number")]
    NotFinite,
    /// The value is outside the 0.0-5.0 scale.
    #[error("rating must be between {min} and {max}")]
    OutOfRange {
        /// Minimum of the scale.
        min: f64,
        /// Maximum of the scale.
        max: f64,
    },
}

/// A product rating on the fixed 0.0-5.0 scale.
///
/// ## Examples
///
/// ```
/// use clementine_core::Rating;
///
/// let rating = Rating::new(4.5).unwrap();
/// assert!(rating.value() >= 4.5);
///
/// assert!(Rating::new(5.1).is_err());
/// assert!(Rating::new(-0.5).is_err());
/// assert!(Rating::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    /// Minimum of the rating scale.
    pub const MIN: f64 = 0.0;
    /// Maximum of the rating scale.
    pub const MAX: f64 = 5.0;

    /// Create a `Rating` from a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or falls outside the
    /// 0.0-5.0 scale.
    pub fn new(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying rating value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(4.5).is_ok());
        assert!(Rating::new(5.0).is_ok());
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(matches!(
            Rating::new(5.1),
            Err(RatingError::OutOfRange { .. })
        ));
        assert!(matches!(
            Rating::new(-0.1),
            Err(RatingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_new_not_finite() {
        assert!(matches!(Rating::new(f64::NAN), Err(RatingError::NotFinite)));
        assert!(matches!(
            Rating::new(f64::INFINITY),
            Err(RatingError::NotFinite)
        ));
    }

    #[test]
    fn test_ordering() {
        let low = Rating::new(3.0).unwrap();
        let high = Rating::new(4.8).unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_serde_transparent() {
        let rating = Rating::new(4.5).unwrap();
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "4.5");

        let parsed: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rating);
    }
}
