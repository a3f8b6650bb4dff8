//! Customer testimonials and their star rating.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TestimonialId;

/// Errors that can occur when building a [`Rating`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("rating must be between 1 and 5 (got {0})")]
    OutOfRange(i64),
}

/// A star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a rating, rejecting values outside 1..=5.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] for any other value.
    pub fn new(stars: i64) -> Result<Self, RatingError> {
        u8::try_from(stars)
            .ok()
            .filter(|s| (Self::MIN..=Self::MAX).contains(s))
            .map(Self)
            .ok_or(RatingError::OutOfRange(stars))
    }

    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    /// The submission form preselects five stars.
    fn default() -> Self {
        Self(Self::MAX)
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

/// A published testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub country: String,
    pub comment: String,
    pub rating: Rating,
}

/// A testimonial as submitted, before it is assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub name: String,
    pub country: String,
    pub comment: String,
    #[serde(default)]
    pub rating: Rating,
}

impl NewTestimonial {
    /// Attach an id, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: TestimonialId) -> Testimonial {
        Testimonial {
            id,
            name: self.name,
            country: self.country,
            comment: self.comment,
            rating: self.rating,
        }
    }
}
