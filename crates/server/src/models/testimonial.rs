//! Guest testimonial domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use harborview_core::{Rating, RatingError, TestimonialId, ValidationErrors};

use super::form::{json_type_name, required_text};

const NAME_MIN: usize = 2;
const MESSAGE_MIN: usize = 5;

/// A guest review as persisted in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub rating: Rating,
    pub message: String,
    /// Missing in older records; those count as approved.
    #[serde(default = "approved_by_default")]
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Fields this server does not manage, kept as found.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const fn approved_by_default() -> bool {
    true
}

impl Testimonial {
    /// Build a testimonial from a validated submission.
    ///
    /// Submissions are published immediately: `is_approved` is set and
    /// `approved_at` equals `created_at`.
    #[must_use]
    pub fn from_submission(new: NewTestimonial, now: DateTime<Utc>) -> Self {
        Self {
            id: TestimonialId::generate(),
            name: new.name,
            rating: new.rating,
            message: new.message,
            is_approved: true,
            created_at: now,
            approved_at: Some(now),
            extra: serde_json::Map::new(),
        }
    }
}

/// A validated testimonial submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestimonial {
    pub name: String,
    pub rating: Rating,
    pub message: String,
}

/// Raw testimonial body.
///
/// Fields are kept as raw JSON values so that a string or fractional rating
/// is reported as a field error rather than a body parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct TestimonialForm {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl TestimonialForm {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns every failed field check at once.
    pub fn validate(self) -> Result<NewTestimonial, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", self.name, NAME_MIN);
        let message = required_text(&mut errors, "message", self.message, MESSAGE_MIN);

        let rating = match self.rating {
            None | Some(serde_json::Value::Null) => {
                errors.add("rating", "Required");
                None
            }
            Some(serde_json::Value::Number(n)) => match n.as_f64().map(Rating::from_number) {
                Some(Ok(rating)) => Some(rating),
                Some(Err(e)) => {
                    errors.add("rating", rating_message(&e));
                    None
                }
                None => {
                    errors.add("rating", "Expected number");
                    None
                }
            },
            Some(other) => {
                errors.add(
                    "rating",
                    format!("Expected number, received {}", json_type_name(&other)),
                );
                None
            }
        };

        match rating {
            Some(rating) => errors.finish(NewTestimonial {
                name,
                rating,
                message,
            }),
            None => Err(errors),
        }
    }
}

fn rating_message(err: &RatingError) -> String {
    match err {
        RatingError::NotInteger => "Expected integer, received float".to_string(),
        RatingError::TooLow { min } => format!("Number must be greater than or equal to {min}"),
        RatingError::TooHigh { max } => format!("Number must be less than or equal to {max}"),
    }
}

/// Public summary of guest reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialStats {
    pub total: usize,
    /// Mean rating rounded to one decimal; `0` when there are no reviews.
    pub average_rating: f64,
    pub five_star: usize,
}

impl TestimonialStats {
    /// Summarize the approved testimonials in `testimonials`.
    #[must_use]
    pub fn from_testimonials(testimonials: &[Testimonial]) -> Self {
        let visible: Vec<&Testimonial> = testimonials
            .iter()
            .filter(|t| t.is_approved)
            .collect();
        let total = visible.len();
        if total == 0 {
            return Self::default();
        }

        let sum: u32 = visible.iter().map(|t| u32::from(t.rating.stars())).sum();
        #[allow(clippy::cast_precision_loss)] // review counts stay far below f64 precision
        let average = f64::from(sum) / total as f64;

        Self {
            total,
            average_rating: (average * 10.0).round() / 10.0,
            five_star: visible.iter().filter(|t| t.rating.is_five_star()).count(),
        }
    }
}

/// Approved testimonials ordered for display: highest rating first, then
/// newest first, optionally truncated to `top` entries.
#[must_use]
pub fn rank_for_display(testimonials: Vec<Testimonial>, top: Option<usize>) -> Vec<Testimonial> {
    let mut ranked: Vec<Testimonial> = testimonials
        .into_iter()
        .filter(|t| t.is_approved)
        .collect();
    ranked.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    if let Some(top) = top {
        ranked.truncate(top);
    }
    ranked
}

/// Sort newest first by `created_at`.
pub fn sort_newest_first(testimonials: &mut [Testimonial]) {
    testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
