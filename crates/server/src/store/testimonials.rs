//! Testimonial repository.

use chrono::Utc;

use harborview_core::TestimonialId;

use super::{JsonStore, StoreError};
use crate::models::testimonial::{self, NewTestimonial, Testimonial, TestimonialStats};

/// Repository for the `testimonials` collection.
pub struct TestimonialRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> TestimonialRepository<'a> {
    /// Create a new testimonial repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Store a new, already approved testimonial.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read or written.
    pub async fn create(&self, new: NewTestimonial) -> Result<Testimonial, StoreError> {
        let testimonial = Testimonial::from_submission(new, Utc::now());
        let stored = testimonial.clone();
        self.store
            .update(move |db| {
                db.testimonials.insert(0, stored);
                ((), true)
            })
            .await?;
        Ok(testimonial)
    }

    /// Approved testimonials, best rated and newest first, optionally limited.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read.
    pub async fn list_public(&self, top: Option<usize>) -> Result<Vec<Testimonial>, StoreError> {
        self.store
            .read(|db| testimonial::rank_for_display(db.testimonials.clone(), top))
            .await
    }

    /// Every testimonial, approved or not, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read.
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, StoreError> {
        self.store
            .read(|db| {
                let mut testimonials = db.testimonials.clone();
                testimonial::sort_newest_first(&mut testimonials);
                testimonials
            })
            .await
    }

    /// Delete a testimonial. Returns `false` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read or written.
    pub async fn delete(&self, id: &TestimonialId) -> Result<bool, StoreError> {
        self.store
            .update(|db| {
                let before = db.testimonials.len();
                db.testimonials.retain(|t| &t.id != id);
                let removed = db.testimonials.len() != before;
                (removed, removed)
            })
            .await
    }

    /// Public rating summary.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read.
    pub async fn stats(&self) -> Result<TestimonialStats, StoreError> {
        self.store
            .read(|db| TestimonialStats::from_testimonials(&db.testimonials))
            .await
    }
}
