//! Field-level validation error collection.
//!
//! Validators push messages keyed by field name, then turn the collection into
//! a `Result` once every field has been checked. The serialized form is
//! `{ "formErrors": [...], "fieldErrors": { "<field>": [...] } }`, which is the
//! shape the site's frontend renders next to each form input.

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation failures, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    /// Errors that do not belong to a single field.
    pub form_errors: Vec<String>,
    /// Errors keyed by field name, in the order they were reported.
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Record an error that applies to the whole form.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Errors recorded for `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    /// Require `value` to be at least `min` characters long.
    pub fn check_min_chars(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(field, format!("Must be at least {min} characters"));
        }
    }

    /// Require `value` to be at most `max` characters long.
    pub fn check_max_chars(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("Must be at most {max} characters"));
        }
    }

    /// Return `value` if no errors were recorded, otherwise the errors.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error has been recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for message in &self.form_errors {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        for (field, messages) in &self.field_errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
