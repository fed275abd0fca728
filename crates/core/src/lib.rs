//! Harborview Core - Shared types library.
//!
//! This crate provides common types used across all Harborview components:
//! - `server` - JSON API for contact messages and guest testimonials
//! - `cli` - Command-line tools for managing the flat-file store
//!
//! # Architecture
//!
//! The core crate contains only types and validation rules - no I/O, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, ratings, and statuses
//! - [`validation`] - Field-level validation error collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::ValidationErrors;
