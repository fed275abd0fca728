//! Harborview server library.
//!
//! This crate provides the hotel site's JSON API as a library, allowing it to
//! be tested end to end and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::router;
