//! HTTP service for a persisted collection of priced items.
//!
//! Requests are validated in [`services::validation`] before anything reaches
//! an [`db::ItemStore`]; responses are always shaped from persisted records.

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::create_app;
