//! # scenesync Common Library
//!
//! Shared code for the scenesync tools:
//! - Error types
//! - Configuration loading (compiled defaults, TOML, environment)
//! - Tracing subscriber setup
//! - Pretty JSON file storage

pub mod config;
pub mod error;
pub mod json_store;
pub mod logging;

pub use error::{Error, Result};
