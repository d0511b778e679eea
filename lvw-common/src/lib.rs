//! # Levelwatch Common Library
//!
//! Shared code for the levelwatch binaries including:
//! - Configuration resolution
//! - Error types
//! - Sheet schema and record parsing
//! - Victor mention (username → id) resolution
//! - Difficulty tier classification

pub mod config;
pub mod error;
pub mod mentions;
pub mod record;
pub mod schema;
pub mod tier;

pub use error::{Error, Result};
