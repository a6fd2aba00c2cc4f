//! Output formatting for command results.
//!
//! This module handles rendering results for the terminal:
//! - [`json`] - pretty printed JSON
//! - [`terminal`] - quoted fields with optional colors

mod json;
mod terminal;

pub use json::to_json;
pub use terminal::{format_field, format_fields};
