//! CLI command handlers

pub mod commands;

pub use commands::{import, import_detected, restore_defaults};
