//! CLI command handlers

pub mod commands;

pub use commands::{demo, dump, inspect, DumpFormat};
