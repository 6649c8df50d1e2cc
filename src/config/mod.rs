//! Configuration management for wavscope.
//!
//! This module handles loading application configuration from TOML files.
//! Configuration is stored in the user's config directory and is created from
//! an embedded template on first run.

pub mod file;

pub use file::{config_path, ViewConfig, WavscopeConfig};
