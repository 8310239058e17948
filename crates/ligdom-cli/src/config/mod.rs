//! Scan configuration: a TOML file merged with command-line overrides and
//! built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::{AppConfig, ReportPaths};
