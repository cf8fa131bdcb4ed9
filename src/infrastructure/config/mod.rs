//! Layered settings for the assessment CLI.
//!
//! Defaults, then `.compass/config.yaml`, then `.compass/local.yaml`, then
//! `COMPASS_*` variables (`__` separates nesting, e.g.
//! `COMPASS_GUIDANCE__FOCUS_THRESHOLD=6`). Values are checked after merging.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
