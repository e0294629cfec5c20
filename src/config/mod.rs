//! Dispatch Configuration Module
//!
//! Per-deployment policy loaded from TOML: fixed response-time components,
//! travel speed, the operating region, and data file locations.
//!
//! ## Loading Order
//!
//! 1. `EMS_DISPATCH_CONFIG` environment variable (path to TOML file)
//! 2. `dispatch_config.toml` in the current working directory
//! 3. Built-in defaults (`config::defaults`), only when no file exists
//!
//! A file that exists but fails to parse or validate is an error.
//!
//! The loaded config is consumed once by `DispatchContext::from_config`;
//! there is no process-wide config handle.

mod dispatch_config;
pub mod defaults;
pub mod validation;

pub use dispatch_config::*;
