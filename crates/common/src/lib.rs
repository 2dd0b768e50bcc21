//! Shared configuration for the pyramid viewer.
//!
//! # Invariants
//! - A loaded configuration has passed `ViewerConfig::validate`.
//! - Every section falls back to the default pyramid scene when omitted.

pub mod config;

pub use config::{
    CameraConfig, ConfigError, ControllerConfig, RenderConfig, ViewerConfig, WindowConfig,
};
