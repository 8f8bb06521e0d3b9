//! Core engine services

pub mod config;

pub use config::{BackendKind, Config, ConfigError, EngineConfig, RendererConfig, WindowConfig};
