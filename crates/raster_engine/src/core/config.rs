//! Configuration types and file loading
//!
//! Configuration is plain serde data loaded once at startup. TOML is the
//! primary format, with RON accepted for tooling that prefers it.

use crate::render::color::ChannelOrder;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents did not parse as the expected type.
    #[error("parse error: {0}")]
    Parse(String),

    /// Value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// File extension names no supported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Loadable/saveable configuration value.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load a configuration from a `.toml` or `.ron` file.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save a configuration to a `.toml` or `.ron` file.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Which display backend hosts the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Top-level window on the native windowing system.
    #[default]
    Native,
    /// Named pixel target inside a host toolkit.
    Embedded,
    /// Window with a hardware context.
    Accelerated,
}

/// Window surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Surface width in pixels, fixed for the run.
    pub width: usize,
    /// Surface height in pixels, fixed for the run.
    pub height: usize,
    /// Color depth in bits per pixel.
    pub depth: u32,
    /// Display backend selection.
    pub backend: BackendKind,
    /// Target name resolved by the embedded backend at flush time.
    pub embed_target: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "raster engine".to_string(),
            width: 640,
            height: 480,
            depth: 24,
            backend: BackendKind::default(),
            embed_target: "canvas_photo".to_string(),
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Background color the framebuffer clears to.
    pub background: [u8; 3],
    /// Channel placement the display backend expects.
    pub channel_order: ChannelOrder,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background: [0xFF, 0xFF, 0xFF],
            channel_order: ChannelOrder::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stop the main loop after this many frames, if set.
    pub max_frames: Option<u64>,
    /// Default log filter (overridable via `RUST_LOG`), e.g. `"debug"`.
    pub log_level: Option<String>,
    /// Window surface settings.
    pub window: WindowConfig,
    /// Renderer settings.
    pub renderer: RendererConfig,
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err("window dimensions must be positive".to_string());
        }
        if self.window.depth != 24 {
            return Err(format!(
                "unsupported color depth {} (only 24-bit RGB is rasterized)",
                self.window.depth
            ));
        }
        if self.window.backend == BackendKind::Embedded && self.window.embed_target.is_empty() {
            return Err("embedded backend requires a target name".to_string());
        }
        Ok(())
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 640);
        assert_eq!(config.renderer.background, [0xFF, 0xFF, 0xFF]);
        assert_eq!(config.window.backend, BackendKind::Native);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [window]
            width = 320
            height = 200
            backend = "embedded"

            [renderer]
            channel_order = "bgr"
            "#,
        )
        .unwrap();
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 200);
        assert_eq!(config.window.backend, BackendKind::Embedded);
        assert_eq!(config.window.embed_target, "canvas_photo");
        assert_eq!(config.renderer.channel_order, ChannelOrder::Bgr);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let mut config = EngineConfig::default();
        config.window.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unsupported_depth_is_rejected() {
        let mut config = EngineConfig::default();
        config.window.depth = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn embedded_backend_needs_a_target() {
        let mut config = EngineConfig::default();
        config.window.backend = BackendKind::Embedded;
        config.window.embed_target.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trip_preserves_settings() {
        let mut config = EngineConfig::default();
        config.window.title = "demo".to_string();
        config.max_frames = Some(120);
        let text = toml::to_string_pretty(&config).unwrap();
        let back: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.window.title, "demo");
        assert_eq!(back.max_frames, Some(120));
    }
}
