//! Software rasterization engine with pluggable display backends.
//!
//! The crate renders flat-shaded triangle meshes into a CPU-side
//! framebuffer and delivers finished frames to one of three viewport
//! backends: a native window, a named surface inside a host toolkit, or
//! a hardware-context window. The [`Engine`] type owns the pipeline and
//! drives the per-frame loop; applications supply an update callback and
//! manipulate the shared [`render::Camera`].
//!
//! ```no_run
//! use raster_engine::core::EngineConfig;
//! use raster_engine::Engine;
//!
//! # fn main() -> Result<(), raster_engine::EngineError> {
//! let mut engine = Engine::new(EngineConfig::default())?;
//! engine.run(|_engine, _delta_time| Ok(()))?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod core;
pub mod foundation;
pub mod render;

mod engine;

pub use engine::{Engine, EngineError};

/// Commonly used types, for glob import by applications.
pub mod prelude {
    pub use crate::assets::ResourceManager;
    pub use crate::core::{BackendKind, Config, EngineConfig};
    pub use crate::engine::{Engine, EngineError};
    pub use crate::foundation::math::{lerp, Vec3};
    pub use crate::render::{Camera, ChannelOrder, Color3, FrameBuffer, Mesh, SceneObject};
}
