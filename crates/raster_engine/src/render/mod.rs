//! Rendering pipeline: framebuffer, camera, rasterization, and viewports

pub mod camera;
pub mod color;
pub mod framebuffer;
pub mod mesh;
pub mod render_manager;
pub mod viewport;

pub use camera::Camera;
pub use color::{ChannelOrder, Color3};
pub use framebuffer::{FrameBuffer, PixelBlock};
pub use mesh::Mesh;
pub use render_manager::{RenderManager, SceneObject};
pub use viewport::{
    AcceleratedViewport, EmbeddedViewport, EventMask, NativeViewport, SurfaceRegistry, Viewport,
    ViewportError,
};
