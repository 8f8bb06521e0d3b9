//! Engine owner object and main loop
//!
//! One `Engine` per process, by construction discipline rather than
//! enforcement machinery: the entry point builds it once and passes it
//! down. Construction acquires the viewport first, then the render
//! manager and resource manager; teardown releases them in reverse.

use crate::assets::{ResourceError, ResourceManager};
use crate::core::config::{BackendKind, EngineConfig};
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameTimer;
use crate::render::camera::Camera;
use crate::render::color::Color3;
use crate::render::render_manager::{RenderManager, SceneObject};
use crate::render::viewport::{
    AcceleratedViewport, EmbeddedViewport, NativeViewport, SurfaceRegistry, Viewport, ViewportError,
};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Viewport construction failed; fatal at startup.
    #[error("viewport error: {0}")]
    Viewport(#[from] ViewportError),

    /// A named resource was missing.
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// The configuration cannot be run with.
    #[error("configuration error: {0}")]
    Config(String),

    /// The update callback reported a failure.
    #[error("application error: {0}")]
    Application(String),
}

/// Owns the camera, render manager, resource manager, and viewport for the
/// lifetime of a run, and drives the frame loop.
pub struct Engine {
    // Declaration order is teardown order: most recently acquired first,
    // the viewport (and its display session) last.
    resources: ResourceManager,
    render_mgr: RenderManager,
    camera: Rc<RefCell<Camera>>,
    timer: FrameTimer,
    config: EngineConfig,
    running: bool,
    viewport: Viewport,
}

impl Engine {
    /// Construct the engine from a validated configuration.
    ///
    /// Backend selection is a configuration-time choice; the embedded
    /// backend gets an empty surface registry here, so hosts embedding
    /// the engine should use [`Engine::with_registry`] instead.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_registry(config, SurfaceRegistry::new())
    }

    /// Construct the engine, resolving embedded targets in `registry`.
    pub fn with_registry(
        config: EngineConfig,
        registry: SurfaceRegistry,
    ) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;
        log::info!(
            "initializing engine ({}x{}, {:?} backend)",
            config.window.width,
            config.window.height,
            config.window.backend
        );

        let (width, height) = (config.window.width, config.window.height);
        let aspect = width as f32 / height as f32;
        let camera = Rc::new(RefCell::new(Camera::perspective(
            Vec3::new(0.0, 3.0, 3.0),
            45.0,
            aspect,
            0.1,
            1000.0,
        )));

        let viewport = match config.window.backend {
            BackendKind::Native => Viewport::Native(NativeViewport::new(
                width,
                height,
                &config.window.title,
                camera.clone(),
            )?),
            BackendKind::Embedded => Viewport::Embedded(EmbeddedViewport::new(
                width,
                height,
                config.window.embed_target.clone(),
                registry,
            )),
            BackendKind::Accelerated => Viewport::Accelerated(AcceleratedViewport::new(
                width,
                height,
                &config.window.title,
                camera.clone(),
            )?),
        };

        let render_mgr = RenderManager::new(
            width,
            height,
            Color3::from(config.renderer.background),
            camera.clone(),
        );
        let resources = ResourceManager::new();

        Ok(Self {
            resources,
            render_mgr,
            camera,
            timer: FrameTimer::new(),
            config,
            running: true,
            viewport,
        })
    }

    /// Run the main loop until the viewport closes, the update callback
    /// calls [`Engine::quit`], or the configured frame cap is reached.
    ///
    /// `update` runs once per frame with the delta time in seconds. Each
    /// iteration then renders one complete frame and delivers it; delivery
    /// problems are diagnosed by the backend and never stop the loop.
    pub fn run<F>(&mut self, mut update: F) -> Result<(), EngineError>
    where
        F: FnMut(&mut Engine, f32) -> Result<(), EngineError>,
    {
        log::info!("starting main loop");
        while self.running {
            self.timer.tick();
            let delta_time = self.timer.delta_time();

            self.viewport.poll_events();
            if self.viewport.should_close() {
                break;
            }

            update(self, delta_time)?;

            self.render_mgr.render_frame();
            self.viewport.frame_begin();
            let block = self
                .render_mgr
                .framebuffer()
                .export(self.config.renderer.channel_order);
            self.viewport.flush(&block);

            if let Some(cap) = self.config.max_frames {
                if self.timer.frame_count() >= cap {
                    log::info!("frame cap of {cap} reached");
                    break;
                }
            }
        }
        log::info!(
            "engine shutdown after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Look up a mesh by name and place it in the scene.
    pub fn add_scene_object(
        &mut self,
        mesh_name: &str,
        position: Vec3,
        color: Color3,
    ) -> Result<(), EngineError> {
        let mesh = self.resources.mesh(mesh_name)?;
        self.render_mgr.add_object(SceneObject { mesh, position, color });
        Ok(())
    }

    /// Request shutdown; the loop stops at the next iteration boundary.
    /// A frame already begun runs to completion.
    pub fn quit(&mut self) {
        log::info!("engine shutdown requested");
        self.running = false;
    }

    /// Shared handle to the active camera.
    pub fn camera(&self) -> Rc<RefCell<Camera>> {
        self.camera.clone()
    }

    /// The resource manager.
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Mutable access to the resource manager.
    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    /// The render manager.
    pub fn render_manager(&self) -> &RenderManager {
        &self.render_mgr
    }

    /// Mutable access to the render manager.
    pub fn render_manager_mut(&mut self) -> &mut RenderManager {
        &mut self.render_mgr
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::render::mesh::Mesh;

    /// Headless engine against an embedded surface target.
    fn embedded_engine(max_frames: Option<u64>) -> (Engine, SurfaceRegistry) {
        let registry = SurfaceRegistry::new();
        registry.register("canvas_photo", 32, 32);
        let mut config = EngineConfig::default();
        config.window.backend = BackendKind::Embedded;
        config.window.width = 32;
        config.window.height = 32;
        config.max_frames = max_frames;
        let engine = Engine::with_registry(config, registry.clone()).unwrap();
        (engine, registry)
    }

    fn triangle_mesh() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn invalid_config_aborts_construction() {
        let mut config = EngineConfig::default();
        config.window.width = 0;
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }

    #[test]
    fn loop_stops_at_the_frame_cap() {
        let (mut engine, _registry) = embedded_engine(Some(3));
        engine.run(|_, _| Ok(())).unwrap();
        assert_eq!(engine.frame_count(), 3);
    }

    #[test]
    fn quit_from_the_update_callback_stops_the_loop() {
        let (mut engine, _registry) = embedded_engine(None);
        engine
            .run(|engine, _| {
                if engine.frame_count() >= 2 {
                    engine.quit();
                }
                Ok(())
            })
            .unwrap();
        assert!(engine.frame_count() <= 3);
    }

    #[test]
    fn frames_reach_the_embedded_target() {
        let (mut engine, registry) = embedded_engine(Some(2));
        engine.resources_mut().insert_mesh("tri", triangle_mesh());
        engine
            .add_scene_object("tri", Vec3::zeros(), Color3::RED)
            .unwrap();
        engine.run(|_, _| Ok(())).unwrap();

        let surface = registry.find("canvas_photo").unwrap();
        let bytes = surface.snapshot();
        // Some pixel of the delivered frame carries the triangle's red.
        assert!(bytes.chunks(3).any(|px| px == [0xFF, 0, 0]));
    }

    #[test]
    fn missing_mesh_surfaces_as_an_engine_error() {
        let (mut engine, _registry) = embedded_engine(None);
        let err = engine
            .add_scene_object("ghost", Vec3::zeros(), Color3::RED)
            .unwrap_err();
        assert!(matches!(err, EngineError::Resource(ResourceError::NotFound(_))));
    }

    #[test]
    fn update_callback_error_propagates() {
        let (mut engine, _registry) = embedded_engine(None);
        let result = engine.run(|_, _| Err(EngineError::Application("boom".into())));
        assert!(matches!(result, Err(EngineError::Application(_))));
    }

    #[test]
    fn engine_config_loads_from_toml_file() {
        let dir = std::env::temp_dir().join("raster_engine_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.toml");
        std::fs::write(&path, "[window]\nwidth = 16\nheight = 16\nbackend = \"embedded\"\n")
            .unwrap();
        let config = EngineConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.window.width, 16);
        assert_eq!(config.window.backend, BackendKind::Embedded);
    }
}
