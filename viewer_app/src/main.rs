//! Demo viewer: an orbiting camera over a flat-shaded cube.
//!
//! Usage: `viewer_app [config.toml]`. With no argument the default
//! configuration opens a 640x480 native window.

use raster_engine::foundation::logging;
use raster_engine::prelude::*;

/// Unit cube centered on the origin, 12 triangles.
fn cube_mesh() -> Mesh {
    let vertices = vec![
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    let triangles = vec![
        // back
        [0, 1, 2],
        [0, 2, 3],
        // front
        [4, 6, 5],
        [4, 7, 6],
        // left
        [0, 3, 7],
        [0, 7, 4],
        // right
        [1, 5, 6],
        [1, 6, 2],
        // bottom
        [0, 4, 5],
        [0, 5, 1],
        // top
        [3, 2, 6],
        [3, 6, 7],
    ];
    Mesh::new(vertices, triangles)
}

fn main() -> Result<(), EngineError> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)
            .map_err(|e| EngineError::Config(e.to_string()))?,
        None => EngineConfig::default(),
    };
    logging::init_with_filter(config.log_level.as_deref().unwrap_or("info"));

    let mut engine = Engine::new(config)?;
    engine.resources_mut().insert_mesh("cube", cube_mesh());
    engine.add_scene_object("cube", Vec3::zeros(), Color3::new(0xB0, 0x30, 0x30))?;
    log::info!("scene ready: orbiting camera around a unit cube");

    let mut angle = 0.0_f32;
    engine.run(move |engine, delta_time| {
        angle += delta_time * 0.5;
        let camera = engine.camera();
        let mut camera = camera.borrow_mut();
        let radius = 4.0;
        camera.set_position(Vec3::new(
            radius * angle.cos(),
            2.0,
            radius * angle.sin(),
        ));
        camera.look_at(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        Ok(())
    })
}
