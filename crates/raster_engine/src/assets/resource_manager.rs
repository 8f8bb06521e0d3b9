//! Name-keyed resource lookup
//!
//! The rendering core consumes a narrow contract: given an identifier,
//! return a shared handle to the resource or fail with
//! [`ResourceError::NotFound`]. How assets get into the manager (file
//! formats, loaders, hot reload) is outside this crate; callers register
//! resources they obtained elsewhere.

use crate::render::color::Color3;
use crate::render::mesh::Mesh;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Resource lookup errors.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource registered under the requested name.
    #[error("resource not found: {0:?}")]
    NotFound(String),
}

/// Tracks named meshes and materials for the lifetime of a run.
#[derive(Default)]
pub struct ResourceManager {
    meshes: HashMap<String, Arc<Mesh>>,
    materials: HashMap<String, Color3>,
}

impl ResourceManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh under `name`, replacing any previous entry.
    pub fn insert_mesh(&mut self, name: impl Into<String>, mesh: Mesh) -> Arc<Mesh> {
        let name = name.into();
        let handle = Arc::new(mesh);
        log::debug!("registered mesh {name:?} ({} triangles)", handle.triangle_count());
        self.meshes.insert(name, handle.clone());
        handle
    }

    /// Look up a mesh by name.
    pub fn mesh(&self, name: &str) -> Result<Arc<Mesh>, ResourceError> {
        self.meshes
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    /// Register a material color under `name`, replacing any previous entry.
    pub fn insert_material(&mut self, name: impl Into<String>, color: Color3) {
        self.materials.insert(name.into(), color);
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Result<Color3, ResourceError> {
        self.materials
            .get(name)
            .copied()
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    /// Number of registered meshes.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn test_mesh() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn lookup_returns_a_shared_handle() {
        let mut resources = ResourceManager::new();
        let registered = resources.insert_mesh("tri", test_mesh());
        let found = resources.mesh("tri").unwrap();
        assert!(Arc::ptr_eq(&registered, &found));
        assert_eq!(resources.mesh_count(), 1);
    }

    #[test]
    fn missing_resource_is_a_not_found_error() {
        let resources = ResourceManager::new();
        match resources.mesh("absent") {
            Err(ResourceError::NotFound(name)) => assert_eq!(name, "absent"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn materials_are_looked_up_by_name() {
        let mut resources = ResourceManager::new();
        resources.insert_material("hull", Color3::RED);
        assert_eq!(resources.material("hull").unwrap(), Color3::RED);
        assert!(resources.material("sail").is_err());
    }
}
