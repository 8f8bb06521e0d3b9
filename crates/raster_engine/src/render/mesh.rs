//! Triangle mesh geometry

use crate::foundation::math::Vec3;

/// Indexed triangle mesh in model space.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Triangles as index triples into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh from vertices and triangle indices.
    ///
    /// Indices referencing missing vertices are a modelling error; they are
    /// debug-asserted here rather than revalidated per frame.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        debug_assert!(
            triangles
                .iter()
                .flatten()
                .all(|&i| (i as usize) < vertices.len()),
            "triangle index out of range"
        );
        Self { vertices, triangles }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_reports_triangle_count() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        );
        assert_eq!(mesh.triangle_count(), 2);
    }
}
