//! Mesh validation utilities.
//!
//! `MeshValidator` checks generated wall geometry: buffer strides, index
//! range, unit normals, bounds and vertex colors.

use crate::viewport::mesh::{MeshData, MESH_STRIDE};
use crate::viewport::picking::Aabb;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / MESH_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    /// Vertex buffer length is a multiple of the stride.
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % MESH_STRIDE == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// All vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh.vertices.chunks_exact(MESH_STRIDE).all(|v| {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            (len - 1.0).abs() <= epsilon
        })
    }

    /// Every vertex carries `color` (within epsilon).
    pub fn has_uniform_color(&self, color: [f32; 3], epsilon: f32) -> bool {
        self.mesh.vertices.chunks_exact(MESH_STRIDE).all(|v| {
            (v[6] - color[0]).abs() <= epsilon
                && (v[7] - color[1]).abs() <= epsilon
                && (v[8] - color[2]).abs() <= epsilon
        })
    }

    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_mesh(self.mesh)
    }

    /// Width, height and depth of the bounding box; zero for an empty mesh.
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().map(|b| b.size().to_array()).unwrap_or([0.0; 3])
    }

    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        dims.iter()
            .zip(expected.iter())
            .all(|(d, e)| (d - e).abs() < tolerance)
    }

    /// No vertex below the ground plane.
    pub fn rests_on_ground(&self, epsilon: f32) -> bool {
        self.aabb().map_or(true, |b| b.min.y.abs() <= epsilon)
    }

    /// Run all checks. An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of {MESH_STRIDE}",
                self.mesh.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={max_idx}): {out_of_range:?}"
            ));
        }

        if !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        if !self.rests_on_ground(1e-4) {
            errors.push("Mesh does not rest on the ground plane".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh::cuboid;
    use glam::Vec3;

    #[test]
    fn test_column_is_valid() {
        let mesh = cuboid(0.1, 2.0, 0.1, [0.5; 3]).translated(Vec3::new(0.0, 1.0, 0.0));
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
        assert!(v.assert_dimensions_approx([0.1, 2.0, 0.1], 1e-4));
        assert!(v.has_uniform_color([0.5; 3], 1e-6));
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = MeshData::default();
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert_eq!(v.dimensions(), [0.0; 3]);
    }

    #[test]
    fn test_detects_bad_indices() {
        let mut mesh = cuboid(1.0, 1.0, 1.0, [1.0; 3]).translated(Vec3::new(0.0, 0.5, 0.0));
        mesh.indices.push(999);
        mesh.indices.push(0);
        mesh.indices.push(1);
        let v = MeshValidator::new(&mesh);
        assert!(!v.are_indices_in_range());
        assert_eq!(v.validate_all().len(), 1);
    }

    #[test]
    fn test_detects_floating_mesh() {
        let mesh = cuboid(1.0, 1.0, 1.0, [1.0; 3]).translated(Vec3::new(0.0, 5.0, 0.0));
        assert!(!MeshValidator::new(&mesh).rests_on_ground(1e-4));
    }
}
