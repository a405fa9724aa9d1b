use glam::Vec3;

use crate::build::BuildError;

/// Floats per interleaved mesh vertex
pub const MESH_STRIDE: usize = 9;
/// Floats per interleaved line vertex
pub const LINE_STRIDE: usize = 7;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / MESH_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for v in self.vertices.chunks_exact_mut(MESH_STRIDE) {
            v[0] += offset.x;
            v[1] += offset.y;
            v[2] += offset.z;
        }
    }

    /// Translated copy
    pub fn translated(&self, offset: Vec3) -> Self {
        let mut out = self.clone();
        out.translate(offset);
        out
    }

    /// Merge several meshes into one indexed buffer (one draw call).
    ///
    /// Fails when the combined vertex count no longer fits a `u32` index.
    pub fn merge(parts: &[MeshData]) -> Result<MeshData, BuildError> {
        let total_vertices: usize = parts.iter().map(MeshData::vertex_count).sum();
        if total_vertices > u32::MAX as usize {
            return Err(BuildError::IndexOverflow {
                vertices: total_vertices,
            });
        }

        let total_indices: usize = parts.iter().map(|p| p.indices.len()).sum();
        let mut vertices = Vec::with_capacity(total_vertices * MESH_STRIDE);
        let mut indices = Vec::with_capacity(total_indices);

        for part in parts {
            let base = (vertices.len() / MESH_STRIDE) as u32;
            vertices.extend_from_slice(&part.vertices);
            indices.extend(part.indices.iter().map(|i| base + i));
        }

        Ok(MeshData { vertices, indices })
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Debug, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / LINE_STRIDE
    }
}

// ── Primitive generation ─────────────────────────────────────

/// Axis-aligned box centered at the origin
pub fn cuboid(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * MESH_STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / MESH_STRIDE) as u32;
        for v in quad {
            push_vert(&mut vertices, *v, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

// ── Grid ─────────────────────────────────────────────────────

/// Ground grid on the y = 0 plane, `range` cells in each direction from the origin
pub fn grid(range: i32, cell_size: f32, color: [f32; 4]) -> LineMeshData {
    let mut vertices = Vec::new();
    let extent = range as f32 * cell_size;

    for i in -range..=range {
        let f = i as f32 * cell_size;
        // Line along Z
        push_line_vert(&mut vertices, Vec3::new(f, 0.0, -extent), color);
        push_line_vert(&mut vertices, Vec3::new(f, 0.0, extent), color);
        // Line along X
        push_line_vert(&mut vertices, Vec3::new(-extent, 0.0, f), color);
        push_line_vert(&mut vertices, Vec3::new(extent, 0.0, f), color);
    }

    LineMeshData { vertices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, p: Vec3, c: [f32; 4]) {
    v.extend_from_slice(&[p.x, p.y, p.z, c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let m = cuboid(1.0, 2.0, 3.0, [1.0; 3]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let a = cuboid(1.0, 1.0, 1.0, [1.0; 3]);
        let b = a.translated(Vec3::X * 5.0);
        let merged = MeshData::merge(&[a, b]).unwrap();

        assert_eq!(merged.vertex_count(), 48);
        assert_eq!(merged.indices.len(), 72);
        assert_eq!(*merged.indices.iter().max().unwrap(), 47);
        assert!(merged.indices[36..].iter().all(|&i| i >= 24));
    }

    #[test]
    fn test_merge_empty_is_empty() {
        let merged = MeshData::merge(&[]).unwrap();
        assert!(merged.is_empty());
        assert_eq!(merged.vertex_count(), 0);
    }

    #[test]
    fn test_translate_moves_positions_only() {
        let mut m = cuboid(2.0, 2.0, 2.0, [0.5; 3]);
        m.translate(Vec3::new(1.0, 1.0, 1.0));
        let ys: Vec<f32> = m.vertices.chunks_exact(MESH_STRIDE).map(|v| v[1]).collect();
        assert!(ys.iter().all(|&y| (y - 0.0).abs() < 1e-6 || (y - 2.0).abs() < 1e-6));
        // Normals untouched
        assert!(m.vertices.chunks_exact(MESH_STRIDE).all(|v| {
            let n = Vec3::new(v[3], v[4], v[5]);
            (n.length() - 1.0).abs() < 1e-6
        }));
    }

    #[test]
    fn test_grid_line_count() {
        let g = grid(2, 1.0, [1.0; 4]);
        // 5 positions, two lines each, two vertices per line
        assert_eq!(g.vertex_count(), 5 * 2 * 2);
    }
}
