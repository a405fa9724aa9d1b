//! Column and beam primitives

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::{GridCell, Side};

use crate::viewport::mesh::{cuboid, MeshData};

/// Dimensions and surface of generated walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStyle {
    /// Wall height above the ground plane
    pub height: f32,
    /// Side length of a column, also the thickness of a beam
    pub thickness: f32,
    /// Base color RGB
    pub color: [u8; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for WallStyle {
    fn default() -> Self {
        Self {
            height: 2.0,
            thickness: 0.1,
            color: [0xdb, 0xdb, 0xdb],
            roughness: 0.8,
            metalness: 0.0,
        }
    }
}

impl WallStyle {
    pub fn color_f32(&self) -> [f32; 3] {
        self.color.map(|c| c as f32 / 255.0)
    }

    /// Length of a beam between two column faces
    pub fn beam_length(&self) -> f32 {
        1.0 - self.thickness
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Corner post at an occupied cell
    Column,
    /// Segment toward the neighbor on `side`
    Beam { side: Side },
}

/// One box emitted by the generator, before merging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPrimitive {
    pub kind: PrimitiveKind,
    pub center: Vec3,
    pub size: Vec3,
}

impl WallPrimitive {
    pub fn column(cell: GridCell, style: &WallStyle) -> Self {
        Self {
            kind: PrimitiveKind::Column,
            center: Vec3::new(cell.x as f32, style.height * 0.5, cell.z as f32),
            size: Vec3::new(style.thickness, style.height, style.thickness),
        }
    }

    /// Beam from `cell` toward its neighbor on `side`, centered on the shared midpoint
    pub fn beam(cell: GridCell, side: Side, style: &WallStyle) -> Self {
        let (dx, dz) = side.offset();
        let center = Vec3::new(
            cell.x as f32 + dx as f32 * 0.5,
            style.height * 0.5,
            cell.z as f32 + dz as f32 * 0.5,
        );
        let size = if side.is_north_south() {
            Vec3::new(style.thickness, style.height, style.beam_length())
        } else {
            Vec3::new(style.beam_length(), style.height, style.thickness)
        };
        Self {
            kind: PrimitiveKind::Beam { side },
            center,
            size,
        }
    }

    pub fn is_beam(&self) -> bool {
        matches!(self.kind, PrimitiveKind::Beam { .. })
    }

    pub fn to_mesh(&self, color: [f32; 3]) -> MeshData {
        cuboid(self.size.x, self.size.y, self.size.z, color).translated(self.center)
    }
}

/// Footprint of the hover preview column
pub const GHOST_WIDTH: f32 = 0.2;

/// Hover preview column at `cell`, full wall height
pub fn ghost_column(cell: GridCell, height: f32, color: [f32; 3]) -> MeshData {
    cuboid(GHOST_WIDTH, height, GHOST_WIDTH, color).translated(Vec3::new(
        cell.x as f32,
        height * 0.5,
        cell.z as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_centered_at_half_height() {
        let c = WallPrimitive::column(GridCell::new(2, -3), &WallStyle::default());
        assert_eq!(c.center, Vec3::new(2.0, 1.0, -3.0));
        assert_eq!(c.size, Vec3::new(0.1, 2.0, 0.1));
    }

    #[test]
    fn test_north_beam_runs_along_z() {
        let b = WallPrimitive::beam(GridCell::new(0, 0), Side::North, &WallStyle::default());
        assert_eq!(b.center, Vec3::new(0.0, 1.0, -0.5));
        assert!((b.size.z - 0.9).abs() < 1e-6);
        assert!((b.size.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_east_beam_runs_along_x() {
        let b = WallPrimitive::beam(GridCell::new(0, 0), Side::East, &WallStyle::default());
        assert_eq!(b.center, Vec3::new(0.5, 1.0, 0.0));
        assert!((b.size.x - 0.9).abs() < 1e-6);
        assert!((b.size.z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_ghost_column_sits_on_cell() {
        let m = ghost_column(GridCell::new(1, 2), 2.0, [1.0; 3]);
        let b = crate::viewport::picking::Aabb::from_mesh(&m).unwrap();
        assert!((b.center() - Vec3::new(1.0, 1.0, 2.0)).length() < 1e-5);
        assert!((b.size().x - GHOST_WIDTH).abs() < 1e-5);
    }

    #[test]
    fn test_style_color_conversion() {
        let style = WallStyle {
            color: [255, 0, 51],
            ..WallStyle::default()
        };
        assert_eq!(style.color_f32(), [1.0, 0.0, 0.2]);
    }
}
