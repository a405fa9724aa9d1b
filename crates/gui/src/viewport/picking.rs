use glam::Vec3;
use shared::GridCell;

use super::mesh::{MeshData, MESH_STRIDE};

/// Below this |dir · normal| a ray is treated as parallel to a plane
const PARALLEL_EPSILON: f32 = 1e-6;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Infinite plane `dot(normal, p) = constant`
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// The editing ground plane, y = 0
    pub const GROUND: Plane = Plane {
        normal: Vec3::Y,
        constant: 0.0,
    };
}

/// Ray-plane intersection.
/// Returns the hit point, or None when the ray is parallel or the plane lies behind it.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (plane.constant - plane.normal.dot(ray.origin)) / denom;
    if t < 0.0 {
        return None;
    }

    Some(ray.at(t))
}

/// Round a ground-plane point to the nearest grid cell
pub fn snap_to_cell(point: Vec3) -> GridCell {
    GridCell::new(point.x.round() as i32, point.z.round() as i32)
}

/// Resolve the grid cell under a ray by intersecting it with `plane`.
///
/// Walls are not hit-tested; an occupied cell resolves the same as an empty one.
pub fn pick_grid_cell(ray: &Ray, plane: Option<&Plane>) -> Option<GridCell> {
    let plane = plane?;
    let candidates: Vec<GridCell> = ray_plane(ray, plane).map(snap_to_cell).into_iter().collect();
    dedup_cells(candidates).into_iter().next()
}

/// Remove repeated cells, keeping first occurrences in order
pub fn dedup_cells(cells: Vec<GridCell>) -> Vec<GridCell> {
    let mut out: Vec<GridCell> = Vec::with_capacity(cells.len());
    for cell in cells {
        if !out.contains(&cell) {
            out.push(cell);
        }
    }
    out
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color).
    /// Returns None for a mesh without vertices.
    pub fn from_mesh(data: &MeshData) -> Option<Self> {
        if data.vertex_count() == 0 {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for v in data.vertices.chunks_exact(MESH_STRIDE) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }

        Some(Self { min, max })
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, toward: Vec3) -> Ray {
        Ray {
            origin,
            direction: (toward - origin).normalize(),
        }
    }

    #[test]
    fn test_ray_hits_ground() {
        let r = ray(Vec3::new(0.0, 10.0, 10.0), Vec3::new(2.0, 0.0, -3.0));
        let hit = ray_plane(&r, &Plane::GROUND).unwrap();
        assert!((hit - Vec3::new(2.0, 0.0, -3.0)).length() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let r = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Vec3::X,
        };
        assert!(ray_plane(&r, &Plane::GROUND).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let r = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::Y,
        };
        assert!(ray_plane(&r, &Plane::GROUND).is_none());
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap_to_cell(Vec3::new(0.4, 0.0, -0.6)), GridCell::new(0, -1));
        assert_eq!(snap_to_cell(Vec3::new(2.51, 0.0, 1.49)), GridCell::new(3, 1));
    }

    #[test]
    fn test_pick_without_plane_is_none() {
        let r = ray(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!(pick_grid_cell(&r, None).is_none());
        assert_eq!(pick_grid_cell(&r, Some(&Plane::GROUND)), Some(GridCell::new(0, 0)));
    }

    #[test]
    fn test_dedup_keeps_order() {
        let cells = vec![GridCell::new(1, 1), GridCell::new(0, 0), GridCell::new(1, 1)];
        assert_eq!(dedup_cells(cells), vec![GridCell::new(1, 1), GridCell::new(0, 0)]);
    }

    #[test]
    fn test_aabb_of_empty_mesh() {
        assert!(Aabb::from_mesh(&MeshData::default()).is_none());
    }
}
