//! Wall mesh generation
//!
//! Turns a topology snapshot into one merged wall mesh and keeps the
//! currently installed mesh for the renderer.

mod cache;
mod primitives;
mod walls;

pub use cache::WallMeshCache;
pub use primitives::{ghost_column, PrimitiveKind, WallPrimitive, WallStyle};
pub use walls::{generate_walls, WallBuild, WallMaterial, WallMesh};

use thiserror::Error;

/// Errors raised while building the wall mesh
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("merged mesh has {vertices} vertices, more than a 32-bit index can address")]
    IndexOverflow { vertices: usize },
}
