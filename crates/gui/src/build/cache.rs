//! Installed wall mesh, rebuilt when the topology changes

use std::sync::Arc;

use shared::WallCell;

use super::{generate_walls, BuildError, WallMesh, WallStyle};
use crate::viewport::picking::Aabb;

/// Holds the currently installed wall artifact plus the flags derived with it
pub struct WallMeshCache {
    mesh: Arc<WallMesh>,
    cells: Vec<WallCell>,
    beams: usize,
    bounds: Option<Aabb>,
    style: WallStyle,
    version: u64,
    rebuild_count: u64,
    last_error: Option<BuildError>,
}

impl Default for WallMeshCache {
    fn default() -> Self {
        Self::new(WallStyle::default())
    }
}

impl WallMeshCache {
    pub fn new(style: WallStyle) -> Self {
        Self {
            mesh: Arc::new(WallMesh::empty(&style)),
            cells: Vec::new(),
            beams: 0,
            bounds: None,
            style,
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
            last_error: None,
        }
    }

    pub fn is_valid(&self, topology_version: u64, style: &WallStyle) -> bool {
        self.version == topology_version && &self.style == style
    }

    /// Regenerate from `snapshot` and swap the installed artifact.
    ///
    /// On failure the previous artifact stays installed; the version is still
    /// recorded so the same snapshot is not retried every frame.
    pub fn rebuild(
        &mut self,
        snapshot: &[WallCell],
        topology_version: u64,
        style: &WallStyle,
    ) -> Result<(), BuildError> {
        self.version = topology_version;
        self.style = style.clone();
        self.rebuild_count += 1;

        match generate_walls(snapshot, style) {
            Ok(build) => {
                self.beams = build.beam_count();
                self.bounds = Aabb::from_mesh(&build.mesh.geometry);
                self.cells = build.cells;
                self.mesh = Arc::new(build.mesh);
                self.last_error = None;
                tracing::debug!(
                    cells = self.cells.len(),
                    beams = self.beams,
                    vertices = self.mesh.geometry.vertex_count(),
                    "Regenerated wall mesh"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("Wall mesh generation failed, keeping previous mesh: {e}");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Shared handle to the installed artifact, for the render pass
    pub fn mesh(&self) -> Arc<WallMesh> {
        Arc::clone(&self.mesh)
    }

    /// Cells with the flags derived by the last successful generation
    pub fn cells(&self) -> &[WallCell] {
        &self.cells
    }

    pub fn beam_count(&self) -> usize {
        self.beams
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Topology version the installed state was built for
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn last_error(&self) -> Option<&BuildError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_is_invalid() {
        let cache = WallMeshCache::default();
        assert!(!cache.is_valid(0, &WallStyle::default()));
        assert!(cache.mesh().is_empty());
    }

    #[test]
    fn test_rebuild_installs_new_artifact() {
        let mut cache = WallMeshCache::default();
        let style = WallStyle::default();
        let before = cache.mesh();
        cache
            .rebuild(&[WallCell::bare(0, 0), WallCell::bare(1, 0)], 1, &style)
            .unwrap();
        assert!(cache.is_valid(1, &style));
        assert!(!Arc::ptr_eq(&before, &cache.mesh()));
        assert_eq!(cache.beam_count(), 1);
        assert_eq!(cache.cells().len(), 2);
        assert_eq!(cache.rebuild_count(), 1);
        assert!(cache.bounds().is_some());
    }

    #[test]
    fn test_style_change_invalidates() {
        let mut cache = WallMeshCache::default();
        let style = WallStyle::default();
        cache.rebuild(&[WallCell::bare(0, 0)], 3, &style).unwrap();
        let taller = WallStyle {
            height: 3.0,
            ..style.clone()
        };
        assert!(cache.is_valid(3, &style));
        assert!(!cache.is_valid(3, &taller));
    }

    #[test]
    fn test_rebuild_to_empty() {
        let mut cache = WallMeshCache::default();
        let style = WallStyle::default();
        cache.rebuild(&[WallCell::bare(0, 0)], 1, &style).unwrap();
        cache.rebuild(&[], 2, &style).unwrap();
        assert!(cache.mesh().is_empty());
        assert!(cache.bounds().is_none());
        assert_eq!(cache.beam_count(), 0);
    }
}
