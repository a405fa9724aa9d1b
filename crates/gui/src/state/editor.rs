//! Edit-mode controller: pointer events in, topology mutations and a fresh
//! wall mesh out

use std::sync::Arc;

use egui::{Pos2, Rect};
use shared::{EditMode, GridCell, WallCell};

use super::interaction::PointerTracker;
use super::topology::WallTopology;
use crate::build::{WallMesh, WallMeshCache, WallStyle};
use crate::viewport::camera::ArcBallCamera;
use crate::viewport::picking::{pick_grid_cell, Aabb, Plane};

/// Maps a screen position to a grid cell
pub trait CellResolver {
    fn resolve(&self, pos: Pos2) -> Option<GridCell>;
}

/// Camera ray against the ground plane, rounded to the nearest cell
#[derive(Debug, Clone, Copy)]
pub struct GridResolver<'a> {
    camera: Option<&'a ArcBallCamera>,
    rect: Rect,
    plane: Option<Plane>,
}

impl<'a> GridResolver<'a> {
    pub fn new(camera: &'a ArcBallCamera, rect: Rect) -> Self {
        Self {
            camera: Some(camera),
            rect,
            plane: Some(Plane::GROUND),
        }
    }

    /// Resolver with no camera attached; every lookup fails
    pub fn detached(rect: Rect) -> Self {
        Self {
            camera: None,
            rect,
            plane: Some(Plane::GROUND),
        }
    }

    pub fn with_plane(mut self, plane: Option<Plane>) -> Self {
        self.plane = plane;
        self
    }
}

impl CellResolver for GridResolver<'_> {
    fn resolve(&self, pos: Pos2) -> Option<GridCell> {
        let ray = self.camera?.screen_ray(pos, self.rect)?;
        pick_grid_cell(&ray, self.plane.as_ref())
    }
}

/// Result of a click in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Added(GridCell),
    Removed(GridCell),
    /// Click resolved to a cell but the mode or topology made it a no-op
    Unchanged(GridCell),
}

impl EditOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, EditOutcome::Unchanged(_))
    }
}

pub const GHOST_ADD: [f32; 3] = [0x68 as f32 / 255.0, 0xcc as f32 / 255.0, 0x17 as f32 / 255.0];
pub const GHOST_DELETE: [f32; 3] = [0xcc as f32 / 255.0, 0x10 as f32 / 255.0, 0x10 as f32 / 255.0];
pub const GHOST_NEUTRAL: [f32; 3] = [1.0, 1.0, 1.0];

/// Owns the topology and the installed wall mesh for one open world
pub struct WallEditor {
    topology: WallTopology,
    mode: EditMode,
    tracker: PointerTracker,
    cache: WallMeshCache,
    style: WallStyle,
    hover: Option<GridCell>,
}

impl Default for WallEditor {
    fn default() -> Self {
        Self::new(WallStyle::default(), PointerTracker::default().threshold())
    }
}

impl WallEditor {
    pub fn new(style: WallStyle, drag_threshold: f32) -> Self {
        let mut editor = Self {
            topology: WallTopology::new(),
            mode: EditMode::default(),
            tracker: PointerTracker::new(drag_threshold),
            cache: WallMeshCache::new(style.clone()),
            style,
            hover: None,
        };
        editor.regenerate();
        editor
    }

    /// Editor seeded with loaded cells; stored flags are recomputed
    pub fn from_cells(cells: &[WallCell], style: WallStyle, drag_threshold: f32) -> Self {
        let mut editor = Self::new(style, drag_threshold);
        editor.replace_all(cells);
        editor
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        if self.mode != mode {
            tracing::debug!(?mode, "Edit mode changed");
        }
        self.mode = mode;
    }

    pub fn topology(&self) -> &WallTopology {
        &self.topology
    }

    pub fn style(&self) -> &WallStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: &WallStyle) {
        if &self.style != style {
            self.style = style.clone();
            self.regenerate();
        }
    }

    pub fn set_drag_threshold(&mut self, threshold: f32) {
        self.tracker.set_threshold(threshold);
    }

    /// Cell under the pointer, for the ghost preview
    pub fn hover(&self) -> Option<GridCell> {
        self.hover
    }

    /// Ghost column tint for the active mode
    pub fn ghost_color(&self) -> [f32; 3] {
        match self.mode {
            EditMode::WallAdd => GHOST_ADD,
            EditMode::WallDelete => GHOST_DELETE,
            EditMode::Delete => GHOST_NEUTRAL,
        }
    }

    pub fn on_pointer_down(&mut self, pos: Pos2) {
        self.tracker.pointer_down(pos);
    }

    pub fn on_pointer_move(&mut self, pos: Pos2, resolver: &impl CellResolver) {
        self.tracker.pointer_move(pos);
        self.hover = resolver.resolve(pos);
    }

    /// Pointer left the viewport: drop the preview and any pending press
    pub fn on_pointer_leave(&mut self) {
        self.hover = None;
        self.tracker.cancel();
    }

    /// Finish a press. Only a click that resolves to a cell reaches the topology.
    pub fn on_pointer_up(
        &mut self,
        pos: Pos2,
        resolver: &impl CellResolver,
    ) -> Option<EditOutcome> {
        if !self.tracker.pointer_up(pos) {
            return None;
        }
        let Some(cell) = resolver.resolve(pos) else {
            tracing::debug!("Click did not hit the ground plane");
            return None;
        };
        Some(self.apply_click(cell))
    }

    /// Apply the active mode to `cell`
    pub fn apply_click(&mut self, cell: GridCell) -> EditOutcome {
        let mode = self.mode;
        match mode {
            EditMode::WallAdd if self.add_wall(cell.x, cell.z) => EditOutcome::Added(cell),
            EditMode::WallDelete if self.remove_wall(cell.x, cell.z) => EditOutcome::Removed(cell),
            _ => EditOutcome::Unchanged(cell),
        }
    }

    pub fn add_wall(&mut self, x: i32, z: i32) -> bool {
        let added = self.topology.add_wall(x, z);
        if added {
            self.regenerate();
        }
        added
    }

    pub fn remove_wall(&mut self, x: i32, z: i32) -> bool {
        let removed = self.topology.remove_wall(x, z);
        if removed {
            self.regenerate();
        }
        removed
    }

    pub fn replace_all(&mut self, cells: &[WallCell]) {
        self.topology.replace_all(cells);
        self.regenerate();
    }

    pub fn clear(&mut self) {
        self.topology.clear();
        self.regenerate();
    }

    /// Rebuild the installed mesh if the topology or style moved past it
    pub fn regenerate(&mut self) {
        if self.cache.is_valid(self.topology.version(), &self.style) {
            return;
        }
        // Failure is logged by the cache and leaves the old mesh installed
        let _ = self
            .cache
            .rebuild(&self.topology.snapshot(), self.topology.version(), &self.style);
    }

    /// Currently installed wall artifact
    pub fn mesh(&self) -> Arc<WallMesh> {
        self.cache.mesh()
    }

    pub fn cache(&self) -> &WallMeshCache {
        &self.cache
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.cache.bounds()
    }

    /// Cells to persist, carrying the flags of the last generation when it
    /// matches the current topology
    pub fn cells_for_save(&self) -> Vec<WallCell> {
        let current = self.cache.version() == self.topology.version()
            && self.cache.last_error().is_none();
        if current {
            self.cache.cells().to_vec()
        } else {
            self.topology.snapshot()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolves every position to a fixed cell
    struct Fixed(Option<GridCell>);

    impl CellResolver for Fixed {
        fn resolve(&self, _pos: Pos2) -> Option<GridCell> {
            self.0
        }
    }

    fn click(editor: &mut WallEditor, resolver: &impl CellResolver) -> Option<EditOutcome> {
        let p = Pos2::new(100.0, 100.0);
        editor.on_pointer_down(p);
        editor.on_pointer_up(p, resolver)
    }

    #[test]
    fn test_click_adds_in_wall_add() {
        let mut editor = WallEditor::default();
        let cell = GridCell::new(2, 3);
        assert_eq!(click(&mut editor, &Fixed(Some(cell))), Some(EditOutcome::Added(cell)));
        assert!(editor.topology().contains(2, 3));
        assert_eq!(editor.mesh().geometry.vertex_count(), 24);
    }

    #[test]
    fn test_click_removes_in_wall_delete() {
        let mut editor = WallEditor::default();
        editor.add_wall(0, 0);
        editor.set_mode(EditMode::WallDelete);
        let out = click(&mut editor, &Fixed(Some(GridCell::new(0, 0))));
        assert_eq!(out, Some(EditOutcome::Removed(GridCell::new(0, 0))));
        assert!(editor.mesh().is_empty());
    }

    #[test]
    fn test_delete_mode_leaves_walls() {
        let mut editor = WallEditor::default();
        editor.add_wall(0, 0);
        editor.set_mode(EditMode::Delete);
        let v = editor.topology().version();
        let out = click(&mut editor, &Fixed(Some(GridCell::new(0, 0))));
        assert_eq!(out, Some(EditOutcome::Unchanged(GridCell::new(0, 0))));
        assert_eq!(editor.topology().version(), v);
    }

    #[test]
    fn test_unresolved_click_is_noop() {
        let mut editor = WallEditor::default();
        assert_eq!(click(&mut editor, &Fixed(None)), None);
        assert!(editor.topology().is_empty());
    }

    #[test]
    fn test_drag_does_not_mutate() {
        let mut editor = WallEditor::default();
        let resolver = Fixed(Some(GridCell::new(0, 0)));
        editor.on_pointer_down(Pos2::new(0.0, 0.0));
        editor.on_pointer_move(Pos2::new(20.0, 0.0), &resolver);
        assert_eq!(editor.on_pointer_up(Pos2::new(20.0, 0.0), &resolver), None);
        assert!(editor.topology().is_empty());
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let mut editor = WallEditor::default();
        editor.on_pointer_move(Pos2::new(1.0, 1.0), &Fixed(Some(GridCell::new(4, 4))));
        assert_eq!(editor.hover(), Some(GridCell::new(4, 4)));
        assert!(editor.topology().is_empty());
        editor.on_pointer_leave();
        assert_eq!(editor.hover(), None);
    }

    #[test]
    fn test_leave_drops_pending_press() {
        let mut editor = WallEditor::default();
        let resolver = Fixed(Some(GridCell::new(0, 0)));
        let p = Pos2::new(10.0, 10.0);
        editor.on_pointer_down(p);
        editor.on_pointer_leave();
        assert_eq!(editor.on_pointer_up(p, &resolver), None);
        assert!(editor.topology().is_empty());
    }

    #[test]
    fn test_apply_click_dispatches_by_mode() {
        let mut editor = WallEditor::default();
        let cell = GridCell::new(-1, 2);
        assert_eq!(editor.apply_click(cell), EditOutcome::Added(cell));
        assert_eq!(editor.apply_click(cell), EditOutcome::Unchanged(cell));
        editor.set_mode(EditMode::WallDelete);
        assert_eq!(editor.apply_click(cell), EditOutcome::Removed(cell));
        assert_eq!(editor.apply_click(cell), EditOutcome::Unchanged(cell));
        assert!(editor.topology().is_empty());
    }

    #[test]
    fn test_ghost_color_follows_mode() {
        let mut editor = WallEditor::default();
        assert_eq!(editor.ghost_color(), GHOST_ADD);
        editor.set_mode(EditMode::WallDelete);
        assert_eq!(editor.ghost_color(), GHOST_DELETE);
        editor.set_mode(EditMode::Delete);
        assert_eq!(editor.ghost_color(), GHOST_NEUTRAL);
    }

    #[test]
    fn test_detached_resolver_fails() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0));
        assert_eq!(GridResolver::detached(rect).resolve(Pos2::new(400.0, 300.0)), None);
        let camera = ArcBallCamera::new();
        let no_plane = GridResolver::new(&camera, rect).with_plane(None);
        assert_eq!(no_plane.resolve(Pos2::new(400.0, 300.0)), None);
    }

    #[test]
    fn test_saved_cells_carry_flags() {
        let mut editor = WallEditor::default();
        editor.add_wall(0, 0);
        editor.add_wall(0, 1);
        let saved = editor.cells_for_save();
        assert!(saved[0].south);
        assert!(saved[1].north);
    }

    #[test]
    fn test_style_change_regenerates() {
        let mut editor = WallEditor::default();
        editor.add_wall(0, 0);
        let before = editor.cache().rebuild_count();
        editor.set_style(&WallStyle {
            height: 3.0,
            ..WallStyle::default()
        });
        assert_eq!(editor.cache().rebuild_count(), before + 1);
    }
}
