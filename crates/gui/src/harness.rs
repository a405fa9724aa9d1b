//! Headless editor harness for tests and the command interface.
//!
//! Wraps a `WallEditor` with a fixed camera and viewport so pointer events
//! can be driven by grid coordinates.

use std::sync::Arc;

use egui::{Pos2, Rect};
use shared::{EditMode, GridCell, WallCell};

use crate::build::WallMesh;
use crate::state::editor::{CellResolver, EditOutcome, GridResolver, WallEditor};
use crate::validation::MeshValidator;
use crate::viewport::camera::ArcBallCamera;

/// Viewport size used by the harness
pub const VIEWPORT: [f32; 2] = [800.0, 600.0];

/// Headless editor with a default camera looking at the origin
pub struct EditorHarness {
    pub editor: WallEditor,
    pub camera: ArcBallCamera,
    pub rect: Rect,
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHarness {
    pub fn new() -> Self {
        Self {
            editor: WallEditor::default(),
            camera: ArcBallCamera::new(),
            rect: Rect::from_min_size(Pos2::ZERO, egui::vec2(VIEWPORT[0], VIEWPORT[1])),
        }
    }

    /// Harness preloaded with cells, as if a world had been opened
    pub fn with_cells(cells: &[WallCell]) -> Self {
        let mut h = Self::new();
        h.editor.replace_all(cells);
        h
    }

    fn resolver(&self) -> GridResolver<'_> {
        GridResolver::new(&self.camera, self.rect)
    }

    // ── Topology ──────────────────────────────────────────────

    pub fn add_wall(&mut self, x: i32, z: i32) -> bool {
        self.editor.add_wall(x, z)
    }

    pub fn remove_wall(&mut self, x: i32, z: i32) -> bool {
        self.editor.remove_wall(x, z)
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.editor.set_mode(mode);
    }

    pub fn clear(&mut self) {
        self.editor.clear();
    }

    // ── Pointer ───────────────────────────────────────────────

    /// Screen position of the center of cell `(x, z)`
    pub fn cell_screen_pos(&self, x: i32, z: i32) -> Option<Pos2> {
        self.camera
            .project(glam::Vec3::new(x as f32, 0.0, z as f32), self.rect)
    }

    pub fn resolve(&self, pos: Pos2) -> Option<GridCell> {
        self.resolver().resolve(pos)
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.editor.on_pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        let camera = self.camera;
        let resolver = GridResolver::new(&camera, self.rect);
        self.editor.on_pointer_move(pos, &resolver);
    }

    pub fn pointer_up(&mut self, pos: Pos2) -> Option<EditOutcome> {
        let camera = self.camera;
        let resolver = GridResolver::new(&camera, self.rect);
        self.editor.on_pointer_up(pos, &resolver)
    }

    /// Press and release on the center of `(x, z)` without moving
    pub fn click_cell(&mut self, x: i32, z: i32) -> Option<EditOutcome> {
        let pos = self.cell_screen_pos(x, z)?;
        self.pointer_down(pos);
        self.pointer_up(pos)
    }

    /// Press on `(x, z)`, move by `delta` pixels, release
    pub fn drag_from_cell(&mut self, x: i32, z: i32, delta: egui::Vec2) -> Option<EditOutcome> {
        let start = self.cell_screen_pos(x, z)?;
        self.pointer_down(start);
        self.pointer_move(start + delta);
        self.pointer_up(start + delta)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn wall_count(&self) -> usize {
        self.editor.topology().len()
    }

    pub fn beam_count(&self) -> usize {
        self.editor.cache().beam_count()
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        self.editor.topology().contains(x, z)
    }

    /// Cells with the flags of the installed mesh
    pub fn cells(&self) -> &[WallCell] {
        self.editor.cache().cells()
    }

    pub fn cell(&self, x: i32, z: i32) -> Option<WallCell> {
        self.cells().iter().copied().find(|c| c.at(x, z))
    }

    pub fn mesh(&self) -> Arc<WallMesh> {
        self.editor.mesh()
    }

    pub fn validation_errors(&self) -> Vec<String> {
        let mesh = self.mesh();
        MeshValidator::new(&mesh.geometry).validate_all()
    }

    /// Walls as persisted JSON
    pub fn export_walls_json(&self) -> String {
        serde_json::to_string(&self.editor.cells_for_save()).unwrap_or_default()
    }

    pub fn load_walls_json(&mut self, json: &str) -> Result<(), String> {
        let cells: Vec<WallCell> =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.editor.replace_all(&cells);
        Ok(())
    }
}
