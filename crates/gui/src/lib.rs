// Library crate: editor core, persistence and the headless command interface.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod build;
pub mod command;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod validation;

/// Viewport math shared by the editor core and the binary: mesh buffers,
/// picking and the camera. GL rendering stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}
