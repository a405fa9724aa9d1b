pub mod autosave;
pub mod editor;
pub mod interaction;
pub mod settings;
pub mod topology;
pub mod worlds;

use std::time::Instant;

pub use autosave::AutosaveTimer;
pub use editor::{CellResolver, EditOutcome, GridResolver, WallEditor};
pub use interaction::{PointerPhase, PointerTracker};
pub use settings::{AppSettings, Theme};
pub use topology::{check_adjacency, WallTopology};
pub use worlds::{StoreError, WallRepository, WorldStore};

use shared::WorldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: Instant,
}

/// One open world
pub struct EditorSession {
    pub world_id: WorldId,
    pub world_name: String,
    pub editor: WallEditor,
    pub autosave: AutosaveTimer,
}

/// Combined application state
pub struct AppState {
    pub settings: AppSettings,
    pub worlds: WorldStore,
    pub session: Option<EditorSession>,
    pub notice: Option<Notice>,
    /// Name typed into the create-world form
    pub new_world_name: String,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new(settings: AppSettings, worlds: WorldStore) -> Self {
        Self {
            settings,
            worlds,
            session: None,
            notice: None,
            new_world_name: String::new(),
            show_settings_window: false,
        }
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            text: text.into(),
            at: Instant::now(),
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            text: text.into(),
            at: Instant::now(),
        });
    }

    pub fn editor(&self) -> Option<&WallEditor> {
        self.session.as_ref().map(|s| &s.editor)
    }

    pub fn editor_mut(&mut self) -> Option<&mut WallEditor> {
        self.session.as_mut().map(|s| &mut s.editor)
    }

    /// Load a world into a fresh editor, closing any open one first
    pub fn open_world(&mut self, id: &str) -> Result<(), StoreError> {
        let info = self
            .worlds
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let walls = self.worlds.load_walls(id)?;
        self.close_world();

        let editor = WallEditor::from_cells(
            &walls,
            self.settings.walls.clone(),
            self.settings.input.drag_threshold,
        );
        let autosave = AutosaveTimer::new(
            self.settings.autosave.interval(),
            editor.topology().version(),
            Instant::now(),
        );
        tracing::info!(
            "Opened world {:?} ({id}) with {} walls",
            info.name,
            editor.topology().len()
        );
        self.session = Some(EditorSession {
            world_id: id.to_string(),
            world_name: info.name,
            editor,
            autosave,
        });
        Ok(())
    }

    /// Write the open world now
    pub fn save_now(&mut self) -> Result<(), StoreError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let version = session.editor.topology().version();
        self.worlds
            .save_walls(&session.world_id, &session.editor.cells_for_save())?;
        session.autosave.mark_saved(Instant::now(), version);
        tracing::info!("Saved world {:?}", session.world_name);
        Ok(())
    }

    /// Run the autosave if it is due. Returns whether a save was attempted.
    pub fn poll_autosave(&mut self, now: Instant) -> bool {
        if !self.settings.autosave.enabled {
            return false;
        }
        let due = self.session.as_ref().is_some_and(|s| {
            s.autosave.due(now, s.editor.topology().version())
        });
        if !due {
            return false;
        }
        match self.save_now() {
            Ok(()) => self.notify("World autosave is success"),
            Err(e) => {
                tracing::error!("Autosave failed: {e}");
                if let Some(s) = self.session.as_mut() {
                    s.autosave.defer(now);
                }
                self.notify_error("World autosave is failed");
            }
        }
        true
    }

    /// Final save, then drop the session and stop its timer
    pub fn close_world(&mut self) {
        let dirty = self
            .session
            .as_ref()
            .is_some_and(|s| s.autosave.is_dirty(s.editor.topology().version()));
        if dirty {
            if let Err(e) = self.save_now() {
                tracing::error!("Failed to save world on close: {e}");
                self.notify_error(format!("Failed to save world: {e}"));
            }
        }
        if let Some(mut session) = self.session.take() {
            session.autosave.cancel();
            tracing::info!("Closed world {:?}", session.world_name);
        }
    }

    pub fn create_world(&mut self, name: &str) -> Result<WorldId, StoreError> {
        self.worlds.create(name)
    }

    pub fn delete_world(&mut self, id: &str) -> Result<(), StoreError> {
        if self.session.as_ref().is_some_and(|s| s.world_id == id) {
            if let Some(mut session) = self.session.take() {
                session.autosave.cancel();
            }
        }
        self.worlds.delete(id)
    }

    /// Push edited settings into the open editor
    pub fn apply_settings(&mut self) {
        let walls = self.settings.walls.clone();
        let threshold = self.settings.input.drag_threshold;
        let interval = self.settings.autosave.interval();
        if let Some(session) = self.session.as_mut() {
            session.editor.set_style(&walls);
            session.editor.set_drag_threshold(threshold);
            session.autosave.set_interval(interval);
        }
    }
}
