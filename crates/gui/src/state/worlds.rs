//! Named wall layouts stored on the local filesystem
//!
//! Layout under the storage root:
//! - `worlds.json`: index of `{id -> {name, created}}`
//! - `worlds/<id>.json`: `{"walls": [...]}` for each world

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use shared::{WallCell, WorldData, WorldExport, WorldId, WorldInfo};
use thiserror::Error;

use super::topology::WallTopology;

/// Minimum length of a trimmed world name
pub const MIN_NAME_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed world data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("world not found: {0}")]
    NotFound(WorldId),

    #[error("world name must be at least {min} characters, got {0:?}", min = MIN_NAME_LEN)]
    InvalidName(String),
}

/// Load/save seam between the editor session and storage
pub trait WallRepository {
    fn load_walls(&self, id: &str) -> Result<Vec<WallCell>, StoreError>;
    fn save_walls(&mut self, id: &str, walls: &[WallCell]) -> Result<(), StoreError>;
}

/// Validate and trim a user-supplied world name
pub fn validate_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// World index plus per-world wall files
pub struct WorldStore {
    root: PathBuf,
    index: BTreeMap<WorldId, WorldInfo>,
}

impl WorldStore {
    /// Platform data directory for worlds
    pub fn default_root() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "floorplan", "floorplan")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Open (creating if needed) the store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(root.join("worlds"))?;
        let index_path = root.join("worlds.json");
        let index = if index_path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&index_path)?)?
        } else {
            BTreeMap::new()
        };
        tracing::info!("Opened world store at {} ({} worlds)", root.display(), index.len());
        Ok(Self { root, index })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("worlds.json")
    }

    fn walls_path(&self, id: &str) -> PathBuf {
        self.root.join("worlds").join(format!("{id}.json"))
    }

    fn write_index(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.index)?;
        std::fs::write(self.index_path(), json)?;
        Ok(())
    }

    /// Worlds ordered by creation time, oldest first
    pub fn list(&self) -> Vec<(WorldId, WorldInfo)> {
        let mut worlds: Vec<_> = self
            .index
            .iter()
            .map(|(id, info)| (id.clone(), info.clone()))
            .collect();
        worlds.sort_by(|a, b| {
            a.1.created
                .cmp(&b.1.created)
                .then_with(|| a.1.name.cmp(&b.1.name))
        });
        worlds
    }

    pub fn get(&self, id: &str) -> Option<&WorldInfo> {
        self.index.get(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Register a new, empty world
    pub fn create(&mut self, name: &str) -> Result<WorldId, StoreError> {
        let name = validate_name(name)?;
        let id = uuid::Uuid::new_v4().to_string();
        self.index.insert(
            id.clone(),
            WorldInfo {
                name: name.clone(),
                created: now_millis(),
            },
        );
        self.write_index()?;
        tracing::info!("Created world {name:?} ({id})");
        Ok(id)
    }

    /// Remove a world from the index and delete its wall file
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(info) = self.index.remove(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        self.write_index()?;
        let path = self.walls_path(id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        tracing::info!("Deleted world {:?} ({id})", info.name);
        Ok(())
    }

    /// Write a world as a shareable `{name, walls}` file
    pub fn export(&self, id: &str, path: &Path) -> Result<(), StoreError> {
        let export = self.export_data(id)?;
        std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
        tracing::info!("Exported world {:?} to {}", export.name, path.display());
        Ok(())
    }

    pub fn export_data(&self, id: &str) -> Result<WorldExport, StoreError> {
        let info = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(WorldExport {
            name: info.name.clone(),
            walls: self.load_walls(id)?,
        })
    }

    /// Read a shared world file and store it as a new world
    pub fn import(&mut self, path: &Path) -> Result<WorldId, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let data: WorldExport = serde_json::from_str(&json)?;
        let id = self.import_data(&data)?;
        tracing::info!("Imported world from {}", path.display());
        Ok(id)
    }

    pub fn import_data(&mut self, data: &WorldExport) -> Result<WorldId, StoreError> {
        let id = self.create(&data.name)?;
        let walls = WallTopology::from_cells(&data.walls).snapshot();
        self.save_walls(&id, &walls)?;
        Ok(id)
    }
}

impl WallRepository for WorldStore {
    fn load_walls(&self, id: &str) -> Result<Vec<WallCell>, StoreError> {
        if !self.index.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let path = self.walls_path(id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data: WorldData = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(data.walls)
    }

    fn save_walls(&mut self, id: &str, walls: &[WallCell]) -> Result<(), StoreError> {
        if !self.index.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let data = WorldData {
            walls: walls.to_vec(),
        };
        std::fs::write(self.walls_path(id), serde_json::to_string(&data)?)?;
        tracing::debug!(id, walls = walls.len(), "Saved walls");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, WorldStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = WorldStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_name_validation() {
        assert!(matches!(validate_name("  ab  "), Err(StoreError::InvalidName(_))));
        assert_eq!(validate_name("  Home ").unwrap(), "Home");
    }

    #[test]
    fn test_create_and_list() {
        let (_dir, mut store) = store();
        let id = store.create("First").unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.get(&id).unwrap().name, "First");
        assert!(store.load_walls(&id).unwrap().is_empty());
    }

    #[test]
    fn test_index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut store = WorldStore::open(dir.path()).unwrap();
            let id = store.create("Cottage").unwrap();
            store.save_walls(&id, &[WallCell::bare(1, 1)]).unwrap();
            id
        };
        let store = WorldStore::open(dir.path()).unwrap();
        assert_eq!(store.get(&id).unwrap().name, "Cottage");
        assert_eq!(store.load_walls(&id).unwrap(), vec![WallCell::bare(1, 1)]);
    }

    #[test]
    fn test_unknown_world() {
        let (_dir, mut store) = store();
        assert!(matches!(store.load_walls("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.save_walls("nope", &[]), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_files() {
        let (dir, mut store) = store();
        let id = store.create("Shed").unwrap();
        store.save_walls(&id, &[WallCell::bare(0, 0)]).unwrap();
        let walls_file = dir.path().join("worlds").join(format!("{id}.json"));
        assert!(walls_file.exists());
        store.delete(&id).unwrap();
        assert!(!walls_file.exists());
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_walls_file() {
        let (dir, mut store) = store();
        let id = store.create("Broken").unwrap();
        std::fs::write(dir.path().join("worlds").join(format!("{id}.json")), "{oops").unwrap();
        assert!(matches!(store.load_walls(&id), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_import_dedupes_walls() {
        let (_dir, mut store) = store();
        let data = WorldExport {
            name: "Shared".into(),
            walls: vec![WallCell::bare(0, 0), WallCell::bare(0, 0), WallCell::bare(1, 0)],
        };
        let id = store.import_data(&data).unwrap();
        assert_eq!(store.load_walls(&id).unwrap().len(), 2);
        assert_eq!(store.export_data(&id).unwrap().name, "Shared");
    }

    #[test]
    fn test_export_import_file() {
        let (dir, mut store) = store();
        let id = store.create("Original").unwrap();
        store.save_walls(&id, &[WallCell::bare(2, 2)]).unwrap();
        let path = dir.path().join("share.json");
        store.export(&id, &path).unwrap();
        let copy = store.import(&path).unwrap();
        assert_ne!(copy, id);
        assert_eq!(store.load_walls(&copy).unwrap(), vec![WallCell::bare(2, 2)]);
        assert_eq!(store.len(), 2);
    }
}
