//! Board library: the list of saved boards and the one currently open.

use super::{Storage, StorageError, StorageResult};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// Storage key holding the list of boards.
pub const BOARDS_KEY: &str = "flavortownBoards";
/// Storage key holding the scene the editor should open.
pub const CURRENT_BOARD_KEY: &str = "currentBoard";

/// One saved board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Scene,
}

impl BoardEntry {
    /// Name shown in the board list; unnamed boards are numbered from 1.
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Board {}", index + 1))
    }
}

/// Boards kept in a [`Storage`] provider.
#[derive(Debug)]
pub struct BoardLibrary<S> {
    storage: S,
}

impl<S: Storage> BoardLibrary<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All saved boards, oldest first. An empty library has no list yet.
    pub async fn boards(&self) -> StorageResult<Vec<BoardEntry>> {
        match self.storage.load(BOARDS_KEY).await {
            Ok(json) => serde_json::from_str(&json)
                .map_err(|e| StorageError::Serialization(format!("Invalid board list: {}", e))),
            Err(StorageError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Add a board from exported scene JSON. The board is named after its
    /// position in the list.
    pub async fn import(&self, json: &str) -> StorageResult<BoardEntry> {
        let data = Scene::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut boards = self.boards().await?;

        let entry = BoardEntry {
            name: Some(format!("Board {}", boards.len() + 1)),
            data,
        };
        boards.push(entry.clone());
        self.save_boards(&boards).await?;

        log::info!("Imported {} with {} entities", entry.display_name(boards.len() - 1), entry.data.len());
        Ok(entry)
    }

    /// Make the board at `index` the current one and return its scene.
    pub async fn open(&self, index: usize) -> StorageResult<Scene> {
        let boards = self.boards().await?;
        let entry = boards
            .into_iter()
            .nth(index)
            .ok_or_else(|| StorageError::NotFound(format!("board #{}", index)))?;

        super::save_scene(&self.storage, CURRENT_BOARD_KEY, &entry.data).await?;
        Ok(entry.data)
    }

    /// Start from a blank board.
    pub async fn new_board(&self) -> StorageResult<()> {
        self.storage.delete(CURRENT_BOARD_KEY).await
    }

    /// The scene the editor should start with; empty when none was opened.
    pub async fn current_scene(&self) -> Scene {
        super::load_scene(&self.storage, CURRENT_BOARD_KEY).await
    }

    async fn save_boards(&self, boards: &[BoardEntry]) -> StorageResult<()> {
        let json =
            serde_json::to_string(boards).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(BOARDS_KEY, &json).await
    }
}
