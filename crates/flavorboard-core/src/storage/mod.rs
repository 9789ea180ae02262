//! Storage abstraction for persistence.
//!
//! Providers are simple key/value stores of serialized scenes. The editor
//! never awaits them on its own; hosts drive the returned futures.

mod library;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use library::{BoardEntry, BoardLibrary, BOARDS_KEY, CURRENT_BOARD_KEY};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::canvas::Canvas;
use crate::scene::Scene;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A persistence provider mapping keys to JSON text.
pub trait Storage: Send + Sync {
    /// Store `json` under `key`, replacing any previous value.
    fn save(&self, key: &str, json: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Fetch the value stored under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Load the scene stored under `key`.
///
/// A missing or unreadable scene yields an empty one; the failure is logged.
pub async fn load_scene(storage: &dyn Storage, key: &str) -> Scene {
    match storage.load(key).await {
        Ok(json) => Scene::from_json_or_empty(&json),
        Err(StorageError::NotFound(_)) => Scene::new(),
        Err(e) => {
            log::warn!("Failed to load board {:?}: {}", key, e);
            Scene::new()
        }
    }
}

/// Serialize `scene` and store it under `key`.
pub async fn save_scene(storage: &dyn Storage, key: &str, scene: &Scene) -> StorageResult<()> {
    let json = scene
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.save(key, &json).await
}

impl Canvas {
    /// Replace the scene with the one stored under `key`.
    pub async fn load_from(&mut self, storage: &dyn Storage, key: &str) {
        let scene = load_scene(storage, key).await;
        self.load_scene(scene);
    }

    /// Persist the current scene under `key`.
    pub async fn save_to(&self, storage: &dyn Storage, key: &str) -> StorageResult<()> {
        save_scene(storage, key, self.scene()).await
    }
}

/// Minimal executor for driving storage futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn noop_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    // SAFETY: the vtable functions ignore the data pointer entirely.
    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::StickyNote;
    use crate::tools::ToolKind;
    use crate::NoText;
    use kurbo::Point;

    #[test]
    fn test_canvas_save_and_load() {
        let storage = MemoryStorage::new();
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Sticky);
        canvas.pointer_down(Point::new(4.0, 8.0), &mut NoText);

        block_on(canvas.save_to(&storage, "board")).unwrap();

        let mut restored = Canvas::new();
        block_on(restored.load_from(&storage, "board"));
        assert_eq!(restored.scene(), canvas.scene());
    }

    #[test]
    fn test_missing_board_loads_empty() {
        let storage = MemoryStorage::new();
        let mut canvas = Canvas::with_scene(Scene::from_entities(vec![
            StickyNote::new(Point::ZERO).into(),
        ]));

        block_on(canvas.load_from(&storage, "nope"));
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_malformed_board_loads_empty() {
        let storage = MemoryStorage::new();
        block_on(storage.save("broken", "{ not json")).unwrap();

        let scene = block_on(load_scene(&storage, "broken"));
        assert!(scene.is_empty());
    }
}
