use alloc::format;
use alloc::string::ToString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::game::{GameState, PlayerId};

use super::{GameMap, GameStore};

/// A store that keeps every game in a single JSON document on disk.
///
/// The document is re-read on every operation and rewritten as a whole on
/// every change. Each operation holds an OS file lock on a sibling
/// `<name>.lock` file, exclusive for changes and shared for reads, so any
/// number of stores, threads or processes may use the same path. Writes go to
/// a uniquely named temporary file in the same directory, which is then
/// renamed over the document.
///
/// A document that cannot be parsed, or that holds a game whose hands do not
/// match its deck, is treated as empty: [`load_all`] and [`get`] report
/// [`StoreError::Corrupted`], while [`put`] and [`delete`] start over from an
/// empty map and overwrite it.
///
/// [`load_all`]: GameStore::load_all
/// [`get`]: GameStore::get
/// [`put`]: GameStore::put
/// [`delete`]: GameStore::delete
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        Self {
            path,
            lock_path,
            pretty: true,
        }
    }

    /// Sets whether the document is pretty-printed. Defaults to `true`.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Opens the lock file and takes the lock. It is released when the
    /// returned file is dropped.
    fn lock(&self, exclusive: bool) -> Result<File, StoreError> {
        if let Some(parent) = self.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write(err.to_string()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|err| StoreError::Read(err.to_string()))?;

        let locked = if exclusive {
            file.lock_exclusive()
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|err| StoreError::Read(format!("failed to lock game store: {err}")))?;

        Ok(file)
    }

    fn read(&self) -> Result<GameMap, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(GameMap::new()),
            Err(err) => return Err(StoreError::Read(err.to_string())),
        };

        if text.trim().is_empty() {
            return Ok(GameMap::new());
        }

        let games: GameMap =
            serde_json::from_str(&text).map_err(|err| StoreError::Corrupted(err.to_string()))?;

        for (player_id, state) in &games {
            if *player_id != state.player_id {
                return Err(StoreError::Corrupted(format!(
                    "game stored under {player_id} belongs to player {}",
                    state.player_id
                )));
            }
            state.validate().map_err(|err| {
                StoreError::Corrupted(format!("game of player {player_id}: {err}"))
            })?;
        }

        Ok(games)
    }

    fn read_for_update(&self) -> Result<GameMap, StoreError> {
        match self.read() {
            Err(StoreError::Corrupted(reason)) => {
                warn!(path = %self.path.display(), %reason, "discarding corrupted game store");
                Ok(GameMap::new())
            }
            other => other,
        }
    }

    fn write(&self, games: &GameMap) -> Result<(), StoreError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(games)
        } else {
            serde_json::to_string(games)
        }
        .map_err(|err| StoreError::Write(err.to_string()))?;

        let dir = self.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|err| StoreError::Write(err.to_string()))?;
        tmp.write_all(encoded.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| StoreError::Write(err.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|err| StoreError::Write(err.error.to_string()))?;

        debug!(path = %self.path.display(), games = games.len(), "saved game store");
        Ok(())
    }
}

impl GameStore for JsonFileStore {
    fn load_all(&self) -> Result<GameMap, StoreError> {
        let _lock = self.lock(false)?;
        self.read()
    }

    fn save_all(&self, games: &GameMap) -> Result<(), StoreError> {
        let _lock = self.lock(true)?;
        self.write(games)
    }

    fn get(&self, player_id: PlayerId) -> Result<Option<GameState>, StoreError> {
        let _lock = self.lock(false)?;
        Ok(self.read()?.remove(&player_id))
    }

    fn put(&self, state: &GameState) -> Result<(), StoreError> {
        let _lock = self.lock(true)?;
        let mut games = self.read_for_update()?;
        games.insert(state.player_id, state.clone());
        self.write(&games)
    }

    fn delete(&self, player_id: PlayerId) -> Result<bool, StoreError> {
        let _lock = self.lock(true)?;
        let mut games = self.read_for_update()?;
        if games.remove(&player_id).is_none() {
            return Ok(false);
        }
        self.write(&games)?;
        Ok(true)
    }
}
