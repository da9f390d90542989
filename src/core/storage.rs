//=========================================================================
// High Score Storage
//=========================================================================
//
// Persistence for the single numeric value the game keeps across runs.
//
// Callers treat every failure as recoverable: a missing or unreadable
// value means "no high score yet", a failed write is logged and dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

//=== Constants ===========================================================

/// File name used when only a directory is configured.
pub const HIGH_SCORE_KEY: &str = "neurobeep_highscore";

//=== StorageError ========================================================

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read/write high score at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score at {path} is not an integer: {content:?}")]
    Corrupt { path: PathBuf, content: String },
    #[error("high score store is unavailable")]
    Unavailable,
}

//=== HighScoreStore ======================================================

/// Get/set of one named integer, tolerant of absence.
pub trait HighScoreStore: Send {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<u32>, StorageError>;

    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

//=== FileHighScoreStore ==================================================

/// Stores the score as decimal text in a single file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/neurobeep_highscore`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(HIGH_SCORE_KEY))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        content
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| StorageError::Corrupt {
                path: self.path.clone(),
                content,
            })
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }
        write_atomic(&self.path, score.to_string().as_bytes()).map_err(|err| self.io_error(err))
    }
}

//=== Atomic Write ========================================================

/// Writes `bytes` to `<name>.tmp` beside `path`, then renames it over
/// `path`. Readers see either the old value or the new one, never a
/// truncated file. The temporary file is removed if any step fails.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path_for(path);

    let written = fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    // `rename` replaces an existing target in one step.
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(HIGH_SCORE_KEY);
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

//=== MemoryHighScoreStore ================================================

/// In-process store. Clones share the same slot, so a test can keep a
/// handle while the manager owns the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    slot: Arc<Mutex<Option<u32>>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u32) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(score))),
        }
    }

    /// Current stored value, `None` if never written.
    pub fn get(&self) -> Option<u32> {
        self.slot.lock().ok().and_then(|slot| *slot)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        self.slot
            .lock()
            .map(|slot| *slot)
            .map_err(|_| StorageError::Unavailable)
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Unavailable)?;
        *slot = Some(score);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
