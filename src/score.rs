use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Failure to read or write the highscore file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("highscore file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("highscore file does not hold a non-negative integer: {0}")]
    Parse(#[from] ParseIntError),
}

/// Loads the highscore stored as a plain integer at `path`.
///
/// Returns `Ok(0)` when the file does not exist yet (first run).
pub fn load_high_score(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    Ok(raw.trim().parse::<u32>()?)
}

/// Overwrites `path` with `score`, creating parent directories when needed.
pub fn save_high_score(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, score.to_string())?;
    Ok(())
}

/// Best score known to this process, backed by a file.
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    best: u32,
}

impl HighScore {
    /// Reads the stored highscore. Any failure counts as no highscore yet.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = load_high_score(&path).unwrap_or_else(|error| {
            warn!(path = %path.display(), %error, "ignoring unreadable highscore file");
            0
        });

        Self { path, best }
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records a finished game's score. When it beats the best score the
    /// file is overwritten (best-effort) and `true` is returned.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        match save_high_score(&self.path, score) {
            Ok(()) => info!(score, path = %self.path.display(), "new highscore saved"),
            Err(error) => {
                warn!(score, path = %self.path.display(), %error, "failed to save highscore");
            }
        }
        true
    }
}
