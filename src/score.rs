use anyhow::{Context, Result};
use directories_next::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Persisted best-score cell with a set-if-greater update contract.
pub trait ScoreStore {
    fn read(&self) -> Result<u32>;
    fn write_if_greater(&self, score: u32) -> Result<bool>;
}

pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: PathBuf) -> Self {
        FileScoreStore { path }
    }

    pub fn in_user_data_dir() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "quickfire")
            .context("Could not locate system directories")?;
        let mut path = dirs.data_dir().to_path_buf();
        path.push("best_score.txt");
        Ok(FileScoreStore::new(path))
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read best score from {}", self.path.display()))?;
        let score = contents
            .trim()
            .parse()
            .context("Best score file does not contain a number")?;
        Ok(score)
    }

    fn write_if_greater(&self, score: u32) -> Result<bool> {
        let best = self.read()?;
        if score <= best {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("Could not write best score to {}", self.path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
pub struct MemoryScoreStore {
    best: parking_lot::RwLock<u32>,
}

#[cfg(test)]
impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        MemoryScoreStore {
            best: parking_lot::RwLock::new(best),
        }
    }
}

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn read(&self) -> Result<u32> {
        Ok(*self.best.read())
    }

    fn write_if_greater(&self, score: u32) -> Result<bool> {
        let mut best = self.best.write();
        if score <= *best {
            return Ok(false);
        }
        *best = score;
        Ok(true)
    }
}
