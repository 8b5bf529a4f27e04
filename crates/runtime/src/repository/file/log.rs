//! Append-only JSON-lines result log.
//!
//! Each recorded [`GameResult`] is serialized as one line of JSON and flushed
//! immediately, so a crash never loses an acknowledged record.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::repository::{GameResult, GameResultRepository, RepositoryError, Result};

pub struct FileResultLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileResultLog {
    /// Opens `path` for appending, creating parent directories and the file
    /// when missing.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameResultRepository for FileResultLog {
    fn record(&self, result: &GameResult) -> Result<()> {
        let line = serde_json::to_string(result)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<GameResult>> {
        let file = File::open(&self.path)?;
        let mut results = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            results.push(serde_json::from_str(&line)?);
        }
        Ok(results)
    }
}
