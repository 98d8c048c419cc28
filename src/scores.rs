use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const MAGIC: &[u8; 4] = b"AIHS";
// 4 magic + 4-byte little-endian score
const FILE_SIZE: usize = 8;
const FILE_NAME: &str = "alien_invasion.score";

/// Where the best score lives between runs.
pub trait HighScoreStore {
    /// Returns 0 when nothing usable is stored.
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32) -> Result<()>;
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the executable, or in the working directory as a fallback.
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(FILE_NAME);
            }
        }
        PathBuf::from(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(data: &[u8]) -> Option<u32> {
        if data.len() != FILE_SIZE || &data[0..4] != MAGIC {
            return None;
        }
        let bytes: [u8; 4] = [data[4], data[5], data[6], data[7]];
        Some(u32::from_le_bytes(bytes))
    }

    fn encode(score: u32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&score.to_le_bytes());
        buf
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&self) -> u32 {
        let Ok(data) = fs::read(&self.path) else {
            log::info!("no high score at {}, starting from 0", self.path.display());
            return 0;
        };
        match Self::decode(&data) {
            Some(score) => score,
            None => {
                log::warn!(
                    "ignoring malformed high score file {} ({} bytes)",
                    self.path.display(),
                    data.len()
                );
                0
            }
        }
    }

    /// Writes a sibling temp file and renames it over the old one, so an
    /// abrupt exit leaves either the old or the new score on disk.
    fn save_high_score(&mut self, score: u32) -> Result<()> {
        let tmp = self.path.with_extension("score.tmp");
        fs::write(&tmp, Self::encode(score))
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        log::debug!("saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;


#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "alien_invasion_{}_{}.score",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_loads_zero() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn saved_score_is_loaded_back() {
        let path = temp_path("saved");
        let mut store = FileStore::new(&path);
        store.save_high_score(4200).unwrap();
        store.save_high_score(4350).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load_high_score(), 4350);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_loads_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, b"not a score").unwrap();
        assert_eq!(FileStore::new(&path).load_high_score(), 0);

        fs::write(&path, b"XXXX\x01\x00\x00\x00").unwrap();
        assert_eq!(FileStore::new(&path).load_high_score(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = temp_path("no_such_dir");
        let mut store = FileStore::new(dir.join("nested").join(FILE_NAME));
        assert!(store.save_high_score(10).is_err());
    }
}
