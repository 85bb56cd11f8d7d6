//! On-disk cache of downloaded puzzle inputs

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;

/// Inputs stored as `{base_dir}/{year}/day{day:02}.txt`
pub struct InputCache {
    base_dir: PathBuf,
}

impl InputCache {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn year_dir(&self, year: u16) -> PathBuf {
        self.base_dir.join(year.to_string())
    }

    /// Path an input for year/day lives at
    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.year_dir(year).join(format!("day{:02}.txt", day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Cached input, or `None` when nothing is stored yet
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(year, day);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Store an input, creating the year directory on first use
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        let dir = self.year_dir(year);
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::DirCreation(format!("Failed to create {}: {}", dir.display(), e)))?;
        fs::write(self.cache_path(year, day), input)?;
        Ok(())
    }
}
