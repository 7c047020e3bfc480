//! The category name list.
//!
//! A newline-delimited file of distinct, sorted names, rewritten wholesale
//! on each addition. The list is advisory: records are never validated
//! against it.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    path: PathBuf,
}

impl CategoryRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All known category names, sorted. A missing file means no categories.
    pub fn load(&self) -> Result<Vec<String>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::ReadCategories {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let mut names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Add a name and rewrite the whole list, keeping it distinct and
    /// sorted. Blank names are ignored. Returns the updated list.
    pub fn add(&self, name: &str) -> Result<Vec<String>, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return self.load();
        }
        let mut names = self.load()?;
        names.push(name.to_string());
        names.sort();
        names.dedup();
        std::fs::write(&self.path, names.join("\n") + "\n").map_err(|source| {
            StorageError::WriteCategories {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(names)
    }
}
