use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// An R script loaded for checking.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

impl SourceFile {
    /// Reads `path`, dropping a leading byte-order mark so that the first
    /// token still starts at column 1.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read R script {}", path.display()))?;
        let contents = match raw.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => raw,
        };
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// 1-based source line, without its terminator.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.contents.lines().nth(index))
    }
}
