// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed persistence for the OAuth credential bundle.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::CredentialBundle;

/// Stores a single [`CredentialBundle`] as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored bundle, or `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<CredentialBundle>, AppError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| AppError::TokenFormat {
                path: self.path.clone(),
                source,
            })
    }

    /// Replace the stored bundle.
    ///
    /// Writes to a sibling temp file and renames it into place, so readers
    /// see either the old bundle or the new one, never a partial file.
    pub fn save(&self, bundle: &CredentialBundle) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_vec_pretty(bundle).map_err(|source| AppError::TokenFormat {
            path: self.path.clone(),
            source,
        })?;

        // tempfile creates the file with 0600 on unix
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::info!(path = %self.path.display(), "Tokens saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> AppError {
        AppError::TokenStoreIo {
            path: self.path.clone(),
            source,
        }
    }
}
