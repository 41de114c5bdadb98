//! Delivering generated PDFs to the user.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::DeliveryError;

/// Destination for finished downloads.
pub trait DownloadSink: Send + Sync {
    /// Hands `payload` to the user under `filename`, returning where it landed.
    fn deliver(&self, filename: &str, payload: &[u8]) -> Result<PathBuf, DeliveryError>;
}

/// Saves downloads into a directory.
///
/// Bytes are staged in a temporary file next to the target and renamed into
/// place, so a partially written PDF never appears under the final name. The
/// staging file is removed if anything fails before the rename.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloads {
    fn deliver(&self, filename: &str, payload: &[u8]) -> Result<PathBuf, DeliveryError> {
        let mut staged = NamedTempFile::new_in(&self.dir).map_err(DeliveryError::Stage)?;
        staged.write_all(payload).map_err(DeliveryError::Stage)?;
        staged.flush().map_err(DeliveryError::Stage)?;
        debug!("Staged {} bytes at {}", payload.len(), staged.path().display());

        let target = self.dir.join(filename);
        staged
            .persist(&target)
            .map_err(|e| DeliveryError::Persist {
                filename: filename.to_string(),
                source: e.error,
            })?;
        Ok(target)
    }
}

/// Download name for a template's PDF: `Resume_<template_id>.pdf`.
///
/// Characters outside `[A-Za-z0-9_-]` are replaced with `_` so the id can't
/// point outside the download directory.
pub fn pdf_filename(template_id: Option<&str>) -> String {
    let id: String = template_id
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("Resume_{id}.pdf")
}
