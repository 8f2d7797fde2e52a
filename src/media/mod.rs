//! Media assets and their pending edits

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::errors::DomainError;
use crate::domain::model::{EditRequest, MediaInfo, MediaKind};
use crate::planner::PendingEditStore;
use crate::ports::ProbePort;
use crate::utils::path::PathUtils;

pub mod directive;
pub mod edits;

pub use directive::EditDirective;

/// What the render pipeline needs to know about its input
pub trait MediaSource {
    fn file_path(&self) -> &Path;
    /// Lowercased extension without the dot
    fn extension(&self) -> String;
    fn kind(&self) -> MediaKind;
}

/// A video or audio file plus the edits queued against it
#[derive(Debug, Clone)]
pub struct MediaAsset {
    path: PathBuf,
    kind: MediaKind,
    info: MediaInfo,
    edits: PendingEditStore,
}

impl MediaAsset {
    /// Create an asset without probing; metadata stays empty
    pub fn unprobed(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let kind = PathUtils::media_kind(&path).ok_or_else(|| {
            DomainError::InvalidFormat(format!("Unsupported media format: {}", path.display()))
        })?;
        Ok(Self {
            path,
            kind,
            info: MediaInfo::default(),
            edits: PendingEditStore::new(),
        })
    }

    /// Check the path, detect the kind and probe metadata
    pub async fn load(
        path: impl Into<PathBuf>,
        probe: &dyn ProbePort,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await.map_err(|_| {
            error!("{} does not exist", path.display());
            DomainError::FileNotFound(path.display().to_string())
        })?;
        if metadata.is_dir() {
            return Err(DomainError::BadArgs(format!(
                "{} is a directory",
                path.display()
            )));
        }

        let mut asset = Self::unprobed(path)?;
        asset.info = probe.probe_media(&asset.path).await?;
        debug!(path = %asset.path.display(), kind = %asset.kind, "Asset loaded");
        Ok(asset)
    }

    pub fn info(&self) -> &MediaInfo {
        &self.info
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn edits(&self) -> &PendingEditStore {
        &self.edits
    }

    pub fn has_pending_edits(&self) -> bool {
        self.edits.has_any()
    }

    pub fn clear_edits(&mut self) {
        self.edits.clear();
    }

    /// Queue a raw edit. Categories that make no sense for this kind are refused.
    pub fn push_edit(&mut self, request: EditRequest) -> Result<&mut Self, DomainError> {
        if !self.kind.accepts(request.category) {
            return Err(DomainError::UnsupportedEdit(format!(
                "{} edits are not available for {} files",
                request.category, self.kind
            )));
        }
        debug!(category = %request.category, key = %request.key, "Edit queued");
        self.edits.push(request);
        Ok(self)
    }
}

impl MediaSource for MediaAsset {
    fn file_path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> String {
        PathUtils::extension(&self.path)
    }

    fn kind(&self) -> MediaKind {
        self.kind
    }
}

#[cfg(test)]
mod tests;
