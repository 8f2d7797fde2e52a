// Inspect interactor - Orchestrates media file inspection use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::{MediaInfo, MediaKind};
use crate::ports::ProbePort;
use crate::utils::path::PathUtils;
use crate::utils::Utils;

/// Inspection result
#[derive(Debug, Clone, Serialize)]
pub struct InspectResponse {
    pub path: PathBuf,
    pub kind: Option<MediaKind>,
    pub file_size: u64,
    pub media_info: MediaInfo,
}

impl InspectResponse {
    /// Human-readable summary
    pub fn to_text(&self) -> String {
        let info = &self.media_info;
        let mut output = String::new();

        output.push_str("Media File Information:\n");
        output.push_str(&format!("  File: {}\n", self.path.display()));
        output.push_str(&format!(
            "  Kind: {}\n",
            self.kind.map_or("unknown".to_string(), |kind| kind.to_string())
        ));
        if let Some(container) = &info.container {
            output.push_str(&format!("  Container: {}\n", container));
        }
        if let Some(duration) = info.duration {
            output.push_str(&format!(
                "  Duration: {}\n",
                Utils::format_duration(duration.to_duration())
            ));
        }
        output.push_str(&format!(
            "  File Size: {}\n",
            Utils::format_file_size(self.file_size)
        ));
        if let (Some(width), Some(height)) = (info.width, info.height) {
            output.push_str(&format!("  Resolution: {}x{}\n", width, height));
        }
        if let Some(fps) = info.frame_rate {
            output.push_str(&format!("  Frame Rate: {:.2} fps\n", fps));
        }
        if let Some(dar) = &info.display_aspect_ratio {
            output.push_str(&format!("  Aspect Ratio: {}\n", dar));
        }
        output.push_str(&format!(
            "  Streams: video={} audio={}\n",
            info.has_video, info.has_audio
        ));
        output
    }
}

/// Interactor for media file inspection use case
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl InspectInteractor {
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    pub async fn inspect(&self, path: &Path) -> Result<InspectResponse, DomainError> {
        info!("Starting media file inspection for: {}", path.display());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| DomainError::FileNotFound(path.display().to_string()))?;
        let media_info = self.probe_port.probe_media(path).await?;

        Ok(InspectResponse {
            path: path.to_path_buf(),
            kind: PathUtils::media_kind(path),
            file_size: metadata.len(),
            media_info,
        })
    }
}
