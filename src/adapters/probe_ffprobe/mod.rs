//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` with JSON output and maps the result onto [`MediaInfo`].

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{MediaInfo, TimeSpec};
use crate::ports::ProbePort;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    display_aspect_ratio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FFprobeAdapter {
    program: String,
}

impl FFprobeAdapter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_media(&self, file_path: &Path) -> Result<MediaInfo, DomainError> {
        if !file_path.exists() {
            return Err(DomainError::FileNotFound(file_path.display().to_string()));
        }

        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=format_name,duration:stream=codec_type,width,height,avg_frame_rate,display_aspect_ratio",
                "-of",
                "json",
            ])
            .arg(file_path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::ProbeFailed(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(DomainError::ProbeFailed(format!(
                "{} exited with {:?}: {}",
                self.program,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let info = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
        debug!(path = %file_path.display(), ?info, "Probed media");
        Ok(info)
    }
}

/// Map ffprobe's JSON onto [`MediaInfo`], taking the first video stream for geometry
pub fn parse_probe_output(json: &str) -> Result<MediaInfo, DomainError> {
    let parsed: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::ProbeFailed(format!("Failed to parse ffprobe output: {}", e)))?;

    let video = parsed
        .streams
        .iter()
        .find(|stream| stream.codec_type.as_deref() == Some("video"));
    let has_audio = parsed
        .streams
        .iter()
        .any(|stream| stream.codec_type.as_deref() == Some("audio"));

    let (container, duration) = match parsed.format {
        Some(format) => (
            format.format_name,
            format
                .duration
                .and_then(|d| d.parse::<f64>().ok())
                .map(TimeSpec::from_seconds),
        ),
        None => (None, None),
    };

    Ok(MediaInfo {
        container,
        duration,
        width: video.and_then(|v| v.width),
        height: video.and_then(|v| v.height),
        frame_rate: video
            .and_then(|v| v.avg_frame_rate.as_deref())
            .and_then(parse_frame_rate),
        display_aspect_ratio: video
            .and_then(|v| v.display_aspect_ratio.clone())
            .filter(|dar| dar != "0:1"),
        has_video: video.is_some(),
        has_audio,
    })
}

/// `30000/1001` style rate; `0/0` means unknown
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 || num == 0.0 {
        return None;
    }
    Some(num / den)
}
