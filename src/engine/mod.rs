//! Stage execution engine

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SplicerError, SplicerResult};

pub mod command;
pub mod pipeline;

pub use command::CommandBuilder;
pub use pipeline::{
    create_scratch_dir, move_into_place, ExecutionPipeline, RenderReport, StageReport,
    SCRATCH_PREFIX,
};

/// Highest CRF value ffmpeg's x264/x265 encoders accept
pub const MAX_CRF: u8 = 51;

/// Named video encodings accepted wherever a codec is
pub const VIDEO_ENCODINGS: &[(&str, &str)] = &[
    ("best", "libx264"),
    ("efficient", "libvpx-vp9"),
    ("compressed", "libaom-av1"),
];

/// Map an encoding name to its encoder; anything else is taken as an encoder name
pub fn resolve_video_codec(name: &str) -> &str {
    VIDEO_ENCODINGS
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name.trim()))
        .map_or(name, |(_, codec)| *codec)
}

/// What to do when a stage invocation exits unsuccessfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the render; the destination is left untouched
    #[default]
    Abort,
    /// Log the failure and keep going with the newest output that exists
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = SplicerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "continue" => Ok(FailurePolicy::Continue),
            other => Err(SplicerError::ConfigError {
                message: format!(
                    "Invalid failure policy '{}'. Valid values: abort, continue",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Abort => write!(f, "abort"),
            FailurePolicy::Continue => write!(f, "continue"),
        }
    }
}

/// Execution engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// ffmpeg executable
    pub ffmpeg_path: String,
    /// ffprobe executable
    pub ffprobe_path: String,
    /// Video codec used whenever a video stage re-encodes
    pub video_codec: String,
    /// Audio codec; `None` keeps ffmpeg's default for the container
    pub audio_codec: Option<String>,
    /// CRF quality setting
    pub crf: Option<u8>,
    /// Encoding preset
    pub preset: Option<String>,
    /// Thread count; `0` means one per logical CPU
    pub threads: Option<usize>,
    /// Root for per-render scratch directories; defaults to the output's directory
    pub scratch_dir: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: None,
            crf: None,
            preset: None,
            threads: None,
            scratch_dir: None,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> SplicerResult<()> {
        if self.ffmpeg_path.trim().is_empty() {
            return Err(SplicerError::ConfigError {
                message: "ffmpeg_path cannot be empty".to_string(),
            });
        }
        if self.ffprobe_path.trim().is_empty() {
            return Err(SplicerError::ConfigError {
                message: "ffprobe_path cannot be empty".to_string(),
            });
        }
        if self.video_codec.trim().is_empty() {
            return Err(SplicerError::ConfigError {
                message: "video_codec cannot be empty".to_string(),
            });
        }
        if let Some(crf) = self.crf {
            if crf > MAX_CRF {
                return Err(SplicerError::ConfigError {
                    message: format!("CRF value cannot exceed {}: {}", MAX_CRF, crf),
                });
            }
        }
        Ok(())
    }

    /// Value for `-threads`, if any
    pub fn effective_threads(&self) -> Option<usize> {
        match self.threads {
            Some(0) => Some(num_cpus::get()),
            other => other,
        }
    }
}
