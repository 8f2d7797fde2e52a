//! Application configuration
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "compact"
//!
//! [engine]
//! video_codec = "libx264"
//! crf = 20
//! failure_policy = "abort"
//!
//! [rules]
//! video = ["-aspect|-filter:a", "-filter_complex", "-ss"]
//! audio = ["-filter:a", "-af", "-filter_complex", "-ss"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::rules::RuleBook;
use crate::engine::EngineConfig;
use crate::error::{SplicerError, SplicerResult};
use crate::utils::logging::LoggingConfig;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SPLICER_";

/// Complete configuration, one section per concern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplicerConfig {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub rules: RuleBook,
}

impl SplicerConfig {
    pub fn validate(&self) -> SplicerResult<()> {
        self.engine.validate()?;
        self.rules
            .validate()
            .map_err(|e| SplicerError::RuleConfigError {
                message: e.to_string(),
            })
    }

    /// Apply `SPLICER_*` variables. Unrelated variables are ignored.
    /// Returns the number of overrides applied.
    pub fn apply_env_overrides<I, K, V>(&mut self, vars: I) -> SplicerResult<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut applied = 0;
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref().trim();
            let engine = &mut self.engine;
            match name {
                "LOG_LEVEL" => self.logging.level = value.parse()?,
                "LOG_FORMAT" => self.logging.format = value.parse()?,
                "FFMPEG" => engine.ffmpeg_path = value.to_string(),
                "FFPROBE" => engine.ffprobe_path = value.to_string(),
                "VIDEO_CODEC" => engine.video_codec = value.to_string(),
                "AUDIO_CODEC" => engine.audio_codec = Some(value.to_string()),
                "CRF" => engine.crf = Some(parse_number(name, value)?),
                "PRESET" => engine.preset = Some(value.to_string()),
                "THREADS" => engine.threads = Some(parse_number(name, value)?),
                "SCRATCH_DIR" => engine.scratch_dir = Some(PathBuf::from(value)),
                "FAILURE_POLICY" => engine.failure_policy = value.parse()?,
                _ => continue,
            }
            debug!("Environment override: {}{} = {}", ENV_PREFIX, name, value);
            applied += 1;
        }
        Ok(applied)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> SplicerResult<T> {
    value.parse().map_err(|_| SplicerError::ConfigError {
        message: format!("{}{} must be a number, got '{}'", ENV_PREFIX, name, value),
    })
}
