// Domain models - Core types and data structures

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Create a new TimeSpec from hours, minutes, seconds, milliseconds
    pub fn from_components(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let total_seconds = hours as f64 * 3600.0
            + minutes as f64 * 60.0
            + seconds as f64
            + milliseconds as f64 / 1000.0;
        Self {
            seconds: total_seconds,
        }
    }

    /// Convert to Duration
    pub fn to_duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds.max(0.0))
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!(
                    "Time must be a non-negative number: {}",
                    trimmed
                )));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = parse_component(minutes, "minutes")?;
                let seconds = parse_seconds(seconds)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = parse_component(hours, "hours")?;
                let minutes = parse_component(minutes, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60".to_string(),
                    ));
                }
                let seconds = parse_seconds(seconds)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                trimmed
            ))),
        }
    }

    /// Format as a zero-padded `HH:MM:SS.mmm` timestamp accepted by ffmpeg
    pub fn to_timestamp(&self) -> String {
        let total_millis = (self.seconds * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let seconds = (total_millis % 60_000) / 1000;
        let millis = total_millis % 1000;
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

fn parse_component(part: &str, name: &str) -> Result<u32, DomainError> {
    part.trim()
        .parse::<u32>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid {} format: {}", name, part)))
}

fn parse_seconds(part: &str) -> Result<f64, DomainError> {
    let seconds = part
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid seconds format: {}", part)))?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(DomainError::BadArgs(
            "Seconds must be between 0 and 60".to_string(),
        ));
    }
    Ok(seconds)
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_timestamp())
    }
}

/// Kind of media an asset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac", "m4a", "ogg", "opus"];

impl MediaKind {
    /// Detect the media kind from a file extension (with or without the leading dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim_start_matches('.').to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Audio)
        } else {
            None
        }
    }

    /// Whether edits of `category` can be applied to this kind of media
    pub fn accepts(&self, category: Category) -> bool {
        match self {
            MediaKind::Video => category != Category::EQUALIZER,
            MediaKind::Audio => category != Category::ASPECT,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
        }
    }
}

/// Invocation flag class. Categories are the nodes of the compatibility graph.
///
/// The set is closed: [`Category::parse`] refuses tokens it does not know, so a
/// misspelled rule can never introduce a node nothing will ever be queued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Category(&'static str);

impl Category {
    /// Composable filter graph (`scale`, `crop`, `boxblur`, ...)
    pub const COMPOSABLE_FILTER: Category = Category("-filter_complex");
    /// Seek/trim (`-ss <start> -to <end>`)
    pub const SEEK: Category = Category("-ss");
    /// Display aspect ratio
    pub const ASPECT: Category = Category("-aspect");
    /// Simple audio filter (`volume`, `atempo`)
    pub const AUDIO_FILTER: Category = Category("-filter:a");
    /// Audio equalizer
    pub const EQUALIZER: Category = Category("-af");

    pub const ALL: [Category; 5] = [
        Category::COMPOSABLE_FILTER,
        Category::SEEK,
        Category::ASPECT,
        Category::AUDIO_FILTER,
        Category::EQUALIZER,
    ];

    /// Parse a rule token into a known category
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let token = token.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.0 == token)
            .ok_or_else(|| DomainError::InvalidRules(format!("Unknown category: '{}'", token)))
    }

    /// Invocation flag this category is written as
    pub fn flag(&self) -> &'static str {
        self.0
    }

    pub fn is_composable(&self) -> bool {
        *self == Category::COMPOSABLE_FILTER
    }

    pub fn is_seek(&self) -> bool {
        *self == Category::SEEK
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Kind of an operation inside a category, used to dedupe composable filters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OperationKey(String);

impl OperationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value carried by an edit request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditValue {
    /// Filter or flag expression, passed through as a single argument
    Expr(String),
    /// Time span for seek/trim
    Span { start: TimeSpec, end: TimeSpec },
}

impl fmt::Display for EditValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditValue::Expr(expr) => f.write_str(expr),
            EditValue::Span { start, end } => write!(f, "{} -to {}", start, end),
        }
    }
}

/// A single requested edit, queued under its category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditRequest {
    pub category: Category,
    pub key: OperationKey,
    pub value: EditValue,
}

impl EditRequest {
    /// Create an expression-valued edit
    pub fn expr(category: Category, key: &str, value: impl Into<String>) -> Self {
        Self {
            category,
            key: OperationKey::new(key),
            value: EditValue::Expr(value.into()),
        }
    }

    /// Create a seek/trim edit
    pub fn trim(start: TimeSpec, end: TimeSpec) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) cannot be after end ({})",
                start, end
            )));
        }
        Ok(Self {
            category: Category::SEEK,
            key: OperationKey::new("trim"),
            value: EditValue::Span { start, end },
        })
    }

    /// Flag/value arguments this edit contributes to an invocation
    pub fn to_args(&self) -> Vec<String> {
        match &self.value {
            EditValue::Expr(expr) => vec![self.category.flag().to_string(), expr.clone()],
            EditValue::Span { start, end } => vec![
                self.category.flag().to_string(),
                start.to_timestamp(),
                "-to".to_string(),
                end.to_timestamp(),
            ],
        }
    }

    /// Filter expression for composable edits; spans have none
    pub fn expression(&self) -> Option<&str> {
        match &self.value {
            EditValue::Expr(expr) => Some(expr),
            EditValue::Span { .. } => None,
        }
    }
}

/// Display aspect ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio(1.0);
    pub const STANDARD: AspectRatio = AspectRatio(16.0 / 9.0);
    /// YouTube Shorts, Reels, TikTok
    pub const SHORTS: AspectRatio = AspectRatio(9.0 / 16.0);
    /// Landscape platform videos
    pub const VIDEOS: AspectRatio = AspectRatio(16.0 / 9.0);

    pub fn new(ratio: f64) -> Result<Self, DomainError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Aspect ratio must be positive: {}",
                ratio
            )));
        }
        Ok(Self(ratio))
    }

    /// Parse `W:H`, a decimal ratio, or a preset name
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let text = text.trim();
        match text.to_lowercase().as_str() {
            "square" => return Ok(Self::SQUARE),
            "standard" => return Ok(Self::STANDARD),
            "shorts" => return Ok(Self::SHORTS),
            "videos" => return Ok(Self::VIDEOS),
            _ => {}
        }

        if let Some((w, h)) = text.split_once(':') {
            let w: f64 = w
                .trim()
                .parse()
                .map_err(|_| DomainError::BadArgs(format!("Invalid aspect ratio: {}", text)))?;
            let h: f64 = h
                .trim()
                .parse()
                .map_err(|_| DomainError::BadArgs(format!("Invalid aspect ratio: {}", text)))?;
            if h == 0.0 {
                return Err(DomainError::BadArgs(format!("Invalid aspect ratio: {}", text)));
            }
            return Self::new(w / h);
        }

        let ratio: f64 = text
            .parse()
            .map_err(|_| DomainError::BadArgs(format!("Invalid aspect ratio: {}", text)))?;
        Self::new(ratio)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Argument form for `-aspect`
    pub fn to_arg(&self) -> String {
        format!("{:.6}", self.0)
    }
}

/// Metadata read from a media file by the probe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaInfo {
    pub container: Option<String>,
    pub duration: Option<TimeSpec>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f64>,
    pub display_aspect_ratio: Option<String>,
    pub has_video: bool,
    pub has_audio: bool,
}

/// A fully built external tool command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-like rendering used for logging and dry runs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.is_empty() || part.contains(char::is_whitespace) || part.contains(';') {
                    format!("'{}'", part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Result of running an invocation to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Captured stdout followed by stderr
    pub output: String,
}

#[cfg(test)]
mod tests;
