// Domain rules - Which operation categories may share one invocation

use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Default video groups. Seek stays alone so a trim-only stage can stream copy.
pub const DEFAULT_VIDEO_RULES: &[&str] = &["-aspect|-filter:a", "-filter_complex", "-ss"];

/// Default audio groups. `-filter:a` and `-af` are the same ffmpeg option, so they
/// never share an invocation.
pub const DEFAULT_AUDIO_RULES: &[&str] = &["-filter:a", "-af", "-filter_complex", "-ss"];

/// Ordered list of `|`-delimited category groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    groups: Vec<String>,
}

impl RuleSet {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn default_video() -> Self {
        Self::new(DEFAULT_VIDEO_RULES.iter().copied())
    }

    pub fn default_audio() -> Self {
        Self::new(DEFAULT_AUDIO_RULES.iter().copied())
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Parse every group into categories, rejecting malformed rules
    pub fn parse_groups(&self) -> Result<Vec<Vec<Category>>, DomainError> {
        if self.groups.is_empty() {
            return Err(DomainError::InvalidRules(
                "rule set contains no groups".to_string(),
            ));
        }

        self.groups
            .iter()
            .enumerate()
            .map(|(index, group)| Self::parse_group(index, group))
            .collect()
    }

    fn parse_group(index: usize, group: &str) -> Result<Vec<Category>, DomainError> {
        if group.trim().is_empty() {
            return Err(DomainError::InvalidRules(format!("group {} is empty", index)));
        }

        group
            .split('|')
            .map(|token| {
                if token.trim().is_empty() {
                    return Err(DomainError::InvalidRules(format!(
                        "group {} ('{}') has an empty category",
                        index, group
                    )));
                }
                Category::parse(token)
            })
            .collect()
    }
}

/// Rule sets for every media kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    #[serde(default = "RuleSet::default_video")]
    pub video: RuleSet,
    #[serde(default = "RuleSet::default_audio")]
    pub audio: RuleSet,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self {
            video: RuleSet::default_video(),
            audio: RuleSet::default_audio(),
        }
    }
}

impl RuleBook {
    pub fn for_kind(&self, kind: MediaKind) -> &RuleSet {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }

    /// Validate both rule sets
    pub fn validate(&self) -> Result<(), DomainError> {
        self.video.parse_groups()?;
        self.audio.parse_groups()?;
        Ok(())
    }
}
