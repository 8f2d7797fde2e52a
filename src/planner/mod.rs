//! Render-staging planner
//!
//! Turns the edits queued on an asset into an ordered list of [`Stage`]s, each of
//! which becomes one external tool invocation.

use serde::Serialize;

use crate::domain::model::{Category, EditRequest};

pub mod filter_chain;
pub mod graph;
pub mod scheduler;
pub mod store;

pub use filter_chain::{FilterChainSynthesizer, FilterGraph};
pub use graph::CompatibilityGraph;
pub use scheduler::{Schedule, StageScheduler};
pub use store::PendingEditStore;

/// One piece of a stage's argument list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageEntry {
    /// A plain `flag value` pair taken from one category queue
    Flag { request: EditRequest },
    /// A synthesized composable filter chain
    FilterGraph { graph: FilterGraph },
}

impl StageEntry {
    pub fn category(&self) -> Category {
        match self {
            StageEntry::Flag { request } => request.category,
            StageEntry::FilterGraph { .. } => Category::COMPOSABLE_FILTER,
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        match self {
            StageEntry::Flag { request } => request.to_args(),
            StageEntry::FilterGraph { graph } => graph.to_args(),
        }
    }
}

/// A group of edits that execute together in one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stage {
    entries: Vec<StageEntry>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_filter_graph(graph: FilterGraph) -> Self {
        Self {
            entries: vec![StageEntry::FilterGraph { graph }],
        }
    }

    pub fn push_flag(&mut self, request: EditRequest) {
        self.entries.push(StageEntry::Flag { request });
    }

    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories in the order they were merged into this stage
    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(StageEntry::category).collect()
    }

    /// True when the stage holds nothing but a single seek/trim
    pub fn is_trim_only(&self) -> bool {
        matches!(self.entries.as_slice(), [StageEntry::Flag { request }] if request.category.is_seek())
    }

    /// Stage-specific invocation arguments (without input, codec and output)
    pub fn args(&self) -> Vec<String> {
        self.entries.iter().flat_map(StageEntry::to_args).collect()
    }
}

/// How a stage writes its output streams
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CodecDecision {
    /// Re-container without re-encoding
    Copy,
    /// Re-encode with the given codecs; `None` leaves the tool's default
    Reencode {
        video: Option<String>,
        audio: Option<String>,
    },
}

impl CodecDecision {
    pub fn is_copy(&self) -> bool {
        matches!(self, CodecDecision::Copy)
    }
}

impl std::fmt::Display for CodecDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecDecision::Copy => write!(f, "copy"),
            CodecDecision::Reencode { video, audio } => write!(
                f,
                "re-encode (video: {}, audio: {})",
                video.as_deref().unwrap_or("default"),
                audio.as_deref().unwrap_or("default")
            ),
        }
    }
}
