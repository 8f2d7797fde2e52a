//! Composable filter chain synthesis
//!
//! Queued composable filters (`scale`, `crop`, `boxblur`, ...) are fused into one
//! `-filter_complex` expression. Each step reads the previous step's link label and
//! writes a fresh one:
//!
//! ```text
//! [0]scale=1280:720[s1a2b3];[s1a2b3]boxblur=5[s4c5d6]
//! ```
//!
//! Only the first operation of each kind survives a pass; later ones of the same
//! kind are drained and reported as skipped.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::model::{Category, EditRequest, MediaKind, OperationKey};
use crate::planner::store::PendingEditStore;

/// Pad the first step reads from
const PRIMARY_INPUT: &str = "0";
/// Audio of the primary input, optional so silent videos still map
const PRIMARY_AUDIO: &str = "0:a?";

/// A synthesized filter graph and how its output is mapped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterGraph {
    pub expression: String,
    /// Link labels in creation order; the last one is the output
    pub labels: Vec<String>,
    pub remap_audio: bool,
    pub applied: Vec<EditRequest>,
    pub skipped: Vec<EditRequest>,
}

impl FilterGraph {
    pub fn output_label(&self) -> &str {
        self.labels.last().map(String::as_str).unwrap_or_default()
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            Category::COMPOSABLE_FILTER.flag().to_string(),
            self.expression.clone(),
            "-map".to_string(),
            format!("[{}]", self.output_label()),
        ];
        if self.remap_audio {
            args.push("-map".to_string());
            args.push(PRIMARY_AUDIO.to_string());
        }
        args
    }
}

/// Merges every pending composable filter into one chain
#[derive(Debug, Clone)]
pub struct FilterChainSynthesizer {
    kind: MediaKind,
}

impl FilterChainSynthesizer {
    pub fn new(kind: MediaKind) -> Self {
        Self { kind }
    }

    /// Drain all queued composable filters from the store into one graph
    pub fn synthesize(&self, store: &mut PendingEditStore) -> Option<FilterGraph> {
        let requests = store.drain_category(Category::COMPOSABLE_FILTER);
        self.build(requests)
    }

    /// Build a graph from an ordered list of composable requests
    pub fn build(&self, requests: Vec<EditRequest>) -> Option<FilterGraph> {
        let mut seen_keys: HashSet<OperationKey> = HashSet::new();
        let mut used_labels: HashSet<String> = HashSet::new();
        let mut steps = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for request in requests {
            let Some(expression) = request.expression() else {
                warn!(key = %request.key, "Composable edit without a filter expression skipped");
                skipped.push(request);
                continue;
            };
            if !seen_keys.insert(request.key.clone()) {
                debug!(key = %request.key, "Duplicate filter kind in one chain, keeping the first");
                skipped.push(request);
                continue;
            }

            let input = labels
                .last()
                .cloned()
                .unwrap_or_else(|| PRIMARY_INPUT.to_string());
            let output = fresh_label(&mut used_labels);
            steps.push(format!("[{}]{}[{}]", input, expression, output));
            labels.push(output);
            applied.push(request);
        }

        if steps.is_empty() {
            return None;
        }

        Some(FilterGraph {
            expression: steps.join(";"),
            labels,
            remap_audio: self.kind == MediaKind::Video,
            applied,
            skipped,
        })
    }
}

fn fresh_label(used: &mut HashSet<String>) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        let label = format!("s{}", &id[..6]);
        if used.insert(label.clone()) {
            return label;
        }
    }
}
