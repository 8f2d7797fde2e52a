//! Stage scheduling over the compatibility graph

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::model::{Category, EditRequest, MediaKind};
use crate::planner::filter_chain::FilterChainSynthesizer;
use crate::planner::graph::CompatibilityGraph;
use crate::planner::store::PendingEditStore;
use crate::planner::Stage;

/// Ordered stages plus anything the scheduler could not place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub stages: Vec<Stage>,
    /// Edits left over when a round made no progress
    pub dropped: Vec<EditRequest>,
}

impl Schedule {
    /// No stages means there is nothing to invoke
    pub fn is_noop(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Drains a [`PendingEditStore`] into stages, one round at a time
pub struct StageScheduler<'a> {
    graph: &'a CompatibilityGraph,
    synthesizer: FilterChainSynthesizer,
}

impl<'a> StageScheduler<'a> {
    pub fn new(graph: &'a CompatibilityGraph, kind: MediaKind) -> Self {
        Self {
            graph,
            synthesizer: FilterChainSynthesizer::new(kind),
        }
    }

    /// Schedule every queued edit. The store is empty afterwards.
    pub fn schedule(&self, store: &mut PendingEditStore) -> Schedule {
        let mut stages = Vec::new();
        let mut round = 0usize;

        while store.has_any() {
            round += 1;
            let produced = self.run_round(store, &mut stages);
            debug!(round, produced, remaining = store.len(), "Scheduling round finished");
            if produced == 0 {
                break;
            }
        }

        let dropped = store.drain_all();
        if !dropped.is_empty() {
            let categories: Vec<String> = dropped
                .iter()
                .map(|request| format!("{}({})", request.category, request.key))
                .collect();
            warn!(
                round,
                count = dropped.len(),
                "Scheduling stalled; dropping edits no rule can place: {}",
                categories.join(", ")
            );
        }

        let stages = trims_first(stages);
        info!(stages = stages.len(), "Render stages scheduled");
        Schedule { stages, dropped }
    }

    /// One pass over the graph. Returns the number of stages appended.
    fn run_round(&self, store: &mut PendingEditStore, stages: &mut Vec<Stage>) -> usize {
        let before = stages.len();
        let mut visited: HashSet<Category> = HashSet::new();

        for category in self.graph.categories() {
            if visited.contains(&category) || store.queue_len(category) == 0 {
                continue;
            }

            if category.is_composable() {
                visited.insert(category);
                if let Some(graph) = self.synthesizer.synthesize(store) {
                    stages.push(Stage::from_filter_graph(graph));
                }
                continue;
            }

            let Some(head) = store.dequeue_head(category) else {
                continue;
            };
            visited.insert(category);

            let mut stage = Stage::new();
            stage.push_flag(head);
            let mut members = vec![category];

            for neighbor in self.graph.neighbors(category) {
                if visited.contains(&neighbor)
                    || neighbor.is_composable()
                    || store.queue_len(neighbor) == 0
                {
                    continue;
                }
                // Overlapping groups can make neighbors of `category` incompatible
                // with each other.
                if !members
                    .iter()
                    .all(|member| self.graph.are_compatible(*member, neighbor))
                {
                    continue;
                }
                if let Some(request) = store.dequeue_head(neighbor) {
                    stage.push_flag(request);
                    visited.insert(neighbor);
                    members.push(neighbor);
                }
            }

            debug!(categories = ?members, "Stage assembled");
            stages.push(stage);
        }

        stages.len() - before
    }
}

/// Move trim-only stages to the front, keeping relative order within both groups
pub fn trims_first(stages: Vec<Stage>) -> Vec<Stage> {
    let (mut trims, rest): (Vec<Stage>, Vec<Stage>) =
        stages.into_iter().partition(Stage::is_trim_only);
    trims.extend(rest);
    trims
}
