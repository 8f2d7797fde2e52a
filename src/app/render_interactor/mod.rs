// Render interactor - Orchestrates schedule, execute and reload

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::model::{EditRequest, MediaKind};
use crate::domain::rules::RuleBook;
use crate::engine::{CommandBuilder, EngineConfig, ExecutionPipeline, RenderReport};
use crate::error::{SplicerError, SplicerResult};
use crate::media::{MediaAsset, MediaSource};
use crate::planner::{CodecDecision, CompatibilityGraph, Schedule, StageScheduler};
use crate::ports::{ExecutePort, ProbePort};

/// How a render ended
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    /// Nothing was queued; no process was started
    NoOp,
    Rendered(RenderReport),
    /// The render did not take effect
    Failed { reason: String },
}

/// The asset to continue with plus what happened
///
/// On `Rendered` the asset is the freshly loaded output. Otherwise it is the
/// original asset with its queued edits intact.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub asset: MediaAsset,
    pub outcome: RenderOutcome,
}

impl RenderResult {
    fn failed(asset: MediaAsset, error: SplicerError) -> Self {
        error!("Render failed: {}", error);
        Self {
            asset,
            outcome: RenderOutcome::Failed {
                reason: error.to_string(),
            },
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.outcome, RenderOutcome::Rendered(_))
    }
}

/// One stage of a dry run
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStage {
    pub index: usize,
    pub categories: Vec<String>,
    pub codec: CodecDecision,
    pub command: String,
}

/// Everything a render would do, without doing it
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: MediaKind,
    pub stages: Vec<PlannedStage>,
    pub dropped: Vec<EditRequest>,
}

/// Interactor for the render use case
pub struct RenderInteractor {
    probe_port: Arc<dyn ProbePort>,
    pipeline: ExecutionPipeline,
    rules: RuleBook,
}

impl RenderInteractor {
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        engine: EngineConfig,
        rules: RuleBook,
    ) -> Self {
        Self {
            probe_port,
            pipeline: ExecutionPipeline::new(execute_port, engine),
            rules,
        }
    }

    /// Schedule the asset's queued edits. The asset itself is left untouched.
    pub fn schedule(&self, asset: &MediaAsset) -> SplicerResult<Schedule> {
        let graph = CompatibilityGraph::for_kind(self.rules.for_kind(asset.kind()), asset.kind())
            .map_err(|e| SplicerError::RuleConfigError {
                message: e.to_string(),
            })?;
        let mut pending = asset.edits().clone();
        Ok(StageScheduler::new(&graph, asset.kind()).schedule(&mut pending))
    }

    /// Dry run: stages and command lines with placeholder intermediate files
    pub fn plan(&self, asset: &MediaAsset, output: &Path) -> SplicerResult<RenderPlan> {
        let schedule = self.schedule(asset)?;
        let builder = CommandBuilder::new(self.pipeline.config(), asset.kind());
        let extension = asset.extension();
        let intermediate = |n: usize| PathBuf::from(format!("<stage-{}>.{}", n, extension));

        let total = schedule.stages.len();
        let stages = schedule
            .stages
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let input = if i == 0 {
                    asset.file_path().to_path_buf()
                } else {
                    intermediate(i)
                };
                let stage_output = if i + 1 == total {
                    output.to_path_buf()
                } else {
                    intermediate(i + 1)
                };
                let (invocation, codec) =
                    builder.build(stage, schedule.stages.get(i + 1), &input, &stage_output);
                PlannedStage {
                    index: i + 1,
                    categories: stage.categories().iter().map(ToString::to_string).collect(),
                    codec,
                    command: invocation.command_line(),
                }
            })
            .collect();

        Ok(RenderPlan {
            input: asset.file_path().to_path_buf(),
            output: output.to_path_buf(),
            kind: asset.kind(),
            stages,
            dropped: schedule.dropped,
        })
    }

    /// Render the asset's queued edits into `output`
    pub async fn render(&self, asset: MediaAsset, output: &Path) -> RenderResult {
        info!(
            input = %asset.file_path().display(),
            output = %output.display(),
            edits = asset.edits().len(),
            "Starting render"
        );

        let schedule = match self.schedule(&asset) {
            Ok(schedule) => schedule,
            Err(e) => return RenderResult::failed(asset, e),
        };
        if schedule.is_noop() {
            warn!("No edits to apply, skipping render");
            return RenderResult {
                asset,
                outcome: RenderOutcome::NoOp,
            };
        }

        let report = match self.pipeline.execute(&schedule.stages, &asset, output).await {
            Ok(report) => report,
            Err(e) => return RenderResult::failed(asset, e),
        };

        match MediaAsset::load(output, self.probe_port.as_ref()).await {
            Ok(rendered) => RenderResult {
                asset: rendered,
                outcome: RenderOutcome::Rendered(report),
            },
            Err(e) => RenderResult::failed(
                asset,
                SplicerError::OutputError {
                    message: format!("{} cannot be loaded: {}", output.display(), e),
                },
            ),
        }
    }
}
