//! Sequential stage execution with temp-file chaining

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::engine::{CommandBuilder, EngineConfig, FailurePolicy};
use crate::error::{SplicerError, SplicerResult};
use crate::media::MediaSource;
use crate::planner::{CodecDecision, Stage};
use crate::ports::ExecutePort;

/// Name prefix of the per-run scratch directories
pub const SCRATCH_PREFIX: &str = ".splicer-";

/// Outcome of one stage invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    /// 1-based position in the render
    pub index: usize,
    pub command: String,
    pub codec: CodecDecision,
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// Summary of a completed render
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub output_path: PathBuf,
    pub stages: Vec<StageReport>,
}

impl RenderReport {
    pub fn failed_stages(&self) -> usize {
        self.stages.iter().filter(|stage| !stage.success).count()
    }
}

/// Runs stages in order, feeding each stage's output to the next
pub struct ExecutionPipeline {
    executor: Arc<dyn ExecutePort>,
    config: EngineConfig,
}

impl ExecutionPipeline {
    pub fn new(executor: Arc<dyn ExecutePort>, config: EngineConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute `stages` against `source` and move the result to `output`
    ///
    /// The scratch directory is removed on every exit path. On error the
    /// destination is never written.
    pub async fn execute<S>(
        &self,
        stages: &[Stage],
        source: &S,
        output: &Path,
    ) -> SplicerResult<RenderReport>
    where
        S: MediaSource + ?Sized,
    {
        if stages.is_empty() {
            return Err(SplicerError::OutputError {
                message: "No stages to execute".to_string(),
            });
        }

        let started_at = Utc::now();
        let clock = Instant::now();
        let scratch = create_scratch_dir(&self.config, output)?;
        debug!(scratch = %scratch.path().display(), "Scratch directory created");

        let builder = CommandBuilder::new(&self.config, source.kind());
        let extension = source.extension();
        let original = source.file_path().to_path_buf();
        let mut current_input = original.clone();
        let mut reports = Vec::with_capacity(stages.len());
        let total = stages.len();

        for (i, stage) in stages.iter().enumerate() {
            let index = i + 1;
            let stage_output = scratch.path().join(temp_file_name(&extension));
            let (invocation, codec) =
                builder.build(stage, stages.get(i + 1), &current_input, &stage_output);

            info!(stage = index, total, codec = %codec, "Running: {}", invocation);

            let (success, exit_code, captured) = match self.executor.run(&invocation).await {
                Ok(result) => (result.success, result.exit_code, result.output),
                Err(e) => (false, None, e.to_string()),
            };

            reports.push(StageReport {
                index,
                command: invocation.command_line(),
                codec,
                success,
                exit_code,
            });

            if success {
                current_input = stage_output;
                continue;
            }

            error!(stage = index, exit_code = ?exit_code, "Stage failed:\n{}", captured);
            match self.config.failure_policy {
                FailurePolicy::Abort => {
                    return Err(SplicerError::StageFailed {
                        stage: index,
                        exit_code,
                        output: captured,
                    });
                }
                FailurePolicy::Continue => {
                    if fs::metadata(&stage_output).await.is_ok() {
                        warn!(stage = index, "Continuing with the failed stage's output");
                        current_input = stage_output;
                    } else {
                        warn!(
                            stage = index,
                            "Stage produced no output, continuing with {}",
                            current_input.display()
                        );
                    }
                }
            }
        }

        if current_input == original {
            return Err(SplicerError::OutputError {
                message: "No stage produced an output file".to_string(),
            });
        }

        move_into_place(&current_input, output).await?;

        if let Err(e) = scratch.close() {
            warn!("Failed to remove scratch directory: {}", e);
        }

        let report = RenderReport {
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
            output_path: output.to_path_buf(),
            stages: reports,
        };
        info!(
            output = %output.display(),
            stages = report.stages.len(),
            failed = report.failed_stages(),
            "Render finished in {}ms",
            report.elapsed_ms
        );
        Ok(report)
    }
}

/// Create a scratch directory for a run writing `output`.
///
/// It goes under the configured `scratch_dir`, else next to `output`, and is
/// removed when dropped.
pub fn create_scratch_dir(config: &EngineConfig, output: &Path) -> SplicerResult<TempDir> {
    let root = match &config.scratch_dir {
        Some(dir) => dir.clone(),
        None => output
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(&root)
        .map_err(|e| SplicerError::OutputError {
            message: format!(
                "Failed to create scratch directory in {}: {}",
                root.display(),
                e
            ),
        })
}

/// Unique temp file name keeping the source container's extension
fn temp_file_name(extension: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    if extension.is_empty() {
        id
    } else {
        format!("{}.{}", id, extension)
    }
}

/// Move `from` to `to`, replacing any existing file
///
/// Falls back to copy-then-remove when a rename crosses filesystems.
pub async fn move_into_place(from: &Path, to: &Path) -> SplicerResult<()> {
    if fs::metadata(to).await.is_ok() {
        fs::remove_file(to)
            .await
            .map_err(|e| SplicerError::OutputError {
                message: format!("Failed to replace {}: {}", to.display(), e),
            })?;
    }

    if let Err(e) = fs::rename(from, to).await {
        debug!("Rename failed ({}), copying instead", e);
        fs::copy(from, to)
            .await
            .map_err(|e| SplicerError::OutputError {
                message: format!("Failed to write {}: {}", to.display(), e),
            })?;
        if let Err(e) = fs::remove_file(from).await {
            warn!("Failed to remove {}: {}", from.display(), e);
        }
    }
    Ok(())
}
