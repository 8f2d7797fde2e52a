// Concat interactor - Joins media files with the concat demuxer

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info};
use walkdir::WalkDir;

use crate::domain::model::{Invocation, MediaKind};
use crate::engine::{create_scratch_dir, move_into_place, resolve_video_codec, EngineConfig};
use crate::error::{SplicerError, SplicerResult};
use crate::ports::ExecutePort;
use crate::utils::path::PathUtils;

const LIST_FILE: &str = "inputs.txt";
const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Summary of a completed concatenation
#[derive(Debug, Clone, Serialize)]
pub struct ConcatReport {
    pub output_path: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub command: String,
    pub elapsed_ms: u64,
}

/// Interactor for the concat use case
pub struct ConcatInteractor {
    execute_port: Arc<dyn ExecutePort>,
    config: EngineConfig,
}

impl ConcatInteractor {
    pub fn new(execute_port: Arc<dyn ExecutePort>, config: EngineConfig) -> Self {
        Self {
            execute_port,
            config,
        }
    }

    /// Concatenate `inputs` in order. `encode` re-encodes instead of stream copying,
    /// which is needed when inputs do not share codec parameters.
    pub async fn concat(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        encode: bool,
    ) -> SplicerResult<ConcatReport> {
        if inputs.is_empty() {
            return Err(SplicerError::ConcatError {
                message: "No input files to concatenate".to_string(),
            });
        }

        let mut absolute = Vec::with_capacity(inputs.len());
        for input in inputs {
            let resolved = tokio::fs::canonicalize(input).await.map_err(|_| {
                SplicerError::InputFileNotFound {
                    path: input.display().to_string(),
                }
            })?;
            absolute.push(resolved);
        }

        let clock = Instant::now();
        let scratch = create_scratch_dir(&self.config, output)?;

        let list_path = scratch.path().join(LIST_FILE);
        tokio::fs::write(&list_path, concat_list(&absolute)).await?;

        let extension = PathUtils::extension(output);
        let temp_output = scratch.path().join(if extension.is_empty() {
            "joined".to_string()
        } else {
            format!("joined.{}", extension)
        });

        let invocation = self.build_invocation(&list_path, &temp_output, encode);
        info!(inputs = absolute.len(), "Running: {}", invocation);

        let result = self.execute_port.run(&invocation).await?;
        if !result.success {
            error!(exit_code = ?result.exit_code, "Concatenation failed:\n{}", result.output);
            return Err(SplicerError::ConcatError {
                message: format!(
                    "ffmpeg exited with {:?}: {}",
                    result.exit_code,
                    result.output.trim()
                ),
            });
        }

        move_into_place(&temp_output, output).await?;
        let report = ConcatReport {
            output_path: output.to_path_buf(),
            inputs: absolute,
            command: invocation.command_line(),
            elapsed_ms: clock.elapsed().as_millis() as u64,
        };
        info!(output = %output.display(), "Concatenated {} files", report.inputs.len());
        Ok(report)
    }

    /// Concatenate every video file directly inside `dir`, in file name order
    pub async fn concat_dir(
        &self,
        dir: &Path,
        output: &Path,
        encode: bool,
    ) -> SplicerResult<ConcatReport> {
        let (scan_dir, exclude) = (dir.to_path_buf(), output.to_path_buf());
        let inputs = tokio::task::spawn_blocking(move || collect_videos(&scan_dir, &exclude))
            .await
            .map_err(|e| SplicerError::ConcatError {
                message: format!("Directory scan did not finish: {}", e),
            })??;
        self.concat(&inputs, output, encode).await
    }

    fn build_invocation(&self, list: &Path, output: &Path, encode: bool) -> Invocation {
        let mut invocation = Invocation::new(self.config.ffmpeg_path.as_str())
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(list.to_string_lossy());

        invocation = if encode {
            invocation
                .args(["-c:v", resolve_video_codec(&self.config.video_codec), "-c:a"])
                .arg(
                    self.config
                        .audio_codec
                        .as_deref()
                        .unwrap_or(DEFAULT_AUDIO_CODEC),
                )
        } else {
            invocation.args(["-c", "copy"])
        };

        if let Some(threads) = self.config.effective_threads() {
            invocation = invocation.arg("-threads").arg(threads.to_string());
        }
        invocation.arg("-y").arg(output.to_string_lossy())
    }
}

/// Concat demuxer list: one `file '<path>'` line per input
pub fn concat_list(inputs: &[PathBuf]) -> String {
    inputs
        .iter()
        .map(|path| {
            format!(
                "file '{}'\n",
                path.to_string_lossy().replace('\'', "'\\''")
            )
        })
        .collect()
}

/// Video files directly inside `dir`, sorted by file name. `exclude` is skipped so
/// an output written into the same directory is never read back in.
pub fn collect_videos(dir: &Path, exclude: &Path) -> SplicerResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SplicerError::ConcatError {
            message: format!("{} is not a directory", dir.display()),
        });
    }
    let excluded = std::fs::canonicalize(exclude).ok();

    let mut videos = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SplicerError::ConcatError {
            message: format!("Failed to read {}: {}", dir.display(), e),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || PathUtils::media_kind(path) != Some(MediaKind::Video) {
            continue;
        }
        if excluded.is_some() && std::fs::canonicalize(path).ok() == excluded {
            continue;
        }
        info!("Appending {} for concatenation", path.display());
        videos.push(path.to_path_buf());
    }

    if videos.is_empty() {
        return Err(SplicerError::ConcatError {
            message: format!("No video files found in {}", dir.display()),
        });
    }
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_list_quotes_paths() {
        let list = concat_list(&[
            PathBuf::from("/media/a.mp4"),
            PathBuf::from("/media/it's.mp4"),
        ]);
        assert_eq!(list, "file '/media/a.mp4'\nfile '/media/it'\\''s.mp4'\n");
    }

    #[test]
    fn test_collect_videos_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp4", "a.mkv", "notes.txt", "song.mp3", "out.mp4"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();

        let videos = collect_videos(dir.path(), &dir.path().join("out.mp4")).unwrap();
        let names: Vec<_> = videos
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mkv", "b.mp4"]);
    }

    #[test]
    fn test_collect_videos_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_videos(dir.path(), Path::new("out.mp4")),
            Err(SplicerError::ConcatError { .. })
        ));
    }
}
