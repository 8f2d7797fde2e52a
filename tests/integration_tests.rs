//! End-to-end tests for the render, concat and CLI layers, using fake ports in
//! place of ffmpeg and ffprobe

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use async_trait::async_trait;
use predicates::prelude::*;
use tempfile::TempDir;

use splicer_cli::app::{ConcatInteractor, RenderInteractor, RenderOutcome};
use splicer_cli::domain::model::{AspectRatio, Invocation, InvocationOutput};
use splicer_cli::domain::rules::{RuleBook, RuleSet};
use splicer_cli::engine::{EngineConfig, SCRATCH_PREFIX};
use splicer_cli::ports::{ExecutePort, ProbePort};
use splicer_cli::*;

mod test_utils {
    use super::*;

    pub struct FixedProbe;

    #[async_trait]
    impl ProbePort for FixedProbe {
        async fn probe_media(&self, _file_path: &Path) -> Result<MediaInfo, DomainError> {
            Ok(MediaInfo {
                container: Some("mov,mp4,m4a,3gp,3g2,mj2".to_string()),
                duration: Some(TimeSpec::from_seconds(10.0)),
                width: Some(1920),
                height: Some(1080),
                has_video: true,
                has_audio: true,
                ..MediaInfo::default()
            })
        }
    }

    /// Writes each invocation's output file unless told to fail. For concat
    /// invocations the list file is captured before the scratch dir goes away.
    #[derive(Default)]
    pub struct FakeFfmpeg {
        pub fail: bool,
        pub calls: Mutex<Vec<Invocation>>,
        pub concat_lists: Mutex<Vec<String>>,
    }

    impl FakeFfmpeg {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExecutePort for FakeFfmpeg {
        async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, DomainError> {
            self.calls.lock().unwrap().push(invocation.clone());
            if invocation.args.iter().any(|arg| arg == "concat") {
                let list = invocation
                    .args
                    .iter()
                    .position(|arg| arg == "-i")
                    .map(|i| invocation.args[i + 1].clone())
                    .unwrap();
                self.concat_lists
                    .lock()
                    .unwrap()
                    .push(std::fs::read_to_string(list).unwrap());
            }
            if self.fail {
                return Ok(InvocationOutput {
                    success: false,
                    exit_code: Some(1),
                    output: "Invalid data found when processing input".to_string(),
                });
            }
            std::fs::write(invocation.args.last().unwrap(), b"rendered").unwrap();
            Ok(InvocationOutput {
                success: true,
                exit_code: Some(0),
                output: String::new(),
            })
        }
    }

    pub fn create_test_video(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"fake video data").unwrap();
        path
    }

    pub fn render_interactor(executor: Arc<FakeFfmpeg>) -> RenderInteractor {
        RenderInteractor::new(
            Arc::new(FixedProbe),
            executor,
            EngineConfig::default(),
            RuleBook::default(),
        )
    }
}

use test_utils::*;

// Render interactor

#[tokio::test]
async fn test_render_without_edits_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");
    let output = temp_dir.path().join("clip_edited.mp4");
    let asset = MediaAsset::load(&input, &FixedProbe).await.unwrap();

    let executor = Arc::new(FakeFfmpeg::default());
    let result = render_interactor(Arc::clone(&executor))
        .render(asset, &output)
        .await;

    assert!(matches!(result.outcome, RenderOutcome::NoOp));
    assert_eq!(result.asset.file_path(), input.as_path());
    assert!(executor.calls().is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_render_returns_fresh_asset() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");
    let output = temp_dir.path().join("clip_edited.mp4");
    let mut asset = MediaAsset::load(&input, &FixedProbe).await.unwrap();
    asset
        .trim(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(5.0))
        .unwrap()
        .resize(1280, 720)
        .unwrap();

    let executor = Arc::new(FakeFfmpeg::default());
    let result = render_interactor(Arc::clone(&executor))
        .render(asset, &output)
        .await;

    assert!(result.is_rendered());
    assert_eq!(result.asset.file_path(), output.as_path());
    assert!(!result.asset.has_pending_edits());
    assert_eq!(result.asset.info().width, Some(1920));

    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].args.contains(&"-ss".to_string()));
    assert!(calls[1].args.contains(&"-filter_complex".to_string()));
    assert_eq!(std::fs::read(&input).unwrap(), b"fake video data");
}

#[tokio::test]
async fn test_trim_without_rule_group_still_renders() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");
    let output = temp_dir.path().join("clip_edited.mp4");
    let mut asset = MediaAsset::load(&input, &FixedProbe).await.unwrap();
    asset
        .trim(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(5.0))
        .unwrap()
        .resize(640, 360)
        .unwrap();

    let rules = RuleBook {
        video: RuleSet::new(["-aspect|-filter:a", "-filter_complex"]),
        ..RuleBook::default()
    };
    rules.validate().unwrap();
    let executor = Arc::new(FakeFfmpeg::default());
    let interactor = RenderInteractor::new(
        Arc::new(FixedProbe),
        executor.clone(),
        EngineConfig::default(),
        rules,
    );

    let schedule = interactor.schedule(&asset).unwrap();
    assert!(schedule.dropped.is_empty());
    let result = interactor.render(asset, &output).await;

    assert!(result.is_rendered());
    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].args.contains(&"-ss".to_string()));
    assert!(calls[0].args.contains(&"00:00:05.000".to_string()));
    assert!(calls[1].args.contains(&"-filter_complex".to_string()));
}

#[tokio::test]
async fn test_failed_render_keeps_original_and_edits() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");
    let output = temp_dir.path().join("clip_edited.mp4");
    let mut asset = MediaAsset::load(&input, &FixedProbe).await.unwrap();
    asset
        .set_aspect_ratio(AspectRatio::SHORTS)
        .unwrap()
        .blur(10)
        .unwrap();

    let result = render_interactor(Arc::new(FakeFfmpeg::failing()))
        .render(asset, &output)
        .await;

    match &result.outcome {
        RenderOutcome::Failed { reason } => assert!(reason.contains("Stage 1 failed")),
        other => panic!("expected a failed render, got {:?}", other),
    }
    assert_eq!(result.asset.file_path(), input.as_path());
    assert_eq!(result.asset.edits().len(), 2);
    assert!(!output.exists());
}

#[test]
fn test_plan_orders_trim_first_and_copies_it() {
    let asset = {
        let mut asset = MediaAsset::unprobed("clip.mp4").unwrap();
        asset
            .resize(1920, 1080)
            .unwrap()
            .set_aspect_ratio(AspectRatio::STANDARD)
            .unwrap()
            .trim(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(10.0))
            .unwrap();
        asset
    };

    let plan = render_interactor(Arc::new(FakeFfmpeg::default()))
        .plan(&asset, Path::new("out.mp4"))
        .unwrap();

    assert_eq!(plan.stages.len(), 3);
    assert_eq!(plan.stages[0].categories, vec!["-ss"]);
    assert!(plan.stages[0].codec.is_copy());
    assert!(plan.stages[0].command.contains("-c copy"));
    assert!(plan.stages[2].command.ends_with("-y out.mp4"));
    assert!(plan.dropped.is_empty());
    assert_eq!(asset.edits().len(), 3, "planning must not consume edits");
}

// Concat interactor

#[tokio::test]
async fn test_concat_stream_copies_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = create_test_video(temp_dir.path(), "b.mp4");
    let second = create_test_video(temp_dir.path(), "a.mp4");
    let output = temp_dir.path().join("joined.mp4");

    let executor = Arc::new(FakeFfmpeg::default());
    let report = ConcatInteractor::new(executor.clone(), EngineConfig::default())
        .concat(&[first.clone(), second.clone()], &output, false)
        .await
        .unwrap();

    assert_eq!(report.inputs.len(), 2);
    assert!(report.command.contains("-f concat -safe 0"));
    assert!(report.command.contains("-c copy"));
    assert_eq!(std::fs::read(&output).unwrap(), b"rendered");

    let lists = executor.concat_lists.lock().unwrap().clone();
    let lines: Vec<&str> = lists[0].lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("b.mp4'"));
    assert!(lines[1].ends_with("a.mp4'"));
}

#[tokio::test]
async fn test_concat_encode_and_directory_scan() {
    let temp_dir = TempDir::new().unwrap();
    create_test_video(temp_dir.path(), "2.mp4");
    create_test_video(temp_dir.path(), "1.mov");
    std::fs::write(temp_dir.path().join("readme.txt"), b"x").unwrap();
    let output = temp_dir.path().join("joined.mp4");

    let executor = Arc::new(FakeFfmpeg::default());
    let config = EngineConfig {
        video_codec: "compressed".to_string(),
        ..EngineConfig::default()
    };
    let report = ConcatInteractor::new(executor.clone(), config)
        .concat_dir(temp_dir.path(), &output, true)
        .await
        .unwrap();

    assert_eq!(report.inputs.len(), 2);
    assert!(report.inputs[0].ends_with("1.mov"));
    assert!(report.command.contains("-c:v libaom-av1 -c:a aac"));
}

#[tokio::test]
async fn test_concat_failure_keeps_destination() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "a.mp4");
    let output = temp_dir.path().join("joined.mp4");

    let result = ConcatInteractor::new(Arc::new(FakeFfmpeg::failing()), EngineConfig::default())
        .concat(&[input], &output, false)
        .await;

    assert!(matches!(result, Err(SplicerError::ConcatError { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_concat_uses_shared_scratch_dir() {
    let temp_dir = TempDir::new().unwrap();
    let scratch_root = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "a.mp4");
    let output = temp_dir.path().join("joined.mp4");

    let executor = Arc::new(FakeFfmpeg::default());
    let config = EngineConfig {
        scratch_dir: Some(scratch_root.path().to_path_buf()),
        ..EngineConfig::default()
    };
    ConcatInteractor::new(executor.clone(), config)
        .concat(&[input], &output, false)
        .await
        .unwrap();

    let calls = executor.calls();
    let list = calls[0]
        .args
        .iter()
        .position(|arg| arg == "-i")
        .map(|i| PathBuf::from(&calls[0].args[i + 1]))
        .unwrap();
    let scratch = list.parent().unwrap();
    assert_eq!(scratch.parent(), Some(scratch_root.path()));
    assert!(scratch
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(SCRATCH_PREFIX));
    assert!(!scratch.exists());
    assert_eq!(std::fs::read(&output).unwrap(), b"rendered");
}

#[tokio::test]
async fn test_concat_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConcatInteractor::new(Arc::new(FakeFfmpeg::default()), EngineConfig::default())
        .concat(
            &[temp_dir.path().join("missing.mp4")],
            &temp_dir.path().join("joined.mp4"),
            false,
        )
        .await;
    assert!(matches!(result, Err(SplicerError::InputFileNotFound { .. })));
}

// CLI

fn splicer(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("splicer").unwrap();
    cmd.current_dir(cwd).env_remove("SPLICER_CONFIG");
    cmd
}

#[test]
fn test_cli_plan_prints_stages() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");

    splicer(temp_dir.path())
        .args(["plan", "-i"])
        .arg(&input)
        .args(["-e", "trim=0,10", "-e", "scale=1920:1080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-c copy"))
        .stdout(predicate::str::contains("-filter_complex"))
        .stdout(predicate::str::contains("scale=1920:1080"))
        .stdout(predicate::str::contains("clip_edited.mp4"));
}

#[test]
fn test_cli_plan_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");

    let output = splicer(temp_dir.path())
        .args(["plan", "--json", "-o", "out.mp4", "-e", "aspect=16:9", "-e", "trim=1,2", "-i"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stages = plan["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0]["codec"]["mode"], "copy");
    assert_eq!(stages[1]["codec"]["mode"], "reencode");
}

#[test]
fn test_cli_rejects_out_of_range_crf() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");

    splicer(temp_dir.path())
        .args(["plan", "--crf", "60", "-e", "blur=2", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("crf"));
}

#[test]
fn test_cli_rejects_bad_edit() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_video(temp_dir.path(), "clip.mp4");

    splicer(temp_dir.path())
        .args(["plan", "-e", "sharpen=3", "-i"])
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn test_cli_plan_missing_input() {
    let temp_dir = TempDir::new().unwrap();

    splicer(temp_dir.path())
        .args(["plan", "-i", "nope.mp4", "-e", "mute"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_concat_needs_inputs() {
    let temp_dir = TempDir::new().unwrap();

    splicer(temp_dir.path())
        .args(["concat", "-o", "joined.mp4"])
        .assert()
        .failure();
}
