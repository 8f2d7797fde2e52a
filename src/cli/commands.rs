//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{AppContainer, ConcatReport, RenderOutcome, RenderPlan};
use crate::cli::args::{ConcatArgs, InspectArgs, PlanArgs, RenderArgs};
use crate::engine::RenderReport;
use crate::media::{EditDirective, MediaAsset};
use crate::utils::path::PathUtils;

const DEFAULT_OUTPUT_SUFFIX: &str = "edited";

/// Execute the render command
pub async fn render(container: &dyn AppContainer, args: RenderArgs) -> Result<()> {
    info!("Starting render operation");
    let output = output_path(&args.input, args.output.as_deref());

    let probe = container.probe_port();
    let mut asset = MediaAsset::load(&args.input, probe.as_ref())
        .await
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    queue_edits(&mut asset, &args.edits)?;

    let result = container.render_interactor().render(asset, &output).await;
    match result.outcome {
        RenderOutcome::NoOp => {
            if args.json {
                println!("{}", serde_json::json!({ "outcome": "noop" }));
            } else {
                println!("No edits queued, nothing rendered");
            }
            Ok(())
        }
        RenderOutcome::Rendered(report) => {
            if args.json {
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize render report to JSON")?;
                println!("{}", json);
            } else {
                display_render_report(&report);
            }
            info!("Render operation completed successfully");
            Ok(())
        }
        RenderOutcome::Failed { reason } => Err(anyhow::anyhow!("Render failed: {}", reason)),
    }
}

/// Execute the plan command
pub async fn plan(container: &dyn AppContainer, args: PlanArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(anyhow::anyhow!(
            "Input file does not exist: {}",
            args.input.display()
        ));
    }
    let output = output_path(&args.input, args.output.as_deref());

    let mut asset = MediaAsset::unprobed(&args.input)?;
    queue_edits(&mut asset, &args.edits)?;

    let plan = container
        .render_interactor()
        .plan(&asset, &output)
        .context("Failed to plan render")?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&plan).context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        display_plan(&plan);
    }
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");

    let response = container
        .inspect_interactor()
        .inspect(&args.input)
        .await
        .context("Failed to inspect input file")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize media info to JSON")?;
        println!("{}", json);
    } else {
        print!("{}", response.to_text());
    }
    Ok(())
}

/// Execute the concat command
pub async fn concat(container: &dyn AppContainer, args: ConcatArgs) -> Result<()> {
    info!("Starting concat operation");
    let interactor = container.concat_interactor();

    let report = match &args.dir {
        Some(dir) => interactor.concat_dir(dir, &args.output, args.encode).await,
        None => interactor.concat(&args.inputs, &args.output, args.encode).await,
    }
    .context("Failed to concatenate files")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize concat report to JSON")?;
        println!("{}", json);
    } else {
        display_concat_report(&report);
    }
    Ok(())
}

fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathUtils::sibling_with_suffix(input, DEFAULT_OUTPUT_SUFFIX))
}

fn queue_edits(asset: &mut MediaAsset, edits: &[EditDirective]) -> Result<()> {
    if edits.is_empty() {
        warn!("No edits given");
    }
    for edit in edits {
        edit.apply(asset)
            .with_context(|| format!("Cannot apply '{}' to {}", edit, asset.file_name()))?;
    }
    Ok(())
}

fn display_plan(plan: &RenderPlan) {
    println!("Render Plan");
    println!("===========");
    println!("Input: {} ({})", plan.input.display(), plan.kind);
    println!("Output: {}", plan.output.display());
    println!();

    if plan.stages.is_empty() {
        println!("No edits queued, nothing to render");
    }
    for stage in &plan.stages {
        println!(
            "Stage {} [{}] {}",
            stage.index,
            stage.categories.join(", "),
            stage.codec
        );
        println!("  {}", stage.command);
    }

    if !plan.dropped.is_empty() {
        println!();
        println!("Dropped edits:");
        for edit in &plan.dropped {
            println!("  {} {} = {}", edit.category, edit.key, edit.value);
        }
    }
}

fn display_render_report(report: &RenderReport) {
    println!("Render Results");
    println!("==============");
    println!("Output: {}", report.output_path.display());
    println!("Elapsed: {} ms", report.elapsed_ms);
    println!();

    for stage in &report.stages {
        let status = if stage.success { "✓" } else { "✗" };
        println!("  {} Stage {} ({})", status, stage.index, stage.codec);
        println!("    {}", stage.command);
    }

    let failed = report.failed_stages();
    if failed > 0 {
        println!();
        println!("{} stage(s) failed and were skipped", failed);
    }
}

fn display_concat_report(report: &ConcatReport) {
    println!("Concatenated {} files into {}", report.inputs.len(), report.output_path.display());
    for input in &report.inputs {
        println!("  {}", input.display());
    }
    println!("Elapsed: {} ms", report.elapsed_ms);
}
