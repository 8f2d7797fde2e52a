//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

use crate::engine::{FailurePolicy, MAX_CRF};
use crate::media::EditDirective;

const MAX_THREADS: usize = 256;

fn crf_in_range(s: &str) -> Result<u8, String> {
    number_range(s, 0, MAX_CRF)
}

fn threads_in_range(s: &str) -> Result<usize, String> {
    number_range(s, 0, MAX_THREADS)
}

/// Encoder settings that override the configuration file
#[derive(Args, Debug, Default, Clone)]
pub struct EngineOverrides {
    /// Video codec, or one of: best, efficient, compressed
    #[arg(long)]
    pub codec: Option<String>,

    /// Audio codec
    #[arg(long)]
    pub audio_codec: Option<String>,

    /// Constant Rate Factor (0-51)
    #[arg(long, value_parser = crf_in_range)]
    pub crf: Option<u8>,

    /// Encoding preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Encoder threads (0 = one per CPU)
    #[arg(long, value_parser = threads_in_range)]
    pub threads: Option<usize>,

    /// What to do when a stage fails (abort, continue)
    #[arg(long)]
    pub failure_policy: Option<FailurePolicy>,

    /// Directory for intermediate files
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (default: <input>_edited.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Edit to apply, repeatable and applied in order (e.g. trim=0,10 scale=1280:720)
    #[arg(short, long = "edit", value_name = "EDIT")]
    pub edits: Vec<EditDirective>,

    #[command(flatten)]
    pub engine: EngineOverrides,

    /// Print the render report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (default: <input>_edited.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Edit to apply, repeatable and applied in order
    #[arg(short, long = "edit", value_name = "EDIT")]
    pub edits: Vec<EditDirective>,

    #[command(flatten)]
    pub engine: EngineOverrides,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the concat command
#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Files to join, in order
    #[arg(long, num_args = 1.., required_unless_present = "dir", conflicts_with = "dir")]
    pub inputs: Vec<PathBuf>,

    /// Join every video file in this directory, sorted by name
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Re-encode instead of stream copying
    #[arg(long)]
    pub encode: bool,

    #[command(flatten)]
    pub engine: EngineOverrides,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
