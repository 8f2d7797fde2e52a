//! CLI module for Splicer
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// Splicer - queue media edits, render them in as few ffmpeg passes as possible
#[derive(Parser, Debug)]
#[command(name = "splicer")]
#[command(about = "Compile queued video/audio edits into staged ffmpeg renders")]
#[command(version)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration file (default: splicer.toml or config/splicer.toml)
    #[arg(long, global = true, env = "SPLICER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply edits to a media file and render the result
    Render(args::RenderArgs),
    /// Show the stages and commands a render would run, without running them
    Plan(args::PlanArgs),
    /// Inspect media file information
    Inspect(args::InspectArgs),
    /// Join several video files into one
    Concat(args::ConcatArgs),
}
