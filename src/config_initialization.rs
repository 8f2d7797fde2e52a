//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::TomlConfigAdapter;
use crate::cli::args::EngineOverrides;
use crate::cli::{Cli, Commands};
use crate::config::SplicerConfig;
use crate::engine::EngineConfig;

/// Build the effective configuration with precedence CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<SplicerConfig> {
    initialize_configuration_with_env(cli, std::env::vars())
}

/// Same as [`initialize_configuration`] with an explicit environment
pub fn initialize_configuration_with_env<I>(cli: &Cli, vars: I) -> Result<SplicerConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut config = TomlConfigAdapter::default()
        .load(cli.config.as_deref())
        .context("Failed to load configuration file")?;

    let env_overrides = config
        .apply_env_overrides(vars)
        .context("Invalid environment override")?;
    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn apply_cli_overrides(config: &mut SplicerConfig, cli: &Cli) -> usize {
    let mut applied = 0;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
        applied += 1;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
        applied += 1;
    }

    let engine = match &cli.command {
        Commands::Render(args) => Some(&args.engine),
        Commands::Plan(args) => Some(&args.engine),
        Commands::Concat(args) => Some(&args.engine),
        Commands::Inspect(_) => None,
    };
    if let Some(overrides) = engine {
        applied += apply_engine_overrides(&mut config.engine, overrides);
    }
    applied
}

/// Copy every flag that was given onto `engine`
pub fn apply_engine_overrides(engine: &mut EngineConfig, overrides: &EngineOverrides) -> usize {
    let mut applied = 0;
    if let Some(codec) = &overrides.codec {
        engine.video_codec = codec.clone();
        applied += 1;
    }
    if let Some(codec) = &overrides.audio_codec {
        engine.audio_codec = Some(codec.clone());
        applied += 1;
    }
    if let Some(crf) = overrides.crf {
        engine.crf = Some(crf);
        applied += 1;
    }
    if let Some(preset) = &overrides.preset {
        engine.preset = Some(preset.clone());
        applied += 1;
    }
    if let Some(threads) = overrides.threads {
        engine.threads = Some(threads);
        applied += 1;
    }
    if let Some(policy) = overrides.failure_policy {
        engine.failure_policy = policy;
        applied += 1;
    }
    if let Some(dir) = &overrides.scratch_dir {
        engine.scratch_dir = Some(dir.clone());
        applied += 1;
    }
    applied
}
