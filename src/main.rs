//! `project-profiler`: detect a project's stack and extract its setup plan.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialise logging ([`logging`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Resolve the source to a directory, cloning git URLs ([`source`]).
//! 4. Detect the project type from marker files ([`detector`]).
//! 5. Locate the setup documentation ([`readme`]).
//! 6. Extract a structured plan with the model ([`extractor`], [`llm`]).
//! 7. Merge the plan into the profile ([`merger`]) and render it ([`report`]).
//!
//! Steps 4 to 7 run inside [`pipeline::Analyzer`]. Exit `1` only when the source
//! cannot be resolved; an inconclusive analysis still exits `0`.

mod cli;
mod config;
mod detector;
mod extractor;
mod llm;
mod logging;
mod merger;
mod models;
mod pipeline;
mod readme;
mod report;
mod source;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use cli::{Cli, ReportFormat};
use config::{load_config, Config};
use extractor::InstructionExtractor;
use llm::{LlmError, OpenAiCompatClient};
use pipeline::Analyzer;
use source::ProjectSource;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let source = cli.source();
    let local_hint = match &source {
        ProjectSource::Local { path } => Some(path.as_path()),
        ProjectSource::Git { .. } => None,
    };
    let mut config = load_config(local_hint, cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    let path = source::resolve(&source, &config.source.clone_dir())?;

    let extractor = if cli.no_llm {
        None
    } else {
        match build_extractor(&config) {
            Ok(extractor) => Some(extractor),
            Err(e) => {
                warn!(error = %e, "README extraction disabled");
                None
            }
        }
    };
    let spinner = if show_spinner(&cli, extractor.is_some()) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Analyzing {}", path.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = Analyzer::new(extractor).analyze(&path).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let profile = result?;

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&profile, cli.quiet)?,
        ReportFormat::Json => report::json::render(&profile)?,
    }

    Ok(())
}

/// Only the model call is slow enough to deserve a spinner.
fn show_spinner(cli: &Cli, extracting: bool) -> bool {
    extracting && !cli.quiet && matches!(cli.report, ReportFormat::Terminal)
}

/// CLI flags take precedence over file configuration.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.llm.endpoint = endpoint.clone();
    }
    if let Some(max_chars) = cli.max_chars {
        config.llm.max_readme_chars = max_chars;
    }
}

/// Build the process-wide extractor once; it is reused read-only afterwards.
fn build_extractor(config: &Config) -> Result<InstructionExtractor, LlmError> {
    let llm = &config.llm;
    let api_key = llm
        .api_key()
        .ok_or_else(|| LlmError::MissingApiKey(llm.api_key_env.clone()))?;

    let client = OpenAiCompatClient::new(
        llm.endpoint.as_str(),
        llm.model.as_str(),
        api_key,
        Duration::from_secs(llm.timeout_secs),
    )?
    .with_temperature(llm.temperature);
    info!(model = client.model(), "instruction extraction enabled");

    Ok(InstructionExtractor::new(
        Arc::new(client),
        llm.max_readme_chars,
    ))
}
