use std::path::PathBuf;

use clap::Parser;

use crate::source::ProjectSource;

#[derive(Parser, Debug)]
#[command(
    name = "project-profiler",
    about = "Detect a project's stack and extract its setup plan from the README",
    version
)]
pub struct Cli {
    /// Local project path to analyze
    #[arg(default_value = ".", conflicts_with = "git")]
    pub path: PathBuf,

    /// Clone (or pull) a git repository and analyze it instead of PATH
    #[arg(long, value_name = "URL")]
    pub git: Option<String>,

    /// Config file [default: ./.project-profiler/config.toml, fallback ~/.config/project-profiler/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Skip README extraction; detect the project type only
    #[arg(long)]
    pub no_llm: bool,

    /// Model identifier (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// OpenAI-compatible API base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Maximum README characters sent to the model (overrides config)
    #[arg(long, value_name = "N")]
    pub max_chars: Option<usize>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the one-line summary; errors-only logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn source(&self) -> ProjectSource {
        match &self.git {
            Some(url) => ProjectSource::Git { url: url.clone() },
            None => ProjectSource::Local {
                path: self.path.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
