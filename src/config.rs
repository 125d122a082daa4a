use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::extractor::prompt::DEFAULT_MAX_CHARS;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Root configuration structure, deserialized from `.project-profiler/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Settings for the instruction-extraction model.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Documentation is cut to this many characters before prompting.
    pub max_readme_chars: usize,
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_readme_chars: DEFAULT_MAX_CHARS,
            temperature: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceConfig {
    /// Where git sources are cloned. Defaults to the user cache directory.
    pub clone_dir: Option<PathBuf>,
}

impl SourceConfig {
    pub fn clone_dir(&self) -> PathBuf {
        self.clone_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("project-profiler")
                .join("repos")
        })
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.project-profiler/config.toml`
/// 3. `~/.config/project-profiler/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: Option<&Path>, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    if let Some(project_path) = project_path {
        let project_config = project_path.join(".project-profiler").join("config.toml");
        if project_config.exists() {
            return read_config(&project_config);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("project-profiler")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
