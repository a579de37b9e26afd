//! Engine configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grading::DEFAULT_PASSING_SCORE;
use crate::layout::LayoutConfig;

/// Top-level stepwise configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepwiseConfig {
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Grading settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Passing threshold for lessons and exams that do not set their own.
    #[serde(default = "default_passing_score")]
    pub default_passing_score: f64,
}

fn default_passing_score() -> f64 {
    DEFAULT_PASSING_SCORE
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            default_passing_score: default_passing_score(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `stepwise.toml` in the current directory
/// 2. `~/.config/stepwise/config.toml`
///
/// Environment variable overrides: `STEPWISE_PASSING_SCORE`, `STEPWISE_LANGUAGE`.
pub fn load_config() -> Result<StepwiseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StepwiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("stepwise.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StepwiseConfig::default(),
    };

    apply_env_overrides(config, |name| std::env::var(name).ok())
}

/// Parse and check a TOML config document.
pub fn parse_config_str(content: &str) -> Result<StepwiseConfig> {
    let config: StepwiseConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Apply `STEPWISE_*` overrides read through `var`.
pub fn apply_env_overrides(
    mut config: StepwiseConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<StepwiseConfig> {
    if let Some(score) = var("STEPWISE_PASSING_SCORE") {
        config.grading.default_passing_score = score
            .trim()
            .parse()
            .with_context(|| format!("invalid STEPWISE_PASSING_SCORE: {score}"))?;
    }
    if let Some(language) = var("STEPWISE_LANGUAGE") {
        config.layout.language = language;
    }
    validate(&config)?;
    Ok(config)
}

fn validate(config: &StepwiseConfig) -> Result<()> {
    let score = config.grading.default_passing_score;
    anyhow::ensure!(
        (0.0..=100.0).contains(&score),
        "default_passing_score must be between 0 and 100, got {score}"
    );
    anyhow::ensure!(config.layout.step > 0.0, "layout step must be positive");
    anyhow::ensure!(config.layout.unit_gap >= 0.0, "layout unit_gap must not be negative");
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("stepwise"))
}
