//! ---
//! fx_section: "01-core-functionality"
//! fx_subsection: "module"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Harness configuration model and loader."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

/// File extensions the scenario loader understands.
pub const SCENARIO_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_reports_directory() -> PathBuf {
    PathBuf::from("target/reports")
}

fn default_report_format() -> ReportFormat {
    ReportFormat::Json
}

/// Primary configuration object for harness runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Metadata describing where a [`HarnessConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedHarnessConfig {
    pub config: HarnessConfig,
    pub source: PathBuf,
}

impl HarnessConfig {
    pub const ENV_CONFIG_PATH: &str = "FIXTURA_CONFIG";

    /// Load configuration from disk, respecting the `FIXTURA_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration from disk together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedHarnessConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedHarnessConfig {
                    config,
                    source: path,
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedHarnessConfig {
                    config,
                    source: path,
                });
            }
        }

        Err(anyhow!(
            "no configuration files found. inspected: {}",
            candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    /// Parse and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<HarnessConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.logging.directory.as_os_str().is_empty() {
            return Err(anyhow!("logging.directory must not be empty"));
        }
        self.runner.validate()?;
        self.reports.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for HarnessConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: HarnessConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

/// Options controlling how a batch of scenarios is executed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub scenario_files: Vec<PathBuf>,
    /// Skip the remaining scenarios of a suite once one has failed.
    #[serde(default)]
    pub stop_on_first_failure: bool,
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        for path in &self.scenario_files {
            let supported = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SCENARIO_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if !supported {
                return Err(anyhow!(
                    "scenario file {} must have one of the extensions: {}",
                    path.display(),
                    SCENARIO_EXTENSIONS.join(", ")
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_reports_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_report_format")]
    pub format: ReportFormat,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: default_reports_directory(),
            format: default_report_format(),
        }
    }
}

impl ReportsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.directory.as_os_str().is_empty() {
            return Err(anyhow!("reports.directory must be set when reports are enabled"));
        }
        Ok(())
    }
}

/// Serialization format for exported suite reports.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}
