//! ---
//! fx_section: "11-harness"
//! fx_subsection: "04-definitions"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Declarative scenario files (TOML, YAML, JSON)."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use fixtura_common::config::SCENARIO_EXTENSIONS;
use serde::Deserialize;
use tracing::debug;

use crate::scenario::Scenario;

/// On-disk layout of a scenario file.
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    suite: Option<String>,
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Yaml,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                anyhow!(
                    "unsupported scenario format: {} (expected one of: {})",
                    path.display(),
                    SCENARIO_EXTENSIONS.join(", ")
                )
            })
    }

    /// Maps an entry of [`SCENARIO_EXTENSIONS`] to its format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        if !SCENARIO_EXTENSIONS.contains(&extension) {
            return None;
        }
        match extension {
            "toml" => Some(SourceFormat::Toml),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Validated scenarios loaded from one file.
#[derive(Debug, Clone)]
pub struct ScenarioSuite {
    pub name: String,
    pub source: PathBuf,
    pub scenarios: Vec<Scenario>,
}

/// Load and eagerly validate every scenario in `path`.
///
/// The suite is named by the file's `suite` key, falling back to the file stem.
pub fn load_suite(path: &Path) -> Result<ScenarioSuite> {
    let format = SourceFormat::from_path(path)?;
    debug!(scenario_file = %path.display(), ?format, "loading scenarios");
    let contents = fs::read_to_string(path)
        .with_context(|| format!("unable to read scenario file {}", path.display()))?;
    let fallback = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("scenarios");
    let (name, scenarios) = parse_scenarios(&contents, format, fallback)
        .with_context(|| format!("invalid scenario file {}", path.display()))?;
    Ok(ScenarioSuite {
        name,
        source: path.to_path_buf(),
        scenarios,
    })
}

/// Parse scenario definitions from a string; returns the suite name and scenarios.
pub fn parse_scenarios(
    contents: &str,
    format: SourceFormat,
    default_suite: &str,
) -> Result<(String, Vec<Scenario>)> {
    let file: ScenarioFile = match format {
        SourceFormat::Toml => toml::from_str(contents)?,
        SourceFormat::Yaml => serde_yaml::from_str(contents)?,
        SourceFormat::Json => serde_json::from_str(contents)?,
    };
    if file.scenarios.is_empty() {
        bail!("no scenarios defined");
    }
    let mut seen = HashSet::new();
    for scenario in &file.scenarios {
        scenario
            .validate()
            .map_err(|err| anyhow!("scenario '{}': {}", scenario.name, err))?;
        if !seen.insert(scenario.name.as_str()) {
            bail!("duplicate scenario name '{}'", scenario.name);
        }
    }
    let suite = file.suite.unwrap_or_else(|| default_suite.to_owned());
    Ok((suite, file.scenarios))
}
