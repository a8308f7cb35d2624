//! ---
//! fx_section: "11-harness"
//! fx_subsection: "03-reporting"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Scenario results, suite reports and report export."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fixtura_common::ReportFormat;
use serde::Serialize;
use tracing::info;

use crate::error::StepFailure;
use crate::fixture::FixtureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioStatus {
    Passed,
    Failed,
}

/// Outcome of one `run_scenario` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub fixture: FixtureKind,
    pub status: ScenarioStatus,
    pub steps_total: usize,
    pub steps_executed: usize,
    /// 1-indexed position of the failing step among all steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<usize>,
    /// 1-indexed position of the failing assertion among the assertions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_assertion: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.failure, self.failed_step) {
            (None, _) => write!(
                f,
                "PASSED {} ({} steps)",
                self.scenario, self.steps_executed
            ),
            (Some(failure), Some(step)) => write!(
                f,
                "FAILED {}: step {} ({}) failed: {}",
                self.scenario,
                step,
                self.failed_label.as_deref().unwrap_or(""),
                failure
            ),
            (Some(failure), None) => write!(f, "FAILED {}: {}", self.scenario, failure),
        }
    }
}

/// Results of a batch of scenarios with totals.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Scenarios not run because the suite stopped at an earlier failure.
    pub skipped: usize,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>, total: usize, results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|result| result.passed()).count();
        let failed = results.len() - passed;
        Self {
            suite: suite.into(),
            generated_at: Utc::now(),
            total,
            passed,
            failed,
            skipped: total.saturating_sub(results.len()),
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} passed, {} failed, {} skipped ({} total)",
            self.suite, self.passed, self.failed, self.skipped, self.total
        )
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to serialize report as JSON")
            }
            ReportFormat::Yaml => {
                serde_yaml::to_string(self).context("failed to serialize report as YAML")
            }
        }
    }

    pub fn exporter(&self) -> ReportExporter<'_> {
        ReportExporter::new(self)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        write!(f, "{}", self.summary_line())
    }
}

/// Writes suite reports to disk under timestamped file names.
#[derive(Debug)]
pub struct ReportExporter<'a> {
    report: &'a SuiteReport,
}

impl<'a> ReportExporter<'a> {
    pub fn new(report: &'a SuiteReport) -> Self {
        Self { report }
    }

    /// `<suite>_<YYYYMMDD_HHMMSS>.<ext>`, with the suite name reduced to a
    /// filesystem-safe slug.
    pub fn file_name(&self, format: ReportFormat) -> String {
        format!("{}.{}", self.stem(), format.extension())
    }

    fn stem(&self) -> String {
        format!(
            "{}_{}",
            slugify(&self.report.suite),
            self.report.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// First free path for this report; later exports in the same second get
    /// a `_2`, `_3`, ... suffix instead of overwriting.
    fn free_path(&self, output_dir: &Path, format: ReportFormat) -> PathBuf {
        let mut path = output_dir.join(self.file_name(format));
        let mut attempt = 1;
        while path.exists() {
            attempt += 1;
            path = output_dir.join(format!("{}_{attempt}.{}", self.stem(), format.extension()));
        }
        path
    }

    pub fn export(&self, output_dir: &Path, format: ReportFormat) -> Result<PathBuf> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("unable to create report directory {}", output_dir.display())
        })?;
        let path = self.free_path(output_dir, format);
        let body = self.report.render(format)?;
        fs::write(&path, body)
            .with_context(|| format!("unable to write report {}", path.display()))?;
        info!(report = %path.display(), suite = %self.report.suite, "suite report exported");
        Ok(path)
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "suite".to_owned()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssertionFailure, StepFailure};
    use crate::scenario::Comparator;
    use crate::value::Value;
    use chrono::TimeZone;

    fn passed(name: &str) -> ScenarioResult {
        ScenarioResult {
            scenario: name.into(),
            fixture: FixtureKind::OrderIntegration,
            status: ScenarioStatus::Passed,
            steps_total: 2,
            steps_executed: 2,
            failed_step: None,
            failed_assertion: None,
            failed_label: None,
            failure: None,
        }
    }

    fn failed(name: &str) -> ScenarioResult {
        ScenarioResult {
            status: ScenarioStatus::Failed,
            steps_executed: 5,
            failed_step: Some(5),
            failed_assertion: Some(1),
            failed_label: Some("status".into()),
            failure: Some(StepFailure::Assertion(AssertionFailure {
                label: "status".into(),
                target: "status".into(),
                comparator: Comparator::Eq,
                expected: Value::from("SUCCESS"),
                actual: Value::from("INVALID_ORDER_ID"),
                message: None,
            })),
            ..passed(name)
        }
    }

    #[test]
    fn failed_result_renders_step_and_diff() {
        assert_eq!(
            failed("invalid order").to_string(),
            "FAILED invalid order: step 5 (status) failed: expected \"SUCCESS\", got \"INVALID_ORDER_ID\""
        );
        assert_eq!(passed("ok").to_string(), "PASSED ok (2 steps)");
    }

    #[test]
    fn suite_totals_count_skipped_scenarios() {
        let report = SuiteReport::new("orders", 3, vec![passed("a"), failed("b")]);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.all_passed());
        assert_eq!(
            report.summary_line(),
            "orders: 1 passed, 1 failed, 1 skipped (3 total)"
        );
    }

    #[test]
    fn json_rendering_carries_failure_detail() {
        let report = SuiteReport::new("orders", 1, vec![failed("b")]);
        let rendered: serde_json::Value =
            serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();
        let result = &rendered["results"][0];
        assert_eq!(result["status"], "FAILED");
        assert_eq!(result["fixture"], "order-integration");
        assert_eq!(result["failure"]["type"], "assertion");
        assert_eq!(result["failure"]["detail"]["actual"], "INVALID_ORDER_ID");
    }

    #[test]
    fn exporter_uses_timestamped_slug() {
        let mut report = SuiteReport::new("Order Integration!", 1, vec![passed("a")]);
        report.generated_at = Utc.with_ymd_and_hms(2025, 3, 24, 10, 56, 49).unwrap();
        assert_eq!(
            report.exporter().file_name(ReportFormat::Yaml),
            "order-integration_20250324_105649.yaml"
        );

        let dir = tempfile::tempdir().unwrap();
        let path = report
            .exporter()
            .export(&dir.path().join("reports"), ReportFormat::Json)
            .unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("\"suite\": \"Order Integration!\""));
    }

    #[test]
    fn exports_in_the_same_second_do_not_overwrite() {
        let mut report = SuiteReport::new("orders", 1, vec![passed("a")]);
        report.generated_at = Utc.with_ymd_and_hms(2025, 3, 24, 10, 56, 49).unwrap();
        let other = SuiteReport {
            suite: "Orders".to_owned(),
            ..report.clone()
        };

        let dir = tempfile::tempdir().unwrap();
        let first = report.exporter().export(dir.path(), ReportFormat::Json).unwrap();
        let second = other.exporter().export(dir.path(), ReportFormat::Json).unwrap();
        let third = report.exporter().export(dir.path(), ReportFormat::Json).unwrap();

        assert!(first.ends_with("orders_20250324_105649.json"));
        assert!(second.ends_with("orders_20250324_105649_2.json"));
        assert!(third.ends_with("orders_20250324_105649_3.json"));
        assert!(fs::read_to_string(&first).unwrap().contains("\"suite\": \"orders\""));
        assert!(fs::read_to_string(&second).unwrap().contains("\"suite\": \"Orders\""));
    }

    #[test]
    fn slugify_falls_back_for_symbols_only() {
        assert_eq!(slugify("***"), "suite");
        assert_eq!(slugify("policy limits / nightly"), "policy-limits-nightly");
    }
}
