//! ---
//! fx_section: "15-testing"
//! fx_subsection: "integration-tests"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Bundled scenario files load, run and export end to end."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::path::PathBuf;

use fixtura_common::{ReportFormat, RunnerConfig};
use fixtura_harness::{load_suite, ScenarioSuite, SuiteRunner, SuiteStats};

fn bundled(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../scenarios")
        .join(name)
}

fn all_suites() -> Vec<ScenarioSuite> {
    ["order_integration.toml", "registration.yaml", "policy_limits.toml"]
        .into_iter()
        .map(|name| load_suite(&bundled(name)).expect("bundled scenarios load"))
        .collect()
}

#[test]
fn bundled_suites_pass() {
    let runner = SuiteRunner::new(&RunnerConfig::default());
    for suite in all_suites() {
        let report = runner.run(&suite.name, &suite.scenarios);
        assert!(report.all_passed(), "{report}");
        assert_eq!(report.total, suite.scenarios.len());
    }
}

#[test]
fn suite_names_come_from_files() {
    let names: Vec<String> = all_suites().into_iter().map(|suite| suite.name).collect();
    assert_eq!(names, ["order-integration", "registration", "policy-limits"]);
}

#[test]
fn bundled_stats_are_stable() {
    let suites = all_suites();
    let stats = SuiteStats::collect(suites.iter().flat_map(|suite| suite.scenarios.iter()));
    assert_eq!(stats.scenarios, 4);
    assert_eq!(stats.fixture_kinds["order-integration"], 2);
    assert_eq!(stats.assertions_by_comparator["le"], 1);
    assert_eq!(stats.assertions_by_comparator["not_null"], 1);
    assert_eq!(stats.complexity.simple, 0);
}

#[test]
fn exported_report_matches_run() -> anyhow::Result<()> {
    let suite = load_suite(&bundled("policy_limits.toml"))?;
    let report = SuiteRunner::default().run(&suite.name, &suite.scenarios);
    let dir = tempfile::tempdir()?;
    let path = report.exporter().export(dir.path(), ReportFormat::Json)?;

    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    assert!(file_name.starts_with("policy-limits_"));
    let exported: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(exported["passed"], 1);
    assert_eq!(exported["results"][0]["scenario"], "ISJ policy with limits");
    Ok(())
}
