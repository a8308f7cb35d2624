//! ---
//! fx_section: "05-interfaces"
//! fx_subsection: "binary"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "`fixturactl run`: execute scenario files and report results."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{ArgAction, Args, ValueEnum};
use fixtura_common::{HarnessConfig, ReportFormat};
use fixtura_harness::{load_suite, SuiteReport, SuiteRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    /// Scenario files (TOML, YAML or JSON). Defaults to `runner.scenario_files`.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// How results are printed to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip the remaining scenarios of a file after the first failure.
    #[arg(long = "stop-on-first-failure", action = ArgAction::SetTrue)]
    stop_on_first_failure: bool,

    /// Write each suite report to the reports directory.
    #[arg(long, action = ArgAction::SetTrue)]
    export: bool,

    /// Override `reports.directory`.
    #[arg(long = "report-dir", value_name = "DIR")]
    report_dir: Option<PathBuf>,
}

pub fn execute(cmd: RunCommand, config: &HarnessConfig) -> Result<ExitCode> {
    let files = if cmd.files.is_empty() {
        config.runner.scenario_files.clone()
    } else {
        cmd.files
    };
    if files.is_empty() {
        bail!("no scenario files given and runner.scenario_files is empty");
    }

    // Load everything first so a broken file fails the run before any output.
    let suites = files
        .iter()
        .map(|path| load_suite(path))
        .collect::<Result<Vec<_>>>()?;

    let runner = SuiteRunner::new(&config.runner)
        .stop_on_first_failure(cmd.stop_on_first_failure || config.runner.stop_on_first_failure);
    let reports: Vec<SuiteReport> = suites
        .iter()
        .map(|suite| runner.run(&suite.name, &suite.scenarios))
        .collect();

    print_reports(&reports, cmd.format)?;

    if cmd.export || config.reports.enabled {
        let directory = cmd
            .report_dir
            .unwrap_or_else(|| config.reports.directory.clone());
        for report in &reports {
            let path = report.exporter().export(&directory, config.reports.format)?;
            eprintln!("report written to {}", path.display());
        }
    }

    if reports.iter().all(SuiteReport::all_passed) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_reports(reports: &[SuiteReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                println!("{report}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Yaml => {
            for report in reports {
                println!("---\n{}", report.render(ReportFormat::Yaml)?);
            }
        }
    }
    Ok(())
}
