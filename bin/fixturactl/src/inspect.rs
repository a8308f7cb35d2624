//! ---
//! fx_section: "05-interfaces"
//! fx_subsection: "binary"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Read-only subcommands: validate, stats, fixtures."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Args};
use fixtura_harness::{load_suite, FixtureKind, SuiteStats};

#[derive(Debug, Args)]
pub struct FilesArgs {
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    files: FilesArgs,

    /// Print the statistics as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Report every file that fails to load; fail if any did.
pub fn validate(args: &FilesArgs) -> Result<ExitCode> {
    let mut invalid = 0;
    for path in &args.files {
        match load_suite(path) {
            Ok(suite) => println!(
                "ok      {} ({} scenarios in suite '{}')",
                path.display(),
                suite.scenarios.len(),
                suite.name
            ),
            Err(err) => {
                invalid += 1;
                println!("invalid {}: {err:#}", path.display());
            }
        }
    }
    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn stats(cmd: &StatsCommand) -> Result<ExitCode> {
    let suites = cmd
        .files
        .files
        .iter()
        .map(|path| load_suite(path))
        .collect::<Result<Vec<_>>>()?;
    let stats = SuiteStats::collect(suites.iter().flat_map(|suite| suite.scenarios.iter()));

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(ExitCode::SUCCESS);
    }
    println!("scenarios:  {}", stats.scenarios);
    println!("actions:    {}", stats.actions);
    println!("assertions: {}", stats.assertions);
    for (comparator, count) in &stats.assertions_by_comparator {
        println!("  {comparator:<10} {count}");
    }
    println!("fixtures:");
    for (kind, count) in &stats.fixture_kinds {
        println!("  {kind:<18} {count}");
    }
    println!(
        "complexity: {} simple, {} medium, {} complex",
        stats.complexity.simple, stats.complexity.medium, stats.complexity.complex
    );
    Ok(ExitCode::SUCCESS)
}

pub fn fixtures() {
    for kind in FixtureKind::ALL {
        let catalog = kind.catalog();
        println!("{kind}");
        println!("  actions:");
        for action in catalog.actions {
            let params = if action.required.is_empty() {
                String::new()
            } else {
                format!("({})", action.required.join(", "))
            };
            println!("    {}{params}  {}", action.name, action.summary);
        }
        println!("  attributes:");
        for attribute in catalog.attributes {
            println!("    {}  {}", attribute.name, attribute.summary);
        }
    }
}
