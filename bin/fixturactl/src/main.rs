//! ---
//! fx_section: "05-interfaces"
//! fx_subsection: "binary"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Command line runner for Fixtura scenario files."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use fixtura_common::config::SCENARIO_EXTENSIONS;
use fixtura_common::{init_tracing, HarnessConfig, LoadedHarnessConfig};
use fixtura_harness::FixtureKind;
use fixtura_logging as logging;
use tracing::info;

mod inspect;
mod run;

const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["fixtura.toml", "configs/fixtura.toml"];

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    arg_required_else_help = true,
    about = "Run and inspect Fixtura scenario files",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
    /// Harness configuration file (defaults to FIXTURA_CONFIG, then fixtura.toml).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every scenario in the given files.
    Run(run::RunCommand),
    /// Load and validate scenario files without running them.
    Validate(inspect::FilesArgs),
    /// Summarize scenario files (counts, comparators, complexity).
    Stats(inspect::StatsCommand),
    /// List fixture kinds with their actions and attributes.
    Fixtures,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", extended_version());
        return Ok(ExitCode::SUCCESS);
    }
    let config = load_config(cli.config.as_deref())?;
    let Some(command) = cli.command else {
        bail!("no command given; see `fixturactl --help`");
    };
    match command {
        Commands::Run(cmd) => run::execute(cmd, &config),
        Commands::Validate(args) => inspect::validate(&args),
        Commands::Stats(cmd) => inspect::stats(&cmd),
        Commands::Fixtures => {
            inspect::fixtures();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn extended_version() -> String {
    format!(
        "fixturactl {}\nfixture kinds: {}\nscenario formats: {}",
        env!("CARGO_PKG_VERSION"),
        FixtureKind::ALL.map(|kind| kind.as_str()).join(", "),
        SCENARIO_EXTENSIONS.join(", ")
    )
}

/// Load the harness configuration and install the matching subscriber.
///
/// Without an explicit `--config`, a missing file is not an error and the
/// defaults apply with the development subscriber.
fn load_config(explicit: Option<&Path>) -> Result<HarnessConfig> {
    let loaded = match explicit {
        // An explicit file wins over FIXTURA_CONFIG.
        Some(path) => Some(LoadedHarnessConfig {
            config: HarnessConfig::from_path(path)?,
            source: path.to_path_buf(),
        }),
        None => {
            let env_set = std::env::var(HarnessConfig::ENV_CONFIG_PATH)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false);
            if env_set
                || DEFAULT_CONFIG_CANDIDATES
                    .iter()
                    .any(|candidate| Path::new(candidate).exists())
            {
                Some(HarnessConfig::load_with_source(&DEFAULT_CONFIG_CANDIDATES)?)
            } else {
                None
            }
        }
    };
    match loaded {
        Some(loaded) => {
            init_tracing("fixturactl", &loaded.config.logging)?;
            info!(config = %loaded.source.display(), "configuration loaded");
            Ok(loaded.config)
        }
        None => {
            logging::init();
            Ok(HarnessConfig::default())
        }
    }
}
