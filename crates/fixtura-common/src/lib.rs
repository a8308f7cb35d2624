//! ---
//! fx_section: "01-core-functionality"
//! fx_subsection: "module"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Shared configuration and tracing primitives."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
//! Shared primitives for the Fixtura workspace.
//! This crate exposes configuration loading and tracing initialisation
//! consumed by the harness runner and the CLI.

pub mod config;
pub mod logging;

pub use config::{
    HarnessConfig, LoadedHarnessConfig, LoggingConfig, ReportFormat, ReportsConfig, RunnerConfig,
};
pub use logging::{init_tracing, LogFormat};
