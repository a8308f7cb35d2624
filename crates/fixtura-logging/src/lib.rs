//! ---
//! fx_section: "03-logging"
//! fx_subsection: "module"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Structured logging adapters for scenario runs."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Scenario-aware logging helpers shared by the harness and the CLI.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for development.
///
/// Events go to stderr so rendered reports on stdout stay machine readable.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogContext<'a> {
    /// Scenario name associated with the log event.
    pub scenario: Option<&'a str>,
    /// Fixture kind the scenario operates on.
    pub fixture: Option<&'a str>,
    /// 1-indexed step position within the scenario.
    pub step: Option<usize>,
    /// Action name or assertion label being executed.
    pub action: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a scenario name.
    pub fn with_scenario(mut self, scenario: &'a str) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Attach a fixture kind.
    pub fn with_fixture(mut self, fixture: &'a str) -> Self {
        self.fixture = Some(fixture);
        self
    }

    /// Attach a step position.
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    /// Attach the action name or assertion label.
    pub fn with_action(mut self, action: &'a str) -> Self {
        self.action = Some(action);
        self
    }
}

/// High-level outcome used when emitting scenario lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioEventOutcome {
    /// The scenario or step completed successfully.
    Passed,
    /// The scenario or step failed.
    Failed,
}

impl ScenarioEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            ScenarioEventOutcome::Passed => "passed",
            ScenarioEventOutcome::Failed => "failed",
        }
    }
}

/// Emit a standardized scenario event with a passed/failed outcome.
///
/// Passed events are logged at `INFO`, failed events at `WARN`: a failing
/// scenario is an expected result of the harness, not a fault of the process.
pub fn log_scenario_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: ScenarioEventOutcome,
) {
    let ctx = context.copied().unwrap_or_default();
    let outcome_label = outcome.as_str();
    match outcome {
        ScenarioEventOutcome::Passed => tracing::info!(
            event = %event,
            outcome = outcome_label,
            scenario = ctx.scenario.unwrap_or(""),
            fixture = ctx.fixture.unwrap_or(""),
            step = ctx.step.unwrap_or_default(),
            message = %message
        ),
        ScenarioEventOutcome::Failed => tracing::warn!(
            event = %event,
            outcome = outcome_label,
            scenario = ctx.scenario.unwrap_or(""),
            fixture = ctx.fixture.unwrap_or(""),
            step = ctx.step.unwrap_or_default(),
            message = %message
        ),
    }
}
