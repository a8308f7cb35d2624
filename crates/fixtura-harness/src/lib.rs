//! ---
//! fx_section: "11-harness"
//! fx_subsection: "01-core"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Scenario harness exports."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
//! The scenario harness builds a fresh fixture per scenario, drives its
//! scripted actions and checks its assertions in declaration order, stopping
//! at the first failure.
//!
//! ```no_run
//! use fixtura_harness::{run_scenario, FixtureKind, Scenario};
//!
//! let scenario = Scenario::builder("registration", FixtureKind::RegistrationPage)
//!     .act("fill_name", [("name", "John Doe")])
//!     .act("fill_email", [("email", "john.doe@example.com")])
//!     .act("click_register", Vec::<(String, fixtura_harness::Value)>::new())
//!     .assert_eq("success_message", "Registration completed successfully!")
//!     .build()?;
//! assert!(run_scenario(&scenario).passed());
//! # Ok::<(), fixtura_harness::DefinitionError>(())
//! ```

pub mod error;
pub mod fixture;
pub mod harness;
pub mod loader;
pub mod report;
pub mod scenario;
pub mod stats;
pub mod value;

pub use error::{AssertionFailure, ConfigurationError, DefinitionError, StepFailure};
pub use fixture::{Fixture, FixtureCatalog, FixtureKind};
pub use harness::{check_assertion, new_fixture, run_action, run_scenario, SuiteRunner};
pub use loader::{load_suite, parse_scenarios, ScenarioSuite, SourceFormat};
pub use report::{ReportExporter, ScenarioResult, ScenarioStatus, SuiteReport};
pub use scenario::{Action, Assertion, Comparator, Scenario, ScenarioBuilder, Step};
pub use stats::{Complexity, SuiteStats};
pub use value::Value;
