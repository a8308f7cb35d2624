//! ---
//! fx_section: "11-harness"
//! fx_subsection: "01-core"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Configuration errors and assertion failures."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::scenario::Comparator;
use crate::value::Value;

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// A scenario references something the harness cannot resolve.
///
/// Always fatal to the scenario it occurs in and never retried.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationError {
    #[error("unknown fixture kind '{name}'")]
    UnknownFixtureKind { name: String },
    #[error("fixture '{fixture}' has no action '{action}'")]
    UnknownAction { fixture: String, action: String },
    #[error("fixture '{fixture}' has no attribute '{attribute}'")]
    UnknownAttribute { fixture: String, attribute: String },
    #[error("action '{action}' is missing required parameter '{parameter}'")]
    MissingParameter { action: String, parameter: String },
    #[error("action '{action}' parameter '{parameter}' must be {expected}, found {found}")]
    InvalidParameter {
        action: String,
        parameter: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("action '{action}' requires {requirement}")]
    MissingPrerequisite { action: String, requirement: String },
    #[error("assertion '{label}' uses '{comparator}' which needs a numeric expected value")]
    InvalidExpectation { label: String, comparator: Comparator },
    #[error("scenario name must not be empty")]
    UnnamedScenario,
    #[error("scenario '{scenario}' has no steps")]
    EmptyScenario { scenario: String },
}

/// Problem found while validating a scenario definition, located by step.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionError {
    /// 1-indexed step position, when the problem belongs to a single step.
    pub step: Option<usize>,
    pub error: ConfigurationError,
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Some(step) => write!(f, "step {step}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Expected vs. actual mismatch reported by an assertion step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionFailure {
    pub label: String,
    pub target: String,
    pub comparator: Comparator,
    pub expected: Value,
    pub actual: Value,
    /// Failure message template attached to the assertion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expectation = match self.comparator {
            Comparator::NotNull => "expected a value".to_owned(),
            Comparator::Eq => format!("expected {}", self.expected),
            other => format!("expected {} {}", other.symbol(), self.expected),
        };
        match &self.message {
            Some(message) => write!(f, "{message} ({expectation}, got {})", self.actual),
            None => write!(f, "{expectation}, got {}", self.actual),
        }
    }
}

impl std::error::Error for AssertionFailure {}

/// Reason a single step stopped its scenario.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum StepFailure {
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
    #[error("{0}")]
    Assertion(#[from] AssertionFailure),
}

impl StepFailure {
    pub fn is_assertion(&self) -> bool {
        matches!(self, StepFailure::Assertion(_))
    }
}
