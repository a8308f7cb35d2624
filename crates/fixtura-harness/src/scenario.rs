//! ---
//! fx_section: "11-harness"
//! fx_subsection: "01-core"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Scenario definitions: actions, assertions and the builder."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
//! A [`Scenario`] is an ordered list of [`Step`]s run against one fixture.
//! Definitions are plain data: they can be built in code with
//! [`ScenarioBuilder`] or deserialized from scenario files.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, DefinitionError, Result};
use crate::fixture::FixtureKind;
use crate::value::Value;

/// Comparison applied by an assertion between the actual attribute value
/// and the expected literal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    #[default]
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    NotNull,
}

impl Comparator {
    pub fn name(&self) -> &'static str {
        match self {
            Comparator::Eq => "eq",
            Comparator::Ne => "ne",
            Comparator::Lt => "lt",
            Comparator::Le => "le",
            Comparator::Gt => "gt",
            Comparator::Ge => "ge",
            Comparator::NotNull => "not_null",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::NotNull => "is not null",
        }
    }

    /// Ordering comparators only accept numeric expectations.
    pub fn requires_numeric(&self) -> bool {
        matches!(
            self,
            Comparator::Lt | Comparator::Le | Comparator::Gt | Comparator::Ge
        )
    }

    pub fn evaluate(&self, actual: &Value, expected: &Value) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        match self {
            Comparator::Eq => actual.exact_eq(expected),
            Comparator::Ne => !actual.exact_eq(expected),
            Comparator::NotNull => !actual.is_null(),
            Comparator::Lt => matches!(actual.numeric_cmp(expected), Some(Less)),
            Comparator::Le => matches!(actual.numeric_cmp(expected), Some(Less | Equal)),
            Comparator::Gt => matches!(actual.numeric_cmp(expected), Some(Greater)),
            Comparator::Ge => matches!(actual.numeric_cmp(expected), Some(Greater | Equal)),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scripted operation applied to a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, Value>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: IndexMap::new(),
        }
    }

    /// Attach a parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Result<&Value> {
        self.params
            .get(key)
            .ok_or_else(|| ConfigurationError::MissingParameter {
                action: self.name.clone(),
                parameter: key.to_owned(),
            })
    }

    pub fn text(&self, key: &str) -> Result<&str> {
        let value = self.param(key)?;
        value
            .as_text()
            .ok_or_else(|| self.invalid(key, "text", value))
    }

    pub fn integer(&self, key: &str) -> Result<i64> {
        let value = self.param(key)?;
        value
            .as_i64()
            .ok_or_else(|| self.invalid(key, "an integer", value))
    }

    /// Integers are accepted where a number is expected.
    pub fn number(&self, key: &str) -> Result<f64> {
        let value = self.param(key)?;
        value
            .as_f64()
            .ok_or_else(|| self.invalid(key, "a number", value))
    }

    pub fn text_list(&self, key: &str) -> Result<Vec<String>> {
        let value = self.param(key)?;
        let items = value
            .as_list()
            .ok_or_else(|| self.invalid(key, "a list of text", value))?;
        items
            .iter()
            .map(|item| {
                item.as_text()
                    .map(str::to_owned)
                    .ok_or_else(|| self.invalid(key, "a list of text", item))
            })
            .collect()
    }

    fn invalid(&self, key: &str, expected: &'static str, found: &Value) -> ConfigurationError {
        ConfigurationError::InvalidParameter {
            action: self.name.clone(),
            parameter: key.to_owned(),
            expected,
            found: found.type_name(),
        }
    }
}

/// Expected-value check against a named fixture attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub target: String,
    #[serde(default)]
    pub comparator: Comparator,
    #[serde(default)]
    pub expected: Value,
    /// Message reported when the check fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Informational note logged when the check passes. Never affects the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_pass: Option<String>,
}

impl Assertion {
    pub fn new(target: impl Into<String>, comparator: Comparator, expected: impl Into<Value>) -> Self {
        Self {
            label: String::new(),
            target: target.into(),
            comparator,
            expected: expected.into(),
            message: None,
            on_pass: None,
        }
    }

    pub fn equals(target: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::new(target, Comparator::Eq, expected)
    }

    pub fn not_null(target: impl Into<String>) -> Self {
        Self::new(target, Comparator::NotNull, Value::Null)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_on_pass(mut self, note: impl Into<String>) -> Self {
        self.on_pass = Some(note.into());
        self
    }

    /// Label used in reports; falls back to the target attribute.
    pub fn label(&self) -> &str {
        if self.label.is_empty() {
            &self.target
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Action(Action),
    Assert(Assertion),
}

impl Step {
    /// Action name or assertion label.
    pub fn label(&self) -> &str {
        match self {
            Step::Action(action) => &action.name,
            Step::Assert(assertion) => assertion.label(),
        }
    }
}

/// Ordered action/assertion steps plus the fixture kind they run against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub fixture: FixtureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn builder(name: impl Into<String>, fixture: FixtureKind) -> ScenarioBuilder {
        ScenarioBuilder::new(name, fixture)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.steps.iter().filter_map(|step| match step {
            Step::Action(action) => Some(action),
            Step::Assert(_) => None,
        })
    }

    pub fn assertions(&self) -> impl Iterator<Item = &Assertion> {
        self.steps.iter().filter_map(|step| match step {
            Step::Assert(assertion) => Some(assertion),
            Step::Action(_) => None,
        })
    }

    /// Check every step against the fixture catalog before anything runs.
    ///
    /// Parameter types are only known once a value is read, so those are
    /// reported by the failing step at run time instead.
    pub fn validate(&self) -> std::result::Result<(), DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError {
                step: None,
                error: ConfigurationError::UnnamedScenario,
            });
        }
        if self.steps.is_empty() {
            return Err(DefinitionError {
                step: None,
                error: ConfigurationError::EmptyScenario {
                    scenario: self.name.clone(),
                },
            });
        }
        let catalog = self.fixture.catalog();
        for (idx, step) in self.steps.iter().enumerate() {
            let located = |error| DefinitionError {
                step: Some(idx + 1),
                error,
            };
            match step {
                Step::Action(action) => catalog.check_action(action).map_err(located)?,
                Step::Assert(assertion) => {
                    catalog
                        .check_attribute(&assertion.target)
                        .map_err(located)?;
                    if assertion.comparator.requires_numeric() && !assertion.expected.is_numeric() {
                        return Err(located(ConfigurationError::InvalidExpectation {
                            label: assertion.label().to_owned(),
                            comparator: assertion.comparator,
                        }));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Incremental builder for scenarios defined in code.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>, fixture: FixtureKind) -> Self {
        Self {
            scenario: Scenario {
                name: name.into(),
                fixture,
                description: None,
                steps: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.scenario.description = Some(description.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.scenario.steps.push(Step::Action(action));
        self
    }

    /// Shorthand for an action with inline parameters.
    pub fn act<I, K, V>(self, name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let action = params
            .into_iter()
            .fold(Action::new(name), |action, (key, value)| action.with(key, value));
        self.action(action)
    }

    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.scenario.steps.push(Step::Assert(assertion));
        self
    }

    pub fn assert_eq(self, target: &str, expected: impl Into<Value>) -> Self {
        self.assert(Assertion::equals(target, expected))
    }

    /// Validate and return the finished scenario.
    pub fn build(self) -> std::result::Result<Scenario, DefinitionError> {
        self.scenario.validate()?;
        Ok(self.scenario)
    }

    /// Return the scenario without validation; `run_scenario` still reports
    /// definition problems as a failed result.
    pub fn build_unchecked(self) -> Scenario {
        self.scenario
    }
}
