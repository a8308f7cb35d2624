//! ---
//! fx_section: "11-harness"
//! fx_subsection: "02-fixtures"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Fixture trait, fixture kinds and their catalogs."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
//! Simulated-service stubs the harness drives.
//!
//! Every fixture is created zero-valued by [`new_fixture`] and owned by a
//! single scenario run. The [`FixtureCatalog`] of each kind lists the actions
//! and attributes it understands so scenarios can be checked before running.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::scenario::Action;
use crate::value::Value;

mod order;
mod policy;
mod registration;

pub use order::{OrderIntegrationFixture, OrderStatus};
pub use policy::{PolicyLimitsFixture, UNDERWRITING_THRESHOLD};
pub use registration::{RegistrationPageFixture, REGISTRATION_SUCCESS_MESSAGE};

/// Simulated-service stub driven by scenario steps.
pub trait Fixture: fmt::Debug {
    fn kind(&self) -> FixtureKind;

    /// Apply an action's effect to the in-memory state.
    fn apply(&mut self, action: &Action) -> Result<()>;

    /// Read the current value of a named attribute.
    fn attribute(&self, name: &str) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FixtureKind {
    OrderIntegration,
    RegistrationPage,
    PolicyLimits,
}

impl FixtureKind {
    pub const ALL: [FixtureKind; 3] = [
        FixtureKind::OrderIntegration,
        FixtureKind::RegistrationPage,
        FixtureKind::PolicyLimits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureKind::OrderIntegration => "order-integration",
            FixtureKind::RegistrationPage => "registration-page",
            FixtureKind::PolicyLimits => "policy-limits",
        }
    }

    pub fn catalog(&self) -> &'static FixtureCatalog {
        match self {
            FixtureKind::OrderIntegration => &order::CATALOG,
            FixtureKind::RegistrationPage => &registration::CATALOG,
            FixtureKind::PolicyLimits => &policy::CATALOG,
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FixtureKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        FixtureKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| ConfigurationError::UnknownFixtureKind { name: s.to_owned() })
    }
}

impl TryFrom<String> for FixtureKind {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FixtureKind> for String {
    fn from(kind: FixtureKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// Construct a fresh, zero-valued fixture of the given kind.
pub fn new_fixture(kind: FixtureKind) -> Box<dyn Fixture> {
    match kind {
        FixtureKind::OrderIntegration => Box::<OrderIntegrationFixture>::default(),
        FixtureKind::RegistrationPage => Box::<RegistrationPageFixture>::default(),
        FixtureKind::PolicyLimits => Box::<PolicyLimitsFixture>::default(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub summary: &'static str,
}

/// Attribute names are exact, or a `prefix.*` pattern accepting any
/// non-empty suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub summary: &'static str,
}

impl AttributeSpec {
    pub fn matches(&self, attribute: &str) -> bool {
        match self.name.strip_suffix('*') {
            Some(prefix) => attribute
                .strip_prefix(prefix)
                .map(|rest| !rest.is_empty())
                .unwrap_or(false),
            None => self.name == attribute,
        }
    }
}

#[derive(Debug)]
pub struct FixtureCatalog {
    pub kind: FixtureKind,
    pub actions: &'static [ActionSpec],
    pub attributes: &'static [AttributeSpec],
}

impl FixtureCatalog {
    pub fn action(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|spec| spec.name == name)
    }

    /// Check the action name and the presence of its required parameters.
    pub fn check_action(&self, action: &Action) -> Result<()> {
        let spec = self
            .action(&action.name)
            .ok_or_else(|| self.unknown_action(&action.name))?;
        for parameter in spec.required {
            action.param(parameter)?;
        }
        Ok(())
    }

    pub fn check_attribute(&self, attribute: &str) -> Result<()> {
        if self.attributes.iter().any(|spec| spec.matches(attribute)) {
            Ok(())
        } else {
            Err(self.unknown_attribute(attribute))
        }
    }

    pub(crate) fn unknown_action(&self, action: &str) -> ConfigurationError {
        ConfigurationError::UnknownAction {
            fixture: self.kind.to_string(),
            action: action.to_owned(),
        }
    }

    pub(crate) fn unknown_attribute(&self, attribute: &str) -> ConfigurationError {
        ConfigurationError::UnknownAttribute {
            fixture: self.kind.to_string(),
            attribute: attribute.to_owned(),
        }
    }
}
