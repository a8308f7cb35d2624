//! ---
//! fx_section: "11-harness"
//! fx_subsection: "02-fixtures"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "User registration page stub."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use super::{ActionSpec, AttributeSpec, Fixture, FixtureCatalog, FixtureKind};
use crate::error::Result;
use crate::scenario::Action;
use crate::value::Value;

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration completed successfully!";
const REGISTRATION_ERROR_MESSAGE: &str = "Name and a valid email are required.";

pub(super) static CATALOG: FixtureCatalog = FixtureCatalog {
    kind: FixtureKind::RegistrationPage,
    actions: &[
        ActionSpec {
            name: "fill_name",
            required: &["name"],
            summary: "Type into the name field",
        },
        ActionSpec {
            name: "fill_email",
            required: &["email"],
            summary: "Type into the email field",
        },
        ActionSpec {
            name: "click_register",
            required: &[],
            summary: "Submit the registration form",
        },
    ],
    attributes: &[
        AttributeSpec {
            name: "name",
            summary: "Current name field content",
        },
        AttributeSpec {
            name: "email",
            summary: "Current email field content",
        },
        AttributeSpec {
            name: "registered",
            summary: "Whether the last submit succeeded",
        },
        AttributeSpec {
            name: "success_message",
            summary: "Banner shown after a successful submit",
        },
        AttributeSpec {
            name: "error_message",
            summary: "Banner shown after a rejected submit",
        },
    ],
};

#[derive(Debug, Default)]
pub struct RegistrationPageFixture {
    name: String,
    email: String,
    registered: bool,
    success_message: String,
    error_message: String,
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

impl RegistrationPageFixture {
    fn submit(&mut self) {
        self.registered = !self.name.trim().is_empty() && is_plausible_email(&self.email);
        if self.registered {
            self.success_message = REGISTRATION_SUCCESS_MESSAGE.to_owned();
            self.error_message.clear();
        } else {
            self.success_message.clear();
            self.error_message = REGISTRATION_ERROR_MESSAGE.to_owned();
        }
    }
}

impl Fixture for RegistrationPageFixture {
    fn kind(&self) -> FixtureKind {
        FixtureKind::RegistrationPage
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action.name.as_str() {
            "fill_name" => self.name = action.text("name")?.to_owned(),
            "fill_email" => self.email = action.text("email")?.to_owned(),
            "click_register" => self.submit(),
            other => return Err(CATALOG.unknown_action(other)),
        }
        Ok(())
    }

    fn attribute(&self, name: &str) -> Result<Value> {
        let value = match name {
            "name" => Value::from(self.name.as_str()),
            "email" => Value::from(self.email.as_str()),
            "registered" => Value::Bool(self.registered),
            "success_message" => Value::from(self.success_message.as_str()),
            "error_message" => Value::from(self.error_message.as_str()),
            other => return Err(CATALOG.unknown_attribute(other)),
        };
        Ok(value)
    }
}
