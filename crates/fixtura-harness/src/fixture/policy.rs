//! ---
//! fx_section: "11-harness"
//! fx_subsection: "02-fixtures"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Investment life policy stub with cumulation limits."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
//! Stands in for the policy back office: the data provider issuing policies
//! and general requests, the integration log, the app-extension parameter
//! store and the person limit service. They share one state so that a
//! request is visible in all of them at once.

use indexmap::IndexMap;
use serde_json::json;

use super::{ActionSpec, AttributeSpec, Fixture, FixtureCatalog, FixtureKind};
use crate::error::{ConfigurationError, Result};
use crate::scenario::Action;
use crate::value::Value;

/// Cumulated risk at or above which a general request goes to underwriting.
pub const UNDERWRITING_THRESHOLD: i64 = 1_000_000_000;

const CUMULATION_LOG_KIND: &str = "ISG_CUMULATION";
const ADDITIONAL_PARAMETER_CODE: &str = "4440311";
const CUMULATION_RESULT_CODE: &str = "4440568";
const POLICY_RISK_CODE: &str = "8857";
const STATUS_UNDERWRITING: &str = "Underwriting is required for the application";
const STATUS_ACCEPTED: &str = "Application accepted";

pub(super) static CATALOG: FixtureCatalog = FixtureCatalog {
    kind: FixtureKind::PolicyLimits,
    actions: &[
        ActionSpec {
            name: "create_policy",
            required: &["amount", "gk_amount"],
            summary: "Issue a policy for the main and guaranteed-capital amounts",
        },
        ActionSpec {
            name: "register_person_risk",
            required: &["risk_sum"],
            summary: "Record a risk the insured person already holds elsewhere",
        },
        ActionSpec {
            name: "send_general_request",
            required: &["product_type"],
            summary: "Send a general request (1 = UK, 2 = GK, 3 = both) for the current policy",
        },
        ActionSpec {
            name: "compute_total_risk",
            required: &[],
            summary: "Derive the person's total risk sum including the current policy",
        },
    ],
    attributes: &[
        AttributeSpec {
            name: "policy_id",
            summary: "Identifier of the current policy",
        },
        AttributeSpec {
            name: "request_id",
            summary: "Identifier of the current general request",
        },
        AttributeSpec {
            name: "total_risk_sum",
            summary: "Result of the last compute_total_risk",
        },
        AttributeSpec {
            name: "integration_log.*",
            summary: "Whether the current request logged a record of the given type",
        },
        AttributeSpec {
            name: "appext.*",
            summary: "Parameter value by code for the current policy; `appext.<code>.<field>` reads a JSON field",
        },
        AttributeSpec {
            name: "general_response",
            summary: "Raw response document of the current request",
        },
        AttributeSpec {
            name: "general_response.*",
            summary: "Field of the current request's response document",
        },
    ],
};

#[derive(Debug, Clone, Copy)]
struct Policy {
    amount: i64,
    gk_amount: i64,
}

#[derive(Debug, Clone)]
struct LogRecord {
    request_id: String,
    kind: String,
}

#[derive(Debug, Default)]
pub struct PolicyLimitsFixture {
    policies: IndexMap<String, Policy>,
    current_policy: Option<String>,
    current_request: Option<String>,
    request_count: usize,
    integration_log: Vec<LogRecord>,
    appext: IndexMap<String, IndexMap<String, Value>>,
    general_responses: IndexMap<String, String>,
    person_risks: Vec<i64>,
    total_risk_sum: i64,
}

impl PolicyLimitsFixture {
    fn create_policy(&mut self, action: &Action) -> Result<()> {
        let policy = Policy {
            amount: action.integer("amount")?,
            gk_amount: action.integer("gk_amount")?,
        };
        let policy_id = format!("ISJ-{:06}", self.policies.len() + 1);
        self.policies.insert(policy_id.clone(), policy);
        self.current_policy = Some(policy_id);
        self.current_request = None;
        Ok(())
    }

    fn send_general_request(&mut self, action: &Action) -> Result<()> {
        let product_type = action.integer("product_type")?;
        let (policy_id, policy) = self.require_policy(action)?;
        let policy_risk = match product_type {
            1 => policy.amount,
            2 => policy.gk_amount,
            3 => policy.amount.saturating_add(policy.gk_amount),
            _ => {
                return Err(ConfigurationError::InvalidParameter {
                    action: action.name.clone(),
                    parameter: "product_type".into(),
                    expected: "a product type between 1 and 3",
                    found: "an integer out of range",
                })
            }
        };

        self.request_count += 1;
        let request_id = format!("REQ-{:06}", self.request_count);
        self.integration_log.push(LogRecord {
            request_id: request_id.clone(),
            kind: CUMULATION_LOG_KIND.to_owned(),
        });

        let parameters = self.appext.entry(policy_id).or_default();
        parameters.insert(
            ADDITIONAL_PARAMETER_CODE.to_owned(),
            Value::Text(json!({ "error": "" }).to_string()),
        );
        parameters.insert(CUMULATION_RESULT_CODE.to_owned(), Value::Int(1));
        parameters.insert(POLICY_RISK_CODE.to_owned(), Value::Int(policy_risk));

        let cumulated = self
            .person_risks
            .iter()
            .fold(policy.amount.saturating_add(policy.gk_amount), |acc, risk| {
                acc.saturating_add(*risk)
            });
        let status = if cumulated >= UNDERWRITING_THRESHOLD {
            STATUS_UNDERWRITING
        } else {
            STATUS_ACCEPTED
        };
        self.general_responses.insert(
            request_id.clone(),
            json!({ "RequestId": request_id, "StatusDesc": status }).to_string(),
        );
        self.current_request = Some(request_id);
        Ok(())
    }

    fn compute_total_risk(&mut self, action: &Action) -> Result<()> {
        let current = self
            .current_policy
            .as_ref()
            .and_then(|id| self.appext.get(id))
            .and_then(|parameters| parameters.get(POLICY_RISK_CODE))
            .and_then(Value::as_i64)
            .ok_or_else(|| ConfigurationError::MissingPrerequisite {
                action: action.name.clone(),
                requirement: "a general request for the current policy".into(),
            })?;
        self.total_risk_sum = self
            .person_risks
            .iter()
            .fold(current, |acc, risk| acc.saturating_add(*risk));
        Ok(())
    }

    fn require_policy(&self, action: &Action) -> Result<(String, Policy)> {
        self.current_policy
            .as_ref()
            .and_then(|id| self.policies.get(id).map(|policy| (id.clone(), *policy)))
            .ok_or_else(|| ConfigurationError::MissingPrerequisite {
                action: action.name.clone(),
                requirement: "a policy created by create_policy".into(),
            })
    }

    fn appext_value(&self, path: &str) -> Value {
        let (code, field) = match path.split_once('.') {
            Some((code, field)) => (code, Some(field)),
            None => (path, None),
        };
        let stored = self
            .current_policy
            .as_ref()
            .and_then(|id| self.appext.get(id))
            .and_then(|parameters| parameters.get(code));
        match (stored, field) {
            (None, _) => Value::Null,
            (Some(value), None) => value.clone(),
            (Some(value), Some(field)) => value
                .as_text()
                .map(|text| json_field(text, field))
                .unwrap_or(Value::Null),
        }
    }

    fn general_response(&self) -> Option<&str> {
        self.current_request
            .as_ref()
            .and_then(|id| self.general_responses.get(id))
            .map(String::as_str)
    }
}

/// Field of a JSON object stored as text; `Null` when either is missing.
fn json_field(document: &str, field: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(document)
        .ok()
        .and_then(|mut parsed| parsed.get_mut(field).map(serde_json::Value::take))
        .map(Value::from)
        .unwrap_or(Value::Null)
}

impl Fixture for PolicyLimitsFixture {
    fn kind(&self) -> FixtureKind {
        FixtureKind::PolicyLimits
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action.name.as_str() {
            "create_policy" => self.create_policy(action),
            "register_person_risk" => {
                let risk = action.integer("risk_sum")?;
                self.person_risks.push(risk);
                Ok(())
            }
            "send_general_request" => self.send_general_request(action),
            "compute_total_risk" => self.compute_total_risk(action),
            other => Err(CATALOG.unknown_action(other)),
        }
    }

    fn attribute(&self, name: &str) -> Result<Value> {
        let value = match name {
            "policy_id" => Value::from(self.current_policy.clone().unwrap_or_default()),
            "request_id" => Value::from(self.current_request.clone().unwrap_or_default()),
            "total_risk_sum" => Value::Int(self.total_risk_sum),
            "general_response" => Value::from(self.general_response().unwrap_or_default()),
            other => {
                if let Some(kind) = other.strip_prefix("integration_log.") {
                    let logged = self.current_request.as_ref().is_some_and(|request| {
                        self.integration_log
                            .iter()
                            .any(|record| &record.request_id == request && record.kind == kind)
                    });
                    Value::Bool(logged)
                } else if let Some(path) = other.strip_prefix("appext.") {
                    self.appext_value(path)
                } else if let Some(field) = other.strip_prefix("general_response.") {
                    self.general_response()
                        .map(|document| json_field(document, field))
                        .unwrap_or(Value::Null)
                } else {
                    return Err(CATALOG.unknown_attribute(other));
                }
            }
        };
        Ok(value)
    }
}
