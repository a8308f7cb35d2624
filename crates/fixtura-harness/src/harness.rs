//! ---
//! fx_section: "11-harness"
//! fx_subsection: "01-core"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Scenario execution: actions, assertions and fail-fast runs."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
//! Runs scenarios one at a time against freshly created fixtures.
//!
//! [`run_scenario`] only accepts a definition and allocates its own fixture,
//! so no fixture state can be shared between runs. Both configuration errors
//! and assertion failures are turned into a [`ScenarioResult`]; nothing
//! escapes as a panic or an `Err`.

use fixtura_common::RunnerConfig;
use fixtura_logging::{
    fx_debug, fx_info, fx_warn, log_scenario_event, LogContext, ScenarioEventOutcome,
};
use tracing::info;

use crate::error::{AssertionFailure, ConfigurationError, StepFailure};
use crate::fixture::{new_fixture as construct_fixture, Fixture, FixtureKind};
use crate::report::{ScenarioResult, ScenarioStatus, SuiteReport};
use crate::scenario::{Action, Assertion, Scenario, Step};

/// Construct a zero-valued fixture for `kind`.
pub fn new_fixture(kind: FixtureKind) -> Box<dyn Fixture> {
    construct_fixture(kind)
}

/// Apply an action's effect to the fixture.
pub fn run_action(fixture: &mut dyn Fixture, action: &Action) -> Result<(), ConfigurationError> {
    fixture.kind().catalog().check_action(action)?;
    fixture.apply(action)
}

/// Compare the fixture's current attribute value with the expected literal.
///
/// Never mutates the fixture.
pub fn check_assertion(fixture: &dyn Fixture, assertion: &Assertion) -> Result<(), StepFailure> {
    let actual = fixture.attribute(&assertion.target)?;
    if assertion.comparator.evaluate(&actual, &assertion.expected) {
        return Ok(());
    }
    Err(StepFailure::Assertion(AssertionFailure {
        label: assertion.label().to_owned(),
        target: assertion.target.clone(),
        comparator: assertion.comparator,
        expected: assertion.expected.clone(),
        actual,
        message: assertion.message.clone(),
    }))
}

/// Run every step of `scenario` in order, stopping at the first failure.
pub fn run_scenario(scenario: &Scenario) -> ScenarioResult {
    let fixture_name = scenario.fixture.as_str();
    let ctx = LogContext::new()
        .with_scenario(&scenario.name)
        .with_fixture(fixture_name);
    let mut result = ScenarioResult {
        scenario: scenario.name.clone(),
        fixture: scenario.fixture,
        status: ScenarioStatus::Passed,
        steps_total: scenario.steps.len(),
        steps_executed: 0,
        failed_step: None,
        failed_assertion: None,
        failed_label: None,
        failure: None,
    };

    if let Err(definition) = scenario.validate() {
        result.status = ScenarioStatus::Failed;
        result.failed_step = definition.step;
        result.failed_label = definition
            .step
            .and_then(|step| scenario.steps.get(step - 1))
            .map(|step| step.label().to_owned());
        log_scenario_event(
            Some(&ctx),
            "scenario.rejected",
            &definition.to_string(),
            ScenarioEventOutcome::Failed,
        );
        result.failure = Some(StepFailure::Configuration(definition.error));
        return result;
    }

    fx_info!(context = ctx, "scenario started with {} steps", scenario.steps.len());
    let mut fixture = new_fixture(scenario.fixture);
    let mut assertion_index = 0;

    for (idx, step) in scenario.steps.iter().enumerate() {
        let position = idx + 1;
        let step_ctx = ctx.with_step(position).with_action(step.label());
        result.steps_executed = position;

        let outcome = match step {
            Step::Action(action) => {
                fx_debug!(context = step_ctx, "running action");
                run_action(fixture.as_mut(), action).map_err(StepFailure::from)
            }
            Step::Assert(assertion) => {
                assertion_index += 1;
                fx_debug!(
                    context = step_ctx,
                    "checking {} {} {}",
                    assertion.target,
                    assertion.comparator.symbol(),
                    assertion.expected
                );
                let checked = check_assertion(fixture.as_ref(), assertion);
                if checked.is_ok() {
                    if let Some(note) = &assertion.on_pass {
                        info!(scenario = %scenario.name, step = position, "{note}");
                    }
                }
                checked
            }
        };

        if let Err(failure) = outcome {
            fx_warn!(context = step_ctx, "step failed: {failure}");
            result.status = ScenarioStatus::Failed;
            result.failed_step = Some(position);
            if failure.is_assertion() {
                result.failed_assertion = Some(assertion_index);
            }
            result.failed_label = Some(step.label().to_owned());
            result.failure = Some(failure);
            break;
        }
    }

    let outcome = if result.passed() {
        ScenarioEventOutcome::Passed
    } else {
        ScenarioEventOutcome::Failed
    };
    log_scenario_event(Some(&ctx), "scenario.finished", &result.to_string(), outcome);
    result
}

/// Runs a batch of scenarios sequentially, each against its own fixture.
#[derive(Debug, Clone, Default)]
pub struct SuiteRunner {
    stop_on_first_failure: bool,
}

impl SuiteRunner {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            stop_on_first_failure: config.stop_on_first_failure,
        }
    }

    pub fn stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    pub fn run(&self, suite: &str, scenarios: &[Scenario]) -> SuiteReport {
        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = run_scenario(scenario);
            let failed = !result.passed();
            results.push(result);
            if failed && self.stop_on_first_failure {
                break;
            }
        }
        let report = SuiteReport::new(suite, scenarios.len(), results);
        info!(
            suite = %report.suite,
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            "suite finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Comparator;
    use crate::value::Value;

    fn registration() -> Scenario {
        Scenario::builder("registration", FixtureKind::RegistrationPage)
            .act("fill_name", [("name", "John Doe")])
            .act("fill_email", [("email", "john.doe@example.com")])
            .act("click_register", Vec::<(String, Value)>::new())
            .assert_eq("success_message", "Registration completed successfully!")
            .build()
            .unwrap()
    }

    #[test]
    fn check_assertion_does_not_touch_state() {
        let mut fixture = new_fixture(FixtureKind::OrderIntegration);
        run_action(
            fixture.as_mut(),
            &Action::new("set_order_id").with("order_id", "A"),
        )
        .unwrap();
        let assertion = Assertion::equals("order_id", "");
        assert!(check_assertion(fixture.as_ref(), &assertion).is_ok());
        assert!(check_assertion(fixture.as_ref(), &assertion).is_ok());
    }

    #[test]
    fn run_action_checks_required_parameters_first() {
        let mut fixture = new_fixture(FixtureKind::RegistrationPage);
        let err = run_action(fixture.as_mut(), &Action::new("fill_email")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingParameter {
                action: "fill_email".into(),
                parameter: "email".into(),
            }
        );
    }

    #[test]
    fn check_assertion_reports_unknown_target_as_configuration() {
        let fixture = new_fixture(FixtureKind::RegistrationPage);
        let err =
            check_assertion(fixture.as_ref(), &Assertion::equals("captcha", "x")).unwrap_err();
        assert!(!err.is_assertion());
    }

    #[test]
    fn passing_scenario_executes_every_step() {
        let result = run_scenario(&registration());
        assert_eq!(result.status, ScenarioStatus::Passed);
        assert_eq!(result.steps_executed, 4);
        assert_eq!(result.failure, None);
    }

    #[test]
    fn invalid_definition_fails_without_running() {
        let scenario = Scenario::builder("typo", FixtureKind::RegistrationPage)
            .act("fill_name", [("name", "Jane")])
            .assert_eq("sucess_message", "x")
            .build_unchecked();
        let result = run_scenario(&scenario);
        assert_eq!(result.status, ScenarioStatus::Failed);
        assert_eq!(result.failed_step, Some(2));
        assert_eq!(result.failed_assertion, None);
        assert_eq!(result.steps_executed, 0);
        assert_eq!(result.failed_label.as_deref(), Some("sucess_message"));
    }

    #[test]
    fn runtime_configuration_error_stops_scenario() {
        let scenario = Scenario::builder("wrong type", FixtureKind::OrderIntegration)
            .act("set_amount", [("amount", "1500")])
            .assert_eq("amount", 1500.0)
            .build()
            .unwrap();
        let result = run_scenario(&scenario);
        assert_eq!(result.failed_step, Some(1));
        assert_eq!(result.steps_executed, 1);
        assert!(matches!(
            result.failure,
            Some(StepFailure::Configuration(ConfigurationError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn on_pass_note_does_not_change_outcome() {
        let scenario = Scenario::builder("note", FixtureKind::OrderIntegration)
            .assert(
                Assertion::new("amount", Comparator::Le, 10)
                    .with_on_pass("All good: limit not exceeded."),
            )
            .build()
            .unwrap();
        assert!(run_scenario(&scenario).passed());
    }

    #[test]
    fn suite_runner_can_stop_after_first_failure() {
        let failing = Scenario::builder("failing", FixtureKind::OrderIntegration)
            .assert_eq("status", "SUCCESS")
            .build()
            .unwrap();
        let scenarios = vec![failing, registration()];

        let full = SuiteRunner::default().run("suite", &scenarios);
        assert_eq!((full.passed, full.failed, full.skipped), (1, 1, 0));

        let stopped = SuiteRunner::default()
            .stop_on_first_failure(true)
            .run("suite", &scenarios);
        assert_eq!((stopped.passed, stopped.failed, stopped.skipped), (0, 1, 1));
    }
}
