//! ---
//! fx_section: "11-harness"
//! fx_subsection: "integration-tests"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "End-to-end scenario runs against the bundled fixtures."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use fixtura_harness::{
    run_scenario, Assertion, Comparator, ConfigurationError, FixtureKind, Scenario,
    ScenarioStatus, StepFailure, Value,
};

const NO_PARAMS: [(&str, Value); 0] = [];

fn order_scenario(order_id: &str, amount: f64, items: Vec<&str>, expected_status: &str) -> Scenario {
    Scenario::builder("order integration", FixtureKind::OrderIntegration)
        .act("set_order_id", [("order_id", order_id)])
        .act("set_amount", [("amount", amount)])
        .act("set_customer_email", [("email", "test@example.com")])
        .act("set_items", [("items", items)])
        .act("send_order", NO_PARAMS)
        .assert_eq("status", expected_status)
        .assert_eq("order_id", order_id)
        .assert_eq("amount", amount)
        .assert_eq("customer_email", "test@example.com")
        .build()
        .unwrap()
}

#[test]
fn successful_order_integration_passes() {
    let scenario = Scenario::builder("successful integration", FixtureKind::OrderIntegration)
        .act("set_order_id", [("order_id", "TEST-123")])
        .act("set_amount", [("amount", 1500.0)])
        .act("set_customer_email", [("email", "test@example.com")])
        .act("set_items", [("items", vec!["Item1", "Item2"])])
        .act("send_order", NO_PARAMS)
        .assert_eq("status", "SUCCESS")
        .assert_eq("order_id", "TEST-123")
        .assert_eq("amount", 1500.0)
        .assert_eq("customer_email", "test@example.com")
        .assert_eq("items_joined", "Item1, Item2")
        .build()
        .unwrap();

    let result = run_scenario(&scenario);
    assert_eq!(result.status, ScenarioStatus::Passed);
    assert_eq!(result.steps_executed, scenario.steps.len());
    assert_eq!(result.failed_step, None);
}

#[test]
fn invalid_order_fails_at_status_assertion() {
    let scenario = Scenario::builder("invalid integration", FixtureKind::OrderIntegration)
        .act("set_order_id", [("order_id", "INVALID-ORDER-ID")])
        .act("set_amount", [("amount", 0.0)])
        .act("set_customer_email", [("email", "invalid-email@example.com")])
        .act("set_items", [("items", Vec::<&str>::new())])
        .act("send_order", NO_PARAMS)
        .assert_eq("status", "SUCCESS")
        .assert_eq("order_id", "INVALID-ORDER-ID")
        .build()
        .unwrap();

    let result = run_scenario(&scenario);
    assert_eq!(result.status, ScenarioStatus::Failed);
    assert_eq!(result.failed_assertion, Some(1));
    assert_eq!(result.failed_step, Some(6));
    assert_eq!(result.steps_executed, 6);
    match result.failure {
        Some(StepFailure::Assertion(failure)) => {
            assert_eq!(failure.expected, Value::from("SUCCESS"));
            assert_eq!(failure.actual, Value::from("INVALID_ORDER_ID"));
            assert_eq!(failure.label, "status");
        }
        other => panic!("expected assertion failure, got {other:?}"),
    }
}

#[test]
fn invalid_order_passes_when_expecting_rejection() {
    let scenario = order_scenario("INVALID-ORDER-ID", 0.0, Vec::new(), "INVALID_ORDER_ID");
    assert!(run_scenario(&scenario).passed());
}

#[test]
fn registration_shows_success_message() {
    let scenario = Scenario::builder("successful registration", FixtureKind::RegistrationPage)
        .act("fill_name", [("name", "John Doe")])
        .act("fill_email", [("email", "john.doe@example.com")])
        .act("click_register", NO_PARAMS)
        .assert_eq("success_message", "Registration completed successfully!")
        .build()
        .unwrap();
    assert_eq!(run_scenario(&scenario).status, ScenarioStatus::Passed);
}

#[test]
fn first_failing_assertion_stops_the_rest() {
    // Step 5 would fail with a configuration error if it ran.
    let scenario = Scenario::builder("fail fast", FixtureKind::OrderIntegration)
        .act("set_order_id", [("order_id", "A-1")])
        .act("send_order", NO_PARAMS)
        .assert_eq("order_id", "A-1")
        .assert_eq("amount", 1.0)
        .act("set_amount", [("amount", "not a number")])
        .assert_eq("amount", 0.0)
        .build()
        .unwrap();

    let result = run_scenario(&scenario);
    assert_eq!(result.failed_assertion, Some(2));
    assert_eq!(result.failed_step, Some(4));
    assert_eq!(result.steps_executed, 4);
    assert!(result.failure.as_ref().is_some_and(StepFailure::is_assertion));
}

#[test]
fn list_assertions_are_order_sensitive() {
    let scenario = Scenario::builder("ordering", FixtureKind::OrderIntegration)
        .act("add_item", [("item", "Item2")])
        .act("add_item", [("item", "Item1")])
        .act("send_order", NO_PARAMS)
        .assert_eq("items", vec!["Item1", "Item2"])
        .build()
        .unwrap();
    let result = run_scenario(&scenario);
    assert_eq!(result.status, ScenarioStatus::Failed);
    assert_eq!(result.failed_assertion, Some(1));
}

#[test]
fn numeric_assertions_have_no_tolerance() {
    let scenario = Scenario::builder("exact amount", FixtureKind::OrderIntegration)
        .act("set_amount", [("amount", 0.1 + 0.2)])
        .act("send_order", NO_PARAMS)
        .assert_eq("amount", 0.3)
        .build()
        .unwrap();
    assert!(!run_scenario(&scenario).passed());
}

#[test]
fn repeated_runs_are_identical() {
    let scenarios = [
        order_scenario("TEST-123", 1500.0, vec!["Item1"], "SUCCESS"),
        order_scenario("INVALID-ORDER-ID", 0.0, Vec::new(), "SUCCESS"),
    ];
    for scenario in &scenarios {
        assert_eq!(run_scenario(scenario), run_scenario(scenario));
    }
}

#[test]
fn scenarios_do_not_share_fixture_state() {
    let first = Scenario::builder("sends", FixtureKind::OrderIntegration)
        .act("set_order_id", [("order_id", "A-1")])
        .act("send_order", NO_PARAMS)
        .assert_eq("sent_count", 1)
        .build()
        .unwrap();
    let second = Scenario::builder("fresh", FixtureKind::OrderIntegration)
        .assert_eq("sent_count", 0)
        .assert_eq("order_id", "")
        .assert_eq("items", Vec::<&str>::new())
        .build()
        .unwrap();
    assert!(run_scenario(&first).passed());
    assert!(run_scenario(&second).passed());
    assert!(run_scenario(&first).passed());
}

fn policy_limit_scenario(prior_risk: i64) -> Scenario {
    Scenario::builder("ISJ policy with limits", FixtureKind::PolicyLimits)
        .act(
            "create_policy",
            [("amount", 1_000_000_000_i64), ("gk_amount", 80_000_000_i64)],
        )
        .act("register_person_risk", [("risk_sum", prior_risk)])
        .act("send_general_request", [("product_type", 1_i64)])
        .assert_eq("integration_log.ISG_CUMULATION", true)
        .assert(Assertion::not_null("appext.4440311"))
        .assert_eq("appext.4440311.error", "")
        .assert_eq("appext.4440568", 1)
        .act("compute_total_risk", NO_PARAMS)
        .assert(
            Assertion::new("total_risk_sum", Comparator::Le, 1_000_000_000_i64)
                .with_label("risk sum within limit")
                .with_message("Limit exceeded: total risk sum exceeds limit.")
                .with_on_pass("All good: limit not exceeded."),
        )
        .assert_eq(
            "general_response.StatusDesc",
            "Underwriting is required for the application",
        )
        .build()
        .unwrap()
}

#[test]
fn policy_within_limit_passes() {
    let result = run_scenario(&policy_limit_scenario(0));
    assert_eq!(result.status, ScenarioStatus::Passed, "{result}");
}

#[test]
fn policy_over_limit_reports_limit_message() {
    let result = run_scenario(&policy_limit_scenario(250_000_000));
    assert_eq!(result.failed_assertion, Some(5));
    assert_eq!(result.failed_label.as_deref(), Some("risk sum within limit"));
    let rendered = result.to_string();
    assert!(
        rendered.contains(
            "Limit exceeded: total risk sum exceeds limit. (expected <= 1000000000, got 1250000000)"
        ),
        "{rendered}"
    );
}

#[test]
fn out_of_order_policy_actions_fail_with_configuration_error() {
    let scenario = Scenario::builder("no policy", FixtureKind::PolicyLimits)
        .act("send_general_request", [("product_type", 1_i64)])
        .assert_eq("request_id", "REQ-000001")
        .build()
        .unwrap();
    let result = run_scenario(&scenario);
    assert_eq!(result.failed_step, Some(1));
    assert_eq!(result.failed_assertion, None);
    assert!(matches!(
        result.failure,
        Some(StepFailure::Configuration(
            ConfigurationError::MissingPrerequisite { .. }
        ))
    ));
}
