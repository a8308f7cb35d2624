//! ---
//! fx_section: "11-harness"
//! fx_subsection: "03-reporting"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Static analytics over scenario definitions."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use std::collections::BTreeMap;

use serde::Serialize;

use crate::scenario::Scenario;

/// Rough size class of a scenario by its action and assertion counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn classify(actions: usize, assertions: usize) -> Self {
        if actions <= 2 && assertions <= 3 {
            Complexity::Simple
        } else if actions <= 5 && assertions <= 10 {
            Complexity::Medium
        } else {
            Complexity::Complex
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplexityBreakdown {
    pub simple: usize,
    pub medium: usize,
    pub complex: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteStats {
    pub scenarios: usize,
    pub actions: usize,
    pub assertions: usize,
    pub assertions_by_comparator: BTreeMap<String, usize>,
    pub fixture_kinds: BTreeMap<String, usize>,
    pub complexity: ComplexityBreakdown,
}

impl SuiteStats {
    pub fn collect<'a>(scenarios: impl IntoIterator<Item = &'a Scenario>) -> Self {
        let mut stats = SuiteStats::default();
        for scenario in scenarios {
            stats.scenarios += 1;
            *stats
                .fixture_kinds
                .entry(scenario.fixture.to_string())
                .or_default() += 1;

            let actions = scenario.actions().count();
            let mut assertions = 0;
            for assertion in scenario.assertions() {
                assertions += 1;
                *stats
                    .assertions_by_comparator
                    .entry(assertion.comparator.to_string())
                    .or_default() += 1;
            }
            stats.actions += actions;
            stats.assertions += assertions;

            match Complexity::classify(actions, assertions) {
                Complexity::Simple => stats.complexity.simple += 1,
                Complexity::Medium => stats.complexity.medium += 1,
                Complexity::Complex => stats.complexity.complex += 1,
            }
        }
        stats
    }
}
