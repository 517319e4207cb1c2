//! Assertions over page state captured during headless runs.

use scanbox_animation::ScanStep;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observable page state at one point in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSnapshot {
    /// Numeric probes by name. Model probes are absent until the model loads.
    pub probes: BTreeMap<String, f32>,
    pub floating: bool,
    pub pinned: bool,
    pub step: String,
    pub bursts: usize,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

/// Scenario name of a sequence step
pub fn step_name(step: ScanStep) -> &'static str {
    match step {
        ScanStep::Idle => "idle",
        ScanStep::Spin => "spin",
        ScanStep::ShrinkModel => "shrink_model",
        ScanStep::ShrinkContainer => "shrink_container",
        ScanStep::Burst => "burst",
        ScanStep::Done => "done",
    }
}

pub fn evaluate_assert_floating(expected: bool, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.floating == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "floating_mismatch",
            format!("expected floating = {expected}, got {}", snapshot.floating),
        )
    }
}

pub fn evaluate_assert_near(
    probe: &str,
    expected: f32,
    tolerance: f32,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let Some(&actual) = snapshot.probes.get(probe) else {
        return AssertionResult::failed("missing_probe", format!("{probe}: probe not available"));
    };
    if (actual - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "value_mismatch",
            format!("{probe}: expected {expected} ± {tolerance}, got {actual}"),
        )
    }
}

pub fn evaluate_assert_step(expected: &str, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.step == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "step_mismatch",
            format!("expected step '{expected}', got '{}'", snapshot.step),
        )
    }
}

pub fn evaluate_assert_bursts(expected: usize, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.bursts == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "burst_count_mismatch",
            format!("expected {expected} bursts, got {}", snapshot.bursts),
        )
    }
}
