//! Plays a scenario against a page backed by a recording host and a manual
//! clock.

use crate::config::PageConfig;
use crate::headless_assert::{
    evaluate_assert_bursts, evaluate_assert_floating, evaluate_assert_near, evaluate_assert_step,
    step_name, AssertionResult, DiagnosticsSnapshot,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::host::RecordingHost;
use crate::page::ScanPage;
use anyhow::Result;
use scanbox_core::{Aabb, Clock, ManualClock, Vec3};
use std::collections::BTreeMap;
use std::rc::Rc;

type HeadlessPage = ScanPage<RecordingHost, Rc<ManualClock>>;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } | RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Parse scenario JSON and run it with default pacing.
pub fn run_scenario(config: &PageConfig, input: &str) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(config, &scenario, HeadlessRunConfig::default())
}

/// Run a parsed scenario.
pub fn run_loaded_scenario(
    config: &PageConfig,
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let clock = Rc::new(ManualClock::new(runtime_cfg.start_secs));
    let mut page = ScanPage::setup(config, RecordingHost::new(), clock.clone())?;
    let mut elapsed_frames: u64 = 0;
    let mut elapsed_ms: u64 = 0;

    tracing::debug!(steps = scenario.steps.len(), "running scenario");

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let (assertion, result) = match step {
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                run_frames(
                    &mut page,
                    &clock,
                    runtime_cfg,
                    wait_frames(*ms, runtime_cfg.tick_ms),
                    &mut elapsed_frames,
                    &mut elapsed_ms,
                    || {
                        let step_ms = remaining.min(runtime_cfg.tick_ms);
                        remaining -= step_ms;
                        step_ms
                    },
                )?;
                continue;
            }
            ScenarioStep::Tick { frames } => {
                run_frames(
                    &mut page,
                    &clock,
                    runtime_cfg,
                    *frames,
                    &mut elapsed_frames,
                    &mut elapsed_ms,
                    || runtime_cfg.tick_ms,
                )?;
                continue;
            }
            ScenarioStep::ScrollTo { offset } => {
                page.scroll_to(*offset);
                continue;
            }
            ScenarioStep::Resize { width, height } => {
                page.resize(*width, *height);
                continue;
            }
            ScenarioStep::LoadAsset { size, total_bytes } => {
                if let Some(total) = *total_bytes {
                    page.asset_progress(total / 2, total);
                    page.asset_progress(total, total);
                }
                page.asset_loaded(Aabb::from_size(Vec3::new(size[0], size[1], size[2])));
                continue;
            }
            ScenarioStep::FailAsset { message } => {
                page.asset_failed(message.clone());
                continue;
            }
            ScenarioStep::AssertFloating { expected } => (
                "assert_floating",
                evaluate_assert_floating(*expected, &capture(&page)),
            ),
            ScenarioStep::AssertNear {
                probe,
                value,
                tolerance,
            } => (
                "assert_near",
                evaluate_assert_near(probe, *value, *tolerance, &capture(&page)),
            ),
            ScenarioStep::AssertStep { step } => {
                ("assert_step", evaluate_assert_step(step, &capture(&page)))
            }
            ScenarioStep::AssertBursts { count } => (
                "assert_bursts",
                evaluate_assert_bursts(*count, &capture(&page)),
            ),
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!(step_index, assertion, %code, %message, "assertion failed");
            let report = HeadlessReport::failed(
                assertion,
                step_index,
                message,
                elapsed_frames,
                elapsed_ms,
                capture(&page),
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(elapsed_frames, elapsed_ms, capture(&page)),
    })
}

/// Read the probes off the page
pub fn capture<C: Clock>(page: &ScanPage<RecordingHost, C>) -> DiagnosticsSnapshot {
    let mut probes = BTreeMap::new();
    probes.insert("container_scale".to_string(), page.container_scale());
    probes.insert(
        "scroll_progress".to_string(),
        page.motion().scroll_progress(),
    );
    probes.insert("scroll_offset".to_string(), page.scroll_offset());
    probes.insert("camera_distance".to_string(), page.camera().position.z);
    if let Some(transform) = page.model_transform() {
        probes.insert("position_y".to_string(), transform.position.y);
        probes.insert("rotation_x".to_string(), transform.rotation.x);
        probes.insert("rotation_y".to_string(), transform.rotation.y);
        probes.insert("model_scale".to_string(), transform.scale.x);
    }

    DiagnosticsSnapshot {
        probes,
        floating: page.motion().is_floating(),
        pinned: page.is_pinned(),
        step: step_name(page.sequence_step()).to_string(),
        bursts: page.host().bursts.len(),
    }
}

fn run_frames<A>(
    page: &mut HeadlessPage,
    clock: &ManualClock,
    runtime_cfg: HeadlessRunConfig,
    frames: u32,
    elapsed_frames: &mut u64,
    elapsed_ms: &mut u64,
    mut advance_ms: A,
) -> Result<()>
where
    A: FnMut() -> u64,
{
    if frames == 0 {
        return Ok(());
    }

    let cfg = HeadlessRunConfig {
        max_frames: frames,
        ..runtime_cfg
    };
    HeadlessRuntime::run(cfg, |_| {
        let dt = advance_ms();
        clock.advance_ms(dt as f64);
        page.frame(dt as f32);
        *elapsed_frames = (*elapsed_frames).saturating_add(1);
        *elapsed_ms = (*elapsed_ms).saturating_add(dt);
    })
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    wait_ms.div_ceil(tick).min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PageConfig {
        PageConfig::from_toml_str(
            r#"
            [layout]
            scanner_offset = 1000.0

            [scroll]
            lerp = 1.0
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_wait_rounds_up_to_whole_frames() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
        assert_eq!(wait_frames(1000, 16), 63);
    }

    #[test]
    fn test_passing_run_reports_elapsed_time() {
        let outcome = run_scenario(
            &config(),
            r#"{ "steps": [
                { "type": "load_asset", "size": [1.0, 1.0, 1.0] },
                { "type": "wait", "ms": 1000 },
                { "type": "assert_near", "probe": "model_scale", "value": 1.0 },
                { "type": "assert_near", "probe": "container_scale", "value": 1.0 },
                { "type": "assert_floating", "expected": true },
                { "type": "assert_step", "step": "idle" }
            ] }"#,
        )
        .unwrap();

        assert!(!outcome.is_failed(), "{:?}", outcome.report());
        assert_eq!(outcome.report().elapsed_frames, 63);
        assert_eq!(outcome.report().elapsed_ms, 1000);
    }

    #[test]
    fn test_failing_assertion_stops_run() {
        let outcome = run_scenario(
            &config(),
            r#"{ "steps": [
                { "type": "tick", "frames": 2 },
                { "type": "assert_near", "probe": "rotation_x", "value": 0.0 },
                { "type": "tick", "frames": 100 }
            ] }"#,
        )
        .unwrap();

        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("assert_near"));
        assert_eq!(report.elapsed_frames, 2);
        assert!(report
            .message
            .as_deref()
            .unwrap_or_default()
            .contains("probe not available"));
    }

    #[test]
    fn test_missing_scanner_is_an_error() {
        let result = run_scenario(&PageConfig::default(), r#"{ "steps": [] }"#);
        assert!(result.is_err());
    }
}
