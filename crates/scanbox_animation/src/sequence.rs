//! The scan sequence
//!
//! Played when the scroll reaches the pinned scanner section:
//!
//! 1. **Spin**: one full turn of the model around Y
//! 2. **ShrinkModel**: the model scales down to nothing
//! 3. **ShrinkContainer**: the scan container overlay scales down
//! 4. **Burst**: a one-shot confetti burst
//!
//! Each step is a tween (or the burst) that only starts once the previous
//! step's tween reports completion. The sequence does not own the tweens;
//! it hands out [`SequenceAction`]s and is told which [`TweenId`] carries the
//! current step so that completions of unrelated tweens are ignored. When the
//! tracked tween is replaced mid-step the page reports it through
//! [`ScanSequence::tween_replaced`] so the sequence never stalls.

use crate::easing::Easing;
use crate::scheduler::{TweenId, TweenTarget};
use scanbox_core::fsm::{EventId, StateMachine, StateTransitions};
use std::f32::consts::TAU;

/// Events accepted by [`ScanStep`]
pub mod scan_events {
    use scanbox_core::fsm::EventId;

    pub const START: EventId = 1;
    pub const STEP_COMPLETE: EventId = 2;
    pub const CANCEL: EventId = 3;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScanStep {
    #[default]
    Idle,
    Spin,
    ShrinkModel,
    ShrinkContainer,
    Burst,
    Done,
}

impl StateTransitions for ScanStep {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use ScanStep::*;
        match (self, event) {
            // Re-entering the section restarts from the spin
            (_, scan_events::START) => Some(Spin),
            (Spin, scan_events::STEP_COMPLETE) => Some(ShrinkModel),
            (ShrinkModel, scan_events::STEP_COMPLETE) => Some(ShrinkContainer),
            (ShrinkContainer, scan_events::STEP_COMPLETE) => Some(Burst),
            (Burst, scan_events::STEP_COMPLETE) => Some(Done),
            (Idle | Done, scan_events::CANCEL) => None,
            (_, scan_events::CANCEL) => Some(Idle),
            _ => None,
        }
    }
}

impl ScanStep {
    /// The property animated during this step, if it is a tween step
    pub fn target(&self) -> Option<TweenTarget> {
        match self {
            ScanStep::Spin => Some(TweenTarget::ModelRotationY),
            ScanStep::ShrinkModel => Some(TweenTarget::ModelScale),
            ScanStep::ShrinkContainer => Some(TweenTarget::ContainerScale),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        !matches!(self, ScanStep::Idle | ScanStep::Done)
    }
}

/// Duration and easing of one tween step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl TweenSpec {
    pub const fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

/// Timings of the three tween steps
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepTimings {
    pub spin: TweenSpec,
    pub shrink_model: TweenSpec,
    pub shrink_container: TweenSpec,
}

impl Default for StepTimings {
    fn default() -> Self {
        Self {
            spin: TweenSpec::new(1000, Easing::EaseInOutCubic),
            shrink_model: TweenSpec::new(500, Easing::EaseInCubic),
            shrink_container: TweenSpec::new(500, Easing::EaseInCubic),
        }
    }
}

/// Parameters of the confetti burst, forwarded to the particle host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstConfig {
    pub particle_count: u32,
    /// Cone angle in degrees
    pub spread_deg: f32,
    /// Emitter origin in viewport fractions (0,0 = top left)
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            particle_count: 800,
            spread_deg: 150.0,
            origin_x: 0.5,
            origin_y: 1.0,
        }
    }
}

/// Work the page must carry out for the current step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequenceAction {
    /// Start a tween from the target's current value to `to`
    Tween {
        target: TweenTarget,
        to: f32,
        spec: TweenSpec,
    },
    /// Fire the particle burst, then call [`ScanSequence::complete_burst`]
    Burst(BurstConfig),
}

/// Transitions kept for diagnostics, enough for a few complete runs
const HISTORY_LIMIT: usize = 16;

/// Linear driver for the scan steps
#[derive(Debug)]
pub struct ScanSequence {
    machine: StateMachine<ScanStep>,
    timings: StepTimings,
    burst: BurstConfig,
    current_tween: Option<TweenId>,
}

impl Default for ScanSequence {
    fn default() -> Self {
        Self::new(StepTimings::default(), BurstConfig::default())
    }
}

impl ScanSequence {
    pub fn new(timings: StepTimings, burst: BurstConfig) -> Self {
        Self {
            machine: StateMachine::new(ScanStep::Idle).with_history_limit(HISTORY_LIMIT),
            timings,
            burst,
            current_tween: None,
        }
    }

    pub fn step(&self) -> ScanStep {
        self.machine.current()
    }

    pub fn is_done(&self) -> bool {
        self.step() == ScanStep::Done
    }

    /// Begin (or restart) with a full turn relative to `rotation_y`
    pub fn start(&mut self, rotation_y: f32) -> SequenceAction {
        self.machine.send(scan_events::START);
        self.current_tween = None;
        SequenceAction::Tween {
            target: TweenTarget::ModelRotationY,
            to: rotation_y + TAU,
            spec: self.timings.spin,
        }
    }

    /// Record the tween carrying the current step
    pub fn track(&mut self, id: TweenId) {
        self.current_tween = Some(id);
    }

    /// A tween finished. Advances only when it is the tracked tween of the
    /// current step and returns the next step's action.
    pub fn tween_finished(&mut self, id: TweenId) -> Option<SequenceAction> {
        if self.current_tween != Some(id) || self.step().target().is_none() {
            return None;
        }
        self.current_tween = None;
        let next = self.machine.send(scan_events::STEP_COMPLETE)?;
        tracing::debug!(step = ?next, "scan sequence advanced");

        let action = match next {
            ScanStep::ShrinkModel => SequenceAction::Tween {
                target: TweenTarget::ModelScale,
                to: 0.0,
                spec: self.timings.shrink_model,
            },
            ScanStep::ShrinkContainer => SequenceAction::Tween {
                target: TweenTarget::ContainerScale,
                to: 0.0,
                spec: self.timings.shrink_container,
            },
            ScanStep::Burst => SequenceAction::Burst(self.burst),
            ScanStep::Idle | ScanStep::Spin | ScanStep::Done => return None,
        };
        Some(action)
    }

    /// The tracked tween was replaced before it finished. An interrupted
    /// container shrink still counts as complete so the burst fires; an
    /// interrupted spin or model shrink abandons the sequence.
    pub fn tween_replaced(&mut self, id: TweenId) -> Option<SequenceAction> {
        if self.current_tween != Some(id) {
            return None;
        }
        if self.step() == ScanStep::ShrinkContainer {
            return self.tween_finished(id);
        }
        tracing::debug!(step = ?self.step(), "scan step interrupted");
        self.cancel();
        None
    }

    /// The burst has been handed to the particle host
    pub fn complete_burst(&mut self) -> bool {
        if self.step() != ScanStep::Burst {
            return false;
        }
        self.machine.send(scan_events::STEP_COMPLETE).is_some()
    }

    /// Abandon a running sequence. Returns false when nothing was running.
    pub fn cancel(&mut self) -> bool {
        self.current_tween = None;
        self.machine.send(scan_events::CANCEL).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::AnimationScheduler;
    use crate::tween::Tween;

    fn schedule(scheduler: &mut AnimationScheduler, seq: &mut ScanSequence, action: SequenceAction) {
        let SequenceAction::Tween { target, to, spec } = action else {
            panic!("expected a tween action, got {action:?}");
        };
        let id = scheduler.add(target, Tween::new(0.0, to, spec.duration_ms, spec.easing));
        seq.track(id);
    }

    fn run_until_finished(
        scheduler: &mut AnimationScheduler,
        seq: &mut ScanSequence,
    ) -> Option<SequenceAction> {
        for _ in 0..200 {
            for update in scheduler.tick(16.0) {
                if update.finished {
                    if let Some(action) = seq.tween_finished(update.id) {
                        return Some(action);
                    }
                }
            }
        }
        None
    }

    #[test]
    fn test_steps_run_in_order() {
        let mut scheduler = AnimationScheduler::new();
        let mut seq = ScanSequence::default();
        assert_eq!(seq.step(), ScanStep::Idle);

        let spin = seq.start(1.0);
        assert_eq!(
            spin,
            SequenceAction::Tween {
                target: TweenTarget::ModelRotationY,
                to: 1.0 + TAU,
                spec: TweenSpec::new(1000, Easing::EaseInOutCubic),
            }
        );
        assert_eq!(seq.step(), ScanStep::Spin);
        schedule(&mut scheduler, &mut seq, spin);

        let shrink_model = run_until_finished(&mut scheduler, &mut seq).unwrap();
        assert_eq!(seq.step(), ScanStep::ShrinkModel);
        assert!(matches!(
            shrink_model,
            SequenceAction::Tween {
                target: TweenTarget::ModelScale,
                to,
                ..
            } if to == 0.0
        ));
        schedule(&mut scheduler, &mut seq, shrink_model);

        let shrink_container = run_until_finished(&mut scheduler, &mut seq).unwrap();
        assert_eq!(seq.step(), ScanStep::ShrinkContainer);
        schedule(&mut scheduler, &mut seq, shrink_container);

        let burst = run_until_finished(&mut scheduler, &mut seq).unwrap();
        assert_eq!(seq.step(), ScanStep::Burst);
        assert_eq!(burst, SequenceAction::Burst(BurstConfig::default()));

        assert!(seq.complete_burst());
        assert!(seq.is_done());
        assert!(!seq.complete_burst());
    }

    #[test]
    fn test_untracked_completion_is_ignored() {
        let mut scheduler = AnimationScheduler::new();
        let mut seq = ScanSequence::default();
        let spin = seq.start(0.0);
        schedule(&mut scheduler, &mut seq, spin);

        let other = scheduler.add(TweenTarget::ContainerScale, Tween::set(1.0));
        assert_eq!(seq.tween_finished(other), None);
        assert_eq!(seq.step(), ScanStep::Spin);
    }

    #[test]
    fn test_replaced_container_shrink_still_bursts() {
        let mut scheduler = AnimationScheduler::new();
        let mut seq = ScanSequence::default();
        let spin = seq.start(0.0);
        schedule(&mut scheduler, &mut seq, spin);
        let shrink_model = run_until_finished(&mut scheduler, &mut seq).unwrap();
        schedule(&mut scheduler, &mut seq, shrink_model);
        let shrink_container = run_until_finished(&mut scheduler, &mut seq).unwrap();
        schedule(&mut scheduler, &mut seq, shrink_container);
        assert_eq!(seq.step(), ScanStep::ShrinkContainer);

        let (_, replaced) = scheduler.replace(TweenTarget::ContainerScale, Tween::set(1.0));
        let action = seq.tween_replaced(replaced.unwrap());
        assert_eq!(action, Some(SequenceAction::Burst(BurstConfig::default())));
        assert!(seq.complete_burst());
        assert!(seq.is_done());
    }

    #[test]
    fn test_replaced_spin_cancels() {
        let mut scheduler = AnimationScheduler::new();
        let mut seq = ScanSequence::default();
        let spin = seq.start(0.0);
        schedule(&mut scheduler, &mut seq, spin);

        let untracked = scheduler.add(TweenTarget::ContainerScale, Tween::set(1.0));
        assert_eq!(seq.tween_replaced(untracked), None);
        assert_eq!(seq.step(), ScanStep::Spin);

        let (_, replaced) = scheduler.replace(TweenTarget::ModelRotationY, Tween::set(0.0));
        assert_eq!(seq.tween_replaced(replaced.unwrap()), None);
        assert_eq!(seq.step(), ScanStep::Idle);
        assert!(!seq.step().is_running());
    }

    #[test]
    fn test_each_step_waits_for_previous() {
        let mut scheduler = AnimationScheduler::new();
        let mut seq = ScanSequence::default();
        let spin = seq.start(0.0);
        schedule(&mut scheduler, &mut seq, spin);

        // Half way through the spin nothing has advanced
        for _ in 0..30 {
            for update in scheduler.tick(16.0) {
                assert!(!update.finished);
            }
        }
        assert_eq!(seq.step(), ScanStep::Spin);
    }

    #[test]
    fn test_cancel_and_restart() {
        let mut seq = ScanSequence::default();
        assert!(!seq.cancel());

        seq.start(0.0);
        assert!(seq.cancel());
        assert_eq!(seq.step(), ScanStep::Idle);

        seq.start(0.5);
        assert_eq!(seq.step(), ScanStep::Spin);
        seq.start(0.5);
        assert_eq!(seq.step(), ScanStep::Spin);
    }

    #[test]
    fn test_step_targets() {
        assert_eq!(ScanStep::Spin.target(), Some(TweenTarget::ModelRotationY));
        assert_eq!(ScanStep::Burst.target(), None);
        assert!(ScanStep::ShrinkContainer.is_running());
        assert!(!ScanStep::Done.is_running());
    }
}
