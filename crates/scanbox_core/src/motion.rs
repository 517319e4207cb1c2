//! Motion State shared by the scroll source, the section triggers and the
//! per-frame blender.
//!
//! Field ownership is single-writer: the scroll source writes the scroll
//! offset, section triggers flip the floating flag, and the blender only
//! reads. Everything lives on one thread, so the state is passed by `&mut`
//! rather than shared behind locks.

use crate::error::{CoreError, Result};
use crate::fsm::{EventId, StateMachine, StateTransitions};

/// Events accepted by [`FloatState`]
pub mod float_events {
    use crate::fsm::EventId;

    /// Scroll reached the pinned section
    pub const PIN: EventId = 1;
    /// Scroll returned to the top of the page
    pub const RELEASE: EventId = 2;
}

/// Whether the idle float animation drives the model's vertical position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FloatState {
    #[default]
    Floating,
    Pinned,
}

impl StateTransitions for FloatState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        match (self, event) {
            (FloatState::Floating, float_events::PIN) => Some(FloatState::Pinned),
            (FloatState::Pinned, float_events::RELEASE) => Some(FloatState::Floating),
            _ => None,
        }
    }
}

/// Per-page motion inputs
#[derive(Debug)]
pub struct MotionState {
    float: StateMachine<FloatState>,
    scroll_offset: f32,
    trigger_distance: f32,
}

impl MotionState {
    /// Create motion state for a page whose trigger section starts
    /// `trigger_distance` pixels below the top.
    pub fn new(trigger_distance: f32) -> Result<Self> {
        if !trigger_distance.is_finite() || trigger_distance <= 0.0 {
            return Err(CoreError::InvalidTriggerDistance(trigger_distance));
        }
        Ok(Self {
            float: StateMachine::new(FloatState::Floating),
            scroll_offset: 0.0,
            trigger_distance,
        })
    }

    pub fn trigger_distance(&self) -> f32 {
        self.trigger_distance
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Record the latest absolute scroll distance. Negative and non-finite
    /// values clamp to 0.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
    }

    /// Scroll progress toward the trigger section, always in `[0, 1]`
    pub fn scroll_progress(&self) -> f32 {
        (self.scroll_offset / self.trigger_distance).clamp(0.0, 1.0)
    }

    pub fn float_state(&self) -> FloatState {
        self.float.current()
    }

    pub fn is_floating(&self) -> bool {
        self.float.is_in(FloatState::Floating)
    }

    /// Stop the idle float. Returns false when already pinned.
    pub fn pin(&mut self) -> bool {
        self.float.send(float_events::PIN).is_some()
    }

    /// Resume the idle float. Returns false when already floating.
    pub fn release(&mut self) -> bool {
        self.float.send(float_events::RELEASE).is_some()
    }

    /// Floating/pinned transitions seen so far
    pub fn float_history(&self) -> &[(FloatState, EventId, FloatState)] {
        self.float.history()
    }
}
