//! Per-frame motion blending
//!
//! Combines three motion sources into the model transform:
//!
//! - **Idle float**: `y = sin(t * speed) * amplitude` while floating, with `t`
//!   in wall-clock seconds since the Unix epoch
//! - **Scroll tilt**: `rotation.x = progress * 2π`, overwritten every frame
//! - **Spin**: `rotation.y += 0.001 * rotation_speed` per frame
//!
//! Tilt and spin only apply while scroll progress is below 1. At 1 the
//! rotation belongs to the scan sequence and the blender leaves it alone.

use scanbox_core::{MotionState, Transform3D};
use std::f32::consts::TAU;

/// Per-frame Y rotation before scaling by `rotation_speed`
pub const SPIN_STEP: f32 = 0.001;

/// Motion parameters for the per-frame update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionBlender {
    /// Peak vertical float offset in world units
    pub float_amplitude: f32,
    /// Float angular speed in radians per second
    pub float_speed: f32,
    pub rotation_speed: f32,
}

impl Default for MotionBlender {
    fn default() -> Self {
        Self {
            float_amplitude: 0.2,
            float_speed: 1.5,
            rotation_speed: 0.3,
        }
    }
}

/// What a single update wrote
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlendOutcome {
    pub scroll_progress: f32,
    /// `position.y` was written by the idle float
    pub floated: bool,
    /// `rotation.x` and `rotation.y` were written
    pub rotated: bool,
}

impl MotionBlender {
    /// Idle float offset at `now_secs`. Evaluated in f64 since epoch seconds
    /// lose all sub-second precision in f32.
    pub fn float_offset(&self, now_secs: f64) -> f32 {
        ((now_secs * self.float_speed as f64).sin() * self.float_amplitude as f64) as f32
    }

    /// Y rotation added per frame while below the trigger
    pub fn spin_step(&self) -> f32 {
        SPIN_STEP * self.rotation_speed
    }

    /// Apply one frame of motion. Without a loaded model nothing is written.
    pub fn update(
        &self,
        state: &MotionState,
        transform: Option<&mut Transform3D>,
        now_secs: f64,
    ) -> BlendOutcome {
        let scroll_progress = state.scroll_progress();
        let mut outcome = BlendOutcome {
            scroll_progress,
            ..Default::default()
        };
        let Some(transform) = transform else {
            return outcome;
        };

        if state.is_floating() {
            transform.position.y = self.float_offset(now_secs);
            outcome.floated = true;
        }

        if scroll_progress < 1.0 {
            transform.rotation.x = scroll_progress * TAU;
            transform.rotation.y += self.spin_step();
            outcome.rotated = true;
        }

        tracing::trace!(
            progress = scroll_progress,
            y = transform.position.y,
            rx = transform.rotation.x,
            ry = transform.rotation.y,
            "blend"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TRIGGER: f32 = 1200.0;

    fn state() -> MotionState {
        MotionState::new(TRIGGER).unwrap()
    }

    #[test]
    fn test_float_follows_sine_and_stays_bounded() {
        let blender = MotionBlender::default();
        let state = state();
        let mut transform = Transform3D::default();

        let start = 1_700_000_000.0_f64;
        for frame in 0..600 {
            let t = start + frame as f64 / 60.0;
            blender.update(&state, Some(&mut transform), t);
            let expected = ((t * 1.5).sin() * 0.2) as f32;
            assert!((transform.position.y - expected).abs() < 1e-5);
            assert!(transform.position.y.abs() <= 0.2 + 1e-6);
        }
    }

    #[test]
    fn test_float_period() {
        let blender = MotionBlender::default();
        let period = 2.0 * PI / 1.5;
        for t in [0.0, 0.3, 1.7, 12.25] {
            let a = blender.float_offset(t);
            let b = blender.float_offset(t + period);
            assert!((a - b).abs() < 1e-6, "t = {t}");
        }
        assert!((blender.float_offset(PI / 3.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_pinned_holds_position() {
        let blender = MotionBlender::default();
        let mut state = state();
        let mut transform = Transform3D::default();

        state.pin();
        transform.position.y = 0.0;
        for frame in 0..120 {
            let outcome =
                blender.update(&state, Some(&mut transform), 1_000.0 + frame as f64 * 0.37);
            assert!(!outcome.floated);
            assert_eq!(transform.position.y, 0.0);
        }

        state.release();
        blender.update(&state, Some(&mut transform), 1_000.5);
        assert_eq!(transform.position.y, blender.float_offset(1_000.5));
    }

    #[test]
    fn test_tilt_maps_progress_directly() {
        let blender = MotionBlender::default();
        let mut state = state();
        let mut transform = Transform3D::default();

        blender.update(&state, Some(&mut transform), 0.0);
        assert_eq!(transform.rotation.x, 0.0);

        state.set_scroll_offset(TRIGGER / 4.0);
        let outcome = blender.update(&state, Some(&mut transform), 0.0);
        assert_eq!(outcome.scroll_progress, 0.25);
        assert!((transform.rotation.x - TAU / 4.0).abs() < 1e-6);

        // Overwrite, not accumulate
        blender.update(&state, Some(&mut transform), 0.0);
        assert!((transform.rotation.x - TAU / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_freezes_at_trigger() {
        let blender = MotionBlender::default();
        let mut state = state();
        let mut transform = Transform3D::default();

        state.set_scroll_offset(TRIGGER * 0.999);
        blender.update(&state, Some(&mut transform), 0.0);
        let tilt = transform.rotation.x;
        let spin = transform.rotation.y;
        assert!((tilt - 0.999 * TAU).abs() < 1e-4);

        state.set_scroll_offset(TRIGGER);
        for _ in 0..10 {
            let outcome = blender.update(&state, Some(&mut transform), 0.0);
            assert_eq!(outcome.scroll_progress, 1.0);
            assert!(!outcome.rotated);
        }
        assert_eq!(transform.rotation.x, tilt);
        assert_eq!(transform.rotation.y, spin);
    }

    #[test]
    fn test_spin_increments_per_frame() {
        let blender = MotionBlender::default();
        let mut state = state();
        let mut transform = Transform3D::default();

        let mut previous = transform.rotation.y;
        for frame in 0..100 {
            state.set_scroll_offset(frame as f32 * 7.0);
            blender.update(&state, Some(&mut transform), 0.0);
            let delta = transform.rotation.y - previous;
            assert!((delta - 0.0003).abs() < 1e-6);
            previous = transform.rotation.y;
        }
        assert!((transform.rotation.y - 0.03).abs() < 1e-4);
    }

    #[test]
    fn test_missing_model_is_a_no_op() {
        let blender = MotionBlender::default();
        let mut state = state();
        state.set_scroll_offset(600.0);

        let outcome = blender.update(&state, None, 5.0);
        assert_eq!(outcome.scroll_progress, 0.5);
        assert!(!outcome.floated);
        assert!(!outcome.rotated);
    }
}
