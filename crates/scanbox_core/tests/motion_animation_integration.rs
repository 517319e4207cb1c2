//! Integration tests for motion state + state machines + animation
//!
//! These tests verify that:
//! - Scroll offset drives the blender's tilt and spin until the trigger
//! - Pin/release transitions gate the idle float
//! - The scan sequence takes over rotation once progress reaches 1

use scanbox_animation::{AnimationScheduler, MotionBlender, ScanSequence, SequenceAction, Tween};
use scanbox_core::{FloatState, MotionState, Transform3D};
use std::f32::consts::TAU;

const TRIGGER: f32 = 900.0;

/// Scrolling down to the trigger then pinning hands rotation to the sequence
#[test]
fn test_scroll_then_pin_hands_rotation_to_sequence() {
    let blender = MotionBlender::default();
    let mut state = MotionState::new(TRIGGER).unwrap();
    let mut transform = Transform3D::default();
    let mut scheduler = AnimationScheduler::new();
    let mut sequence = ScanSequence::default();

    // Scroll down in 30 px steps, one frame each
    let mut offset = 0.0;
    let mut now = 100.0;
    while offset < TRIGGER {
        state.set_scroll_offset(offset);
        blender.update(&state, Some(&mut transform), now);
        offset += 30.0;
        now += 1.0 / 60.0;
    }
    let frames_below = (TRIGGER / 30.0).ceil() as usize;
    assert!((transform.rotation.y - frames_below as f32 * 0.0003).abs() < 1e-5);

    // Reaching the section pins and starts the spin from the current angle
    state.set_scroll_offset(TRIGGER);
    assert!(state.pin());
    transform.position.y = 0.0;
    let SequenceAction::Tween { target, to, spec } = sequence.start(transform.rotation.y) else {
        panic!("spin must be a tween");
    };
    let id = scheduler.add(
        target,
        Tween::new(transform.rotation.y, to, spec.duration_ms, spec.easing),
    );
    sequence.track(id);

    let start_angle = transform.rotation.y;
    for _ in 0..70 {
        for update in scheduler.tick(16.0) {
            transform.rotation.y = update.value;
            if update.finished {
                sequence.tween_finished(update.id);
            }
        }
        let outcome = blender.update(&state, Some(&mut transform), now);
        assert!(!outcome.rotated);
        assert!(!outcome.floated);
        now += 0.016;
    }

    assert!((transform.rotation.y - (start_angle + TAU)).abs() < 1e-4);
    assert_eq!(transform.position.y, 0.0);
    assert_eq!(state.float_state(), FloatState::Pinned);
}

/// Releasing at the top resumes the float on the wall-clock phase
#[test]
fn test_release_resumes_float_phase() {
    let blender = MotionBlender::default();
    let mut state = MotionState::new(TRIGGER).unwrap();
    let mut transform = Transform3D::default();

    state.pin();
    blender.update(&state, Some(&mut transform), 50.0);
    assert_eq!(transform.position.y, 0.0);

    state.release();
    blender.update(&state, Some(&mut transform), 50.0);
    assert_eq!(transform.position.y, blender.float_offset(50.0));
}
