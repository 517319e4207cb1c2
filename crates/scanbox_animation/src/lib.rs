//! scanbox animation
//!
//! Easing curves, one-shot tweens, the scan sequence and the per-frame
//! motion blender.
//!
//! # Features
//!
//! - **Easing**: polynomial in/out curves, addressable by `powerN.in/out/inOut` names
//! - **Tweens**: timed single-value transitions ticked by a scheduler
//! - **Scan sequence**: spin, shrink model, shrink container, burst; each step
//!   starts when the previous one reports completion
//! - **Motion blender**: idle float, scroll-driven tilt and continuous spin

pub mod blender;
pub mod easing;
pub mod scheduler;
pub mod sequence;
pub mod tween;

pub use blender::{BlendOutcome, MotionBlender};
pub use easing::Easing;
pub use scheduler::{AnimationScheduler, TweenId, TweenTarget, TweenUpdate};
pub use sequence::{BurstConfig, ScanSequence, ScanStep, SequenceAction, StepTimings, TweenSpec};
pub use tween::Tween;
