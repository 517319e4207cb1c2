//! scanbox core
//!
//! Foundational primitives for the scroll-driven gift-box scan effect:
//!
//! - **Motion State**: scroll offset, derived scroll progress and the
//!   floating/pinned flag read by the per-frame blender
//! - **State Machines**: typed transitions with history for page modes
//! - **Event Dispatch**: scroll, resize, section and asset events
//! - **Scene Math**: vectors, transforms, bounds and the perspective camera
//!
//! # Example
//!
//! ```rust
//! use scanbox_core::MotionState;
//!
//! let mut state = MotionState::new(800.0).unwrap();
//! state.set_scroll_offset(400.0);
//! assert_eq!(state.scroll_progress(), 0.5);
//!
//! state.set_scroll_offset(2000.0);
//! assert_eq!(state.scroll_progress(), 1.0);
//! ```

pub mod clock;
pub mod error;
pub mod events;
pub mod fsm;
pub mod motion;
pub mod scene;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result};
pub use events::{Event, EventData, EventDispatcher, EventType};
pub use fsm::{EventId, StateMachine, StateTransitions};
pub use motion::{float_events, FloatState, MotionState};
pub use scene::{Aabb, Camera, Light, LightKind, Transform3D, Vec3};
