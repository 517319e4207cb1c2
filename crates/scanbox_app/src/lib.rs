//! scanbox page runtime
//!
//! Drives the scroll-linked gift-box scan: a smooth scroll source feeds the
//! motion state and two section triggers, trigger crossings start tweens and
//! the scan sequence, and every frame the motion blender writes the model
//! transform before a [`SceneHost`] renders it.
//!
//! # Example
//!
//! ```ignore
//! use scanbox_app::prelude::*;
//!
//! let config = PageConfig::load(Path::new("scanbox.toml"))?;
//! let mut page = ScanPage::setup(&config, RecordingHost::new(), SystemClock)?;
//! page.asset_loaded(Aabb::from_size(Vec3::new(1.0, 1.2, 1.0)));
//! page.scroll_to(900.0);
//! page.frame(16.0);
//! ```

pub mod config;
pub mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod host;
pub mod page;
pub mod scroll;
pub mod trigger;

pub use config::PageConfig;
pub use error::{Result, ScanError};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use host::{
    Background, FrameSnapshot, MaterialOverrides, RecordingHost, SceneHost, SceneSettings,
    Viewport,
};
pub use page::{AssetState, RenderLoop, ScanPage};
pub use scroll::{ScrollDirection, ScrollEvent, SmoothScroll};
pub use trigger::{ScrollTrigger, TriggerEvent};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::PageConfig;
    pub use crate::error::{Result, ScanError};
    pub use crate::host::{FrameSnapshot, RecordingHost, SceneHost, SceneSettings, Viewport};
    pub use crate::page::{AssetState, RenderLoop, ScanPage};

    pub use scanbox_animation::{BurstConfig, ScanStep};
    pub use scanbox_core::{Aabb, Clock, ManualClock, SystemClock, Transform3D, Vec3};
    pub use std::path::Path;
}
