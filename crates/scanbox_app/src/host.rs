//! Scene host contract
//!
//! The page computes transforms, camera and effects; a host turns them into
//! pixels. Hosts receive their settings once, every viewport change, one
//! snapshot per rendered frame, and particle bursts.

use crate::config::{parse_hex_color, AssetConfig, BackgroundConfig, PageConfig};
use crate::error::Result;
use scanbox_animation::BurstConfig;
use scanbox_core::{Camera, Light, Transform3D};
use std::path::PathBuf;

/// Viewport size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Resolved scene background
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// Packed 0xRRGGBB
    Color(u32),
    /// Image drawn to cover the viewport
    Image(PathBuf),
}

/// Material overrides applied to every mesh of the loaded model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialOverrides {
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
}

impl From<&AssetConfig> for MaterialOverrides {
    fn from(asset: &AssetConfig) -> Self {
        Self {
            metalness: asset.metalness,
            roughness: asset.roughness,
            env_map_intensity: asset.env_map_intensity,
        }
    }
}

/// Everything a host needs before the first frame
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub background: Background,
    pub exposure: f32,
    pub shadows: bool,
    pub lights: Vec<Light>,
    pub model: PathBuf,
    pub material: MaterialOverrides,
}

impl SceneSettings {
    pub fn from_config(config: &PageConfig) -> Result<Self> {
        let background = match &config.scene.background {
            BackgroundConfig::Color { color } => Background::Color(parse_hex_color(color)?),
            BackgroundConfig::Image { path } => Background::Image(path.clone()),
        };
        let lights = if config.scene.disable_lights {
            Vec::new()
        } else {
            Light::studio_rig()
        };
        Ok(Self {
            background,
            exposure: config.scene.exposure,
            shadows: config.scene.shadows,
            lights,
            model: config.asset.model.clone(),
            material: MaterialOverrides::from(&config.asset),
        })
    }
}

/// State of one rendered frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub camera: Camera,
    /// Model transform, absent until the asset has loaded
    pub model: Option<Transform3D>,
    /// Scale of the scan container overlay
    pub container_scale: f32,
    /// The scanner section is pinned
    pub pinned: bool,
}

/// Receives the page's output
pub trait SceneHost {
    fn configure(&mut self, settings: &SceneSettings);
    fn resize(&mut self, viewport: Viewport);
    fn render(&mut self, frame: &FrameSnapshot);
    fn burst(&mut self, burst: &BurstConfig);
}

/// A host that keeps what it was given, for tests and headless runs
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub settings: Option<SceneSettings>,
    pub resizes: Vec<Viewport>,
    pub last_frame: Option<FrameSnapshot>,
    pub frames_rendered: u64,
    pub bursts: Vec<BurstConfig>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneHost for RecordingHost {
    fn configure(&mut self, settings: &SceneSettings) {
        self.settings = Some(settings.clone());
    }

    fn resize(&mut self, viewport: Viewport) {
        self.resizes.push(viewport);
    }

    fn render(&mut self, frame: &FrameSnapshot) {
        self.last_frame = Some(*frame);
        self.frames_rendered += 1;
    }

    fn burst(&mut self, burst: &BurstConfig) {
        self.bursts.push(*burst);
    }
}

impl<H: SceneHost + ?Sized> SceneHost for &mut H {
    fn configure(&mut self, settings: &SceneSettings) {
        (**self).configure(settings);
    }

    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport);
    }

    fn render(&mut self, frame: &FrameSnapshot) {
        (**self).render(frame);
    }

    fn burst(&mut self, burst: &BurstConfig) {
        (**self).burst(burst);
    }
}
