//! Page configuration file handling (scanbox.toml)

use crate::error::{Result, ScanError};
use scanbox_animation::{BurstConfig, Easing, MotionBlender, StepTimings, TweenSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level page configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub asset: AssetConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub burst: BurstSection,
}

/// Page geometry in CSS pixels
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Document offset of the scanner section. Absent when the page has no
    /// scanner section, which is fatal at setup.
    #[serde(default)]
    pub scanner_offset: Option<f32>,
    /// Height of the re-entry zone at the top of the page
    #[serde(default = "default_top_zone")]
    pub top_zone: f32,
    /// Total document height; bounds the scroll position when set
    #[serde(default)]
    pub page_height: Option<f32>,
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

fn default_top_zone() -> f32 {
    10.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            scanner_offset: None,
            top_zone: default_top_zone(),
            page_height: None,
        }
    }
}

impl LayoutConfig {
    /// Largest reachable scroll offset
    pub fn scroll_limit(&self) -> f32 {
        match self.page_height {
            Some(height) => (height - self.viewport_height as f32).max(0.0),
            None => f32::INFINITY,
        }
    }
}

/// Scene background
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackgroundConfig {
    Color { color: String },
    Image { path: PathBuf },
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig::Color {
            color: "#fefdfd".to_string(),
        }
    }
}

/// Camera, lighting and renderer settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default = "default_fov")]
    pub fov_deg: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_distance_multiplier")]
    pub distance_multiplier: f32,
    /// Used instead of `distance_multiplier` at or below `mobile_breakpoint`
    #[serde(default = "default_mobile_distance_multiplier")]
    pub mobile_distance_multiplier: f32,
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u32,
    /// Tone mapping exposure
    #[serde(default = "default_exposure")]
    pub exposure: f32,
    #[serde(default = "default_true")]
    pub shadows: bool,
    /// Replace the studio rig with no lights (for hosts with baked lighting)
    #[serde(default)]
    pub disable_lights: bool,
}

fn default_fov() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_distance_multiplier() -> f32 {
    2.0
}

fn default_mobile_distance_multiplier() -> f32 {
    2.5
}

fn default_mobile_breakpoint() -> u32 {
    600
}

fn default_exposure() -> f32 {
    2.5
}

fn default_true() -> bool {
    true
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: BackgroundConfig::default(),
            fov_deg: default_fov(),
            near: default_near(),
            far: default_far(),
            distance_multiplier: default_distance_multiplier(),
            mobile_distance_multiplier: default_mobile_distance_multiplier(),
            mobile_breakpoint: default_mobile_breakpoint(),
            exposure: default_exposure(),
            shadows: true,
            disable_lights: false,
        }
    }
}

impl SceneConfig {
    /// Camera distance multiplier for a viewport width
    pub fn distance_multiplier_for(&self, viewport_width: u32) -> f32 {
        if viewport_width > self.mobile_breakpoint {
            self.distance_multiplier
        } else {
            self.mobile_distance_multiplier
        }
    }
}

/// Model asset and material overrides
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
    #[serde(default = "default_model")]
    pub model: PathBuf,
    #[serde(default = "default_metalness")]
    pub metalness: f32,
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default = "default_env_map_intensity")]
    pub env_map_intensity: f32,
}

fn default_model() -> PathBuf {
    PathBuf::from("assets/gift_box.glb")
}

fn default_metalness() -> f32 {
    0.3
}

fn default_roughness() -> f32 {
    0.4
}

fn default_env_map_intensity() -> f32 {
    1.5
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            metalness: default_metalness(),
            roughness: default_roughness(),
            env_map_intensity: default_env_map_intensity(),
        }
    }
}

/// Idle float and scroll spin
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default = "default_float_amplitude")]
    pub float_amplitude: f32,
    #[serde(default = "default_float_speed")]
    pub float_speed: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
}

fn default_float_amplitude() -> f32 {
    0.2
}

fn default_float_speed() -> f32 {
    1.5
}

fn default_rotation_speed() -> f32 {
    0.3
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            float_amplitude: default_float_amplitude(),
            float_speed: default_float_speed(),
            rotation_speed: default_rotation_speed(),
        }
    }
}

impl MotionConfig {
    pub fn blender(&self) -> MotionBlender {
        MotionBlender {
            float_amplitude: self.float_amplitude,
            float_speed: self.float_speed,
            rotation_speed: self.rotation_speed,
        }
    }
}

/// Smooth scrolling
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrollConfig {
    /// Per-frame interpolation factor at 60 fps; 1 disables smoothing
    #[serde(default = "default_lerp")]
    pub lerp: f32,
}

fn default_lerp() -> f32 {
    0.1
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lerp: default_lerp(),
        }
    }
}

/// A single tween's duration and ease name
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TweenConfig {
    pub duration_ms: u32,
    pub ease: String,
}

impl TweenConfig {
    fn new(duration_ms: u32, ease: &str) -> Self {
        Self {
            duration_ms,
            ease: ease.to_string(),
        }
    }

    pub fn spec(&self) -> Result<TweenSpec> {
        let easing =
            Easing::from_name(&self.ease).ok_or_else(|| ScanError::UnknownEase(self.ease.clone()))?;
        Ok(TweenSpec::new(self.duration_ms, easing))
    }
}

/// Intro and scan sequence tweens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SequenceConfig {
    #[serde(default = "default_intro")]
    pub intro: TweenConfig,
    #[serde(default = "default_spin")]
    pub spin: TweenConfig,
    #[serde(default = "default_shrink")]
    pub shrink_model: TweenConfig,
    #[serde(default = "default_shrink")]
    pub shrink_container: TweenConfig,
}

fn default_intro() -> TweenConfig {
    TweenConfig::new(1000, "power2.out")
}

fn default_spin() -> TweenConfig {
    TweenConfig::new(1000, "power2.inOut")
}

fn default_shrink() -> TweenConfig {
    TweenConfig::new(500, "power2.in")
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            intro: default_intro(),
            spin: default_spin(),
            shrink_model: default_shrink(),
            shrink_container: default_shrink(),
        }
    }
}

impl SequenceConfig {
    pub fn intro_spec(&self) -> Result<TweenSpec> {
        self.intro.spec()
    }

    pub fn step_timings(&self) -> Result<StepTimings> {
        Ok(StepTimings {
            spin: self.spin.spec()?,
            shrink_model: self.shrink_model.spec()?,
            shrink_container: self.shrink_container.spec()?,
        })
    }
}

/// Confetti burst parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BurstSection {
    #[serde(default = "default_particle_count")]
    pub particle_count: u32,
    #[serde(default = "default_spread")]
    pub spread: f32,
    #[serde(default = "default_origin_x")]
    pub origin_x: f32,
    #[serde(default = "default_origin_y")]
    pub origin_y: f32,
}

fn default_particle_count() -> u32 {
    800
}

fn default_spread() -> f32 {
    150.0
}

fn default_origin_x() -> f32 {
    0.5
}

fn default_origin_y() -> f32 {
    1.0
}

impl Default for BurstSection {
    fn default() -> Self {
        Self {
            particle_count: default_particle_count(),
            spread: default_spread(),
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
        }
    }
}

impl BurstSection {
    pub fn burst(&self) -> BurstConfig {
        BurstConfig {
            particle_count: self.particle_count,
            spread_deg: self.spread,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
        }
    }
}

impl PageConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded page config");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: PageConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything setup would otherwise trip over later. A missing
    /// scanner offset is left to setup so configs can be checked in
    /// isolation.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.viewport_width == 0 || layout.viewport_height == 0 {
            return Err(ScanError::InvalidLayout(
                "viewport dimensions must be non-zero".to_string(),
            ));
        }
        if !layout.top_zone.is_finite() || layout.top_zone < 0.0 {
            return Err(ScanError::InvalidLayout(format!(
                "top_zone must be a non-negative number, got {}",
                layout.top_zone
            )));
        }
        if let Some(offset) = layout.scanner_offset {
            if !offset.is_finite() || offset <= 0.0 {
                return Err(ScanError::InvalidLayout(format!(
                    "scanner_offset must be positive, got {offset}"
                )));
            }
        }
        if let Some(height) = layout.page_height {
            if !height.is_finite() || height < layout.viewport_height as f32 {
                return Err(ScanError::InvalidLayout(format!(
                    "page_height {height} is shorter than the viewport"
                )));
            }
        }
        if !(self.scroll.lerp > 0.0 && self.scroll.lerp <= 1.0) {
            return Err(ScanError::InvalidLayout(format!(
                "scroll lerp must be in (0, 1], got {}",
                self.scroll.lerp
            )));
        }

        if let BackgroundConfig::Color { color } = &self.scene.background {
            parse_hex_color(color)?;
        }
        self.sequence.intro_spec()?;
        self.sequence.step_timings()?;
        Ok(())
    }
}

/// Parse `#rrggbb` (leading `#` optional) into `0xRRGGBB`
pub fn parse_hex_color(input: &str) -> Result<u32> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ScanError::InvalidColor(input.to_string()));
    }
    u32::from_str_radix(hex, 16).map_err(|_| ScanError::InvalidColor(input.to_string()))
}
