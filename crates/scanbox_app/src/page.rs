//! The scan page
//!
//! Wires the scroll source, section triggers, tween scheduler, scan sequence
//! and motion blender together and hands one snapshot per frame to the
//! scene host.
//!
//! # Frame order
//!
//! 1. Smooth scroll tick. A moved offset updates the motion state, then the
//!    top-zone and scanner triggers, and their crossings are reacted to.
//! 2. Tween scheduler tick. Values are written to their targets; a finished
//!    sequence tween starts the next step. A sequence tween replaced by a
//!    trigger reaction either completes its step or cancels the sequence.
//! 3. Motion blender (full render loop with a loaded model only).
//! 4. Render.

use crate::config::{LayoutConfig, PageConfig, SceneConfig};
use crate::error::{Result, ScanError};
use crate::host::{FrameSnapshot, SceneHost, SceneSettings, Viewport};
use crate::scroll::{ScrollEvent, SmoothScroll};
use crate::trigger::{ScrollTrigger, TriggerEvent};
use scanbox_animation::{
    AnimationScheduler, BlendOutcome, MotionBlender, ScanSequence, ScanStep, SequenceAction,
    Tween, TweenId, TweenSpec, TweenTarget,
};
use scanbox_core::events::event_types;
use scanbox_core::{
    Aabb, Camera, Clock, Event, EventData, EventDispatcher, EventType, MotionState, SystemClock,
    Transform3D, Vec3,
};

/// Name of the re-entry zone at the top of the page
pub const TOP_ZONE: &str = "top";
/// Name of the pinned scanner section
pub const SCANNER: &str = "scanner";

/// Model loading progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetState {
    Loading,
    Loaded,
    Failed,
}

/// Which per-frame loop is running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderLoop {
    /// Renders the empty scene until the model arrives
    Bootstrap,
    /// Blends motion into the model every frame
    Full,
}

#[derive(Clone, Copy, Debug)]
struct SceneObject {
    transform: Transform3D,
    bounds: Aabb,
}

/// The page runtime
pub struct ScanPage<H: SceneHost, C: Clock = SystemClock> {
    host: H,
    clock: C,
    motion: MotionState,
    blender: MotionBlender,
    scroll: SmoothScroll,
    top_zone: ScrollTrigger,
    scanner: ScrollTrigger,
    scheduler: AnimationScheduler,
    sequence: ScanSequence,
    intro: TweenSpec,
    layout: LayoutConfig,
    scene: SceneConfig,
    camera: Camera,
    viewport: Viewport,
    model: Option<SceneObject>,
    asset: AssetState,
    container_scale: f32,
    render_loop: RenderLoop,
    frame_index: u64,
    elapsed_ms: f64,
    dispatcher: EventDispatcher,
}

impl<H: SceneHost, C: Clock> ScanPage<H, C> {
    /// Build the page from a config. Fails when the scanner section is
    /// missing or the config does not validate.
    pub fn setup(config: &PageConfig, mut host: H, clock: C) -> Result<Self> {
        config.validate()?;
        let layout = config.layout.clone();
        let offset = layout
            .scanner_offset
            .ok_or_else(|| ScanError::MissingSection(SCANNER.to_string()))?;
        let motion = MotionState::new(offset)?;

        let viewport = Viewport::new(layout.viewport_width, layout.viewport_height);
        let mut camera =
            Camera::perspective(config.scene.fov_deg, config.scene.near, config.scene.far);
        camera.set_viewport(viewport.width, viewport.height);

        let settings = SceneSettings::from_config(config)?;
        host.configure(&settings);
        host.resize(viewport);

        // The pin lasts one viewport height, measured once here
        let top_zone = ScrollTrigger::new(TOP_ZONE, 0.0, layout.top_zone, 0.0);
        let scanner =
            ScrollTrigger::new(SCANNER, offset, offset + viewport.height as f32, 0.0).with_pin(true);
        let scroll = SmoothScroll::new(config.scroll.lerp).with_limit(layout.scroll_limit());

        tracing::info!(
            trigger_distance = offset,
            width = viewport.width,
            height = viewport.height,
            "scan page ready"
        );

        Ok(Self {
            host,
            clock,
            motion,
            blender: config.motion.blender(),
            scroll,
            top_zone,
            scanner,
            scheduler: AnimationScheduler::new(),
            sequence: ScanSequence::new(config.sequence.step_timings()?, config.burst.burst()),
            intro: config.sequence.intro_spec()?,
            layout,
            scene: config.scene.clone(),
            camera,
            viewport,
            model: None,
            asset: AssetState::Loading,
            container_scale: 0.0,
            render_loop: RenderLoop::Bootstrap,
            frame_index: 0,
            elapsed_ms: 0.0,
            dispatcher: EventDispatcher::new(),
        })
    }

    /// Listen for page events (scroll, resize, section crossings, asset
    /// lifecycle)
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.dispatcher.subscribe(event_type, handler);
    }

    // =========================================================================
    // Asset lifecycle
    // =========================================================================

    pub fn asset_progress(&mut self, loaded: u64, total: u64) {
        if total > 0 {
            let percent = loaded as f64 / total as f64 * 100.0;
            tracing::info!("{percent:.0}% loaded");
        } else {
            tracing::debug!(loaded, "loading, total size unknown");
        }
        self.publish(
            event_types::ASSET_PROGRESS,
            EventData::AssetProgress { loaded, total },
        );
    }

    /// The model finished loading with the given bounds
    pub fn asset_loaded(&mut self, bounds: Aabb) {
        if self.asset != AssetState::Loading {
            tracing::warn!(state = ?self.asset, "asset already settled, ignoring load");
            return;
        }

        let mut transform = Transform3D {
            position: Vec3::ZERO.sub(bounds.center()),
            ..Default::default()
        };
        transform.set_uniform_scale(0.0);
        self.model = Some(SceneObject { transform, bounds });
        self.asset = AssetState::Loaded;

        let max_dim = bounds.max_dim();
        let distance = max_dim * self.scene.distance_multiplier_for(self.viewport.width);
        self.camera.set_distance(distance);
        tracing::info!(max_dim, distance, "model loaded");

        self.start_tween(TweenTarget::ModelScale, 1.0, self.intro);
        self.start_tween(TweenTarget::ContainerScale, 1.0, self.intro);

        if self.render_loop == RenderLoop::Bootstrap {
            self.render_loop = RenderLoop::Full;
            tracing::debug!("bootstrap render loop cancelled");
        }
        self.publish(event_types::ASSET_LOADED, EventData::None);
    }

    /// The model could not be loaded. The page keeps rendering without it.
    pub fn asset_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.asset != AssetState::Loading {
            tracing::warn!(state = ?self.asset, %message, "asset already settled, ignoring failure");
            return;
        }
        tracing::error!(%message, "error loading model");
        self.asset = AssetState::Failed;
        self.publish(event_types::ASSET_FAILED, EventData::AssetFailed { message });
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Scroll toward `offset`. Takes effect over the following frames.
    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll.scroll_to(offset);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_viewport(width, height);
        if let Some(page_height) = self.layout.page_height {
            self.scroll.set_limit((page_height - height as f32).max(0.0));
        }
        self.host.resize(self.viewport);
        self.publish(event_types::RESIZE, EventData::Resize { width, height });
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the page by `dt_ms` and render
    pub fn frame(&mut self, dt_ms: f32) -> BlendOutcome {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.elapsed_ms += dt_ms as f64;

        if let Some(event) = self.scroll.tick(dt_ms) {
            self.on_scroll(event);
        }

        for update in self.scheduler.tick(dt_ms) {
            self.apply(update.target, update.value);
            if update.finished {
                if let Some(action) = self.sequence.tween_finished(update.id) {
                    self.run_action(action);
                }
            }
        }

        let outcome = match self.render_loop {
            RenderLoop::Full => {
                let now = self.clock.now_secs();
                let transform = self.model.as_mut().map(|model| &mut model.transform);
                self.blender.update(&self.motion, transform, now)
            }
            RenderLoop::Bootstrap => BlendOutcome {
                scroll_progress: self.motion.scroll_progress(),
                ..Default::default()
            },
        };

        self.render();
        outcome
    }

    fn on_scroll(&mut self, event: ScrollEvent) {
        self.motion.set_scroll_offset(event.scroll);
        if self.dispatcher.has_subscribers(event_types::SCROLL) {
            let timestamp = self.timestamp();
            self.dispatcher
                .dispatch(&Event::scroll(event.scroll, event.velocity, timestamp));
        }

        for crossing in self.top_zone.update(event.scroll) {
            self.publish_section(TOP_ZONE, crossing);
            self.on_top_zone(crossing);
        }
        for crossing in self.scanner.update(event.scroll) {
            self.publish_section(SCANNER, crossing);
            self.on_scanner(crossing);
        }
    }

    /// Back at the top: restore the model and resume floating
    fn on_top_zone(&mut self, crossing: TriggerEvent) {
        if crossing != TriggerEvent::EnterBack {
            return;
        }
        if self.sequence.cancel() {
            tracing::debug!("scan sequence cancelled");
        }
        if self.model.is_some() {
            self.start_tween(TweenTarget::ModelScale, 1.0, self.intro);
            self.motion.release();
        }
        self.start_tween(TweenTarget::ContainerScale, 1.0, self.intro);
    }

    fn on_scanner(&mut self, crossing: TriggerEvent) {
        match crossing {
            TriggerEvent::Enter => {
                let Some(model) = self.model.as_mut() else {
                    return;
                };
                model.transform.position.y = 0.0;
                let rotation_y = model.transform.rotation.y;
                self.motion.pin();
                let action = self.sequence.start(rotation_y);
                tracing::info!("scan sequence started");
                self.run_action(action);
            }
            TriggerEvent::LeaveBack => {
                let cancelled = self.scheduler.cancel_target(TweenTarget::ContainerScale);
                self.interrupted(cancelled);
                self.container_scale = 0.0;
                self.start_tween(TweenTarget::ContainerScale, 1.0, self.intro);
            }
            TriggerEvent::Leave | TriggerEvent::EnterBack => {}
        }
    }

    fn run_action(&mut self, action: SequenceAction) {
        match action {
            SequenceAction::Tween { target, to, spec } => {
                let id = self.start_tween(target, to, spec);
                self.sequence.track(id);
            }
            SequenceAction::Burst(burst) => {
                tracing::info!(particles = burst.particle_count, "confetti burst");
                self.host.burst(&burst);
                self.sequence.complete_burst();
            }
        }
    }

    fn start_tween(&mut self, target: TweenTarget, to: f32, spec: TweenSpec) -> TweenId {
        let from = self.value_of(target);
        let (id, replaced) = self
            .scheduler
            .replace(target, Tween::new(from, to, spec.duration_ms, spec.easing));
        self.interrupted(replaced);
        id
    }

    /// A tween was dropped before finishing; the sequence may move on
    fn interrupted(&mut self, dropped: Option<TweenId>) {
        let Some(id) = dropped else {
            return;
        };
        if let Some(action) = self.sequence.tween_replaced(id) {
            self.run_action(action);
        }
    }

    fn value_of(&self, target: TweenTarget) -> f32 {
        match target {
            TweenTarget::ModelScale => self.model.map_or(0.0, |m| m.transform.scale.x),
            TweenTarget::ModelRotationY => self.model.map_or(0.0, |m| m.transform.rotation.y),
            TweenTarget::ContainerScale => self.container_scale,
        }
    }

    fn apply(&mut self, target: TweenTarget, value: f32) {
        match target {
            TweenTarget::ContainerScale => self.container_scale = value,
            TweenTarget::ModelScale => {
                if let Some(model) = self.model.as_mut() {
                    model.transform.set_uniform_scale(value);
                }
            }
            TweenTarget::ModelRotationY => {
                if let Some(model) = self.model.as_mut() {
                    model.transform.rotation.y = value;
                }
            }
        }
    }

    fn render(&mut self) {
        let snapshot = FrameSnapshot {
            frame: self.frame_index,
            camera: self.camera,
            model: self.model.map(|m| m.transform),
            container_scale: self.container_scale,
            pinned: self.scanner.is_pinned(),
        };
        self.host.render(&snapshot);
        self.frame_index += 1;
    }

    fn timestamp(&self) -> u64 {
        self.elapsed_ms as u64
    }

    fn publish(&mut self, event_type: EventType, data: EventData) {
        if !self.dispatcher.has_subscribers(event_type) {
            return;
        }
        let event = Event::new(event_type, data, self.timestamp());
        self.dispatcher.dispatch(&event);
    }

    fn publish_section(&mut self, name: &str, crossing: TriggerEvent) {
        let event_type = match crossing {
            TriggerEvent::Enter => event_types::SECTION_ENTER,
            TriggerEvent::Leave => event_types::SECTION_LEAVE,
            TriggerEvent::EnterBack => event_types::SECTION_ENTER_BACK,
            TriggerEvent::LeaveBack => event_types::SECTION_LEAVE_BACK,
        };
        if !self.dispatcher.has_subscribers(event_type) {
            return;
        }
        let event = Event::section(event_type, name, self.timestamp());
        self.dispatcher.dispatch(&event);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn model_transform(&self) -> Option<&Transform3D> {
        self.model.as_ref().map(|m| &m.transform)
    }

    pub fn model_bounds(&self) -> Option<Aabb> {
        self.model.map(|m| m.bounds)
    }

    pub fn container_scale(&self) -> f32 {
        self.container_scale
    }

    pub fn sequence_step(&self) -> ScanStep {
        self.sequence.step()
    }

    pub fn asset_state(&self) -> AssetState {
        self.asset
    }

    pub fn render_loop(&self) -> RenderLoop {
        self.render_loop
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rendered scroll offset
    pub fn scroll_offset(&self) -> f32 {
        self.scroll.current()
    }

    pub fn is_pinned(&self) -> bool {
        self.scanner.is_pinned()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.is_animating()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
