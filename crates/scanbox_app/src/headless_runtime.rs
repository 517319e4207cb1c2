//! Deterministic frame loop for headless runs.

use anyhow::{bail, Result};

/// Frame pacing and clock origin for a headless run.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Wall-clock seconds the manual clock starts at.
    pub start_secs: f64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 1,
            tick_ms: 16,
            start_secs: 1_700_000_000.0,
        }
    }
}

/// Passed to the per-frame callback.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    pub elapsed_ms: u64,
}

pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run `max_frames` frames, `tick_ms` apart.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        if !cfg.start_secs.is_finite() {
            bail!("headless start_secs must be finite");
        }

        for frame in 0..cfg.max_frames {
            on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms: cfg.tick_ms.saturating_mul(frame as u64),
            });
        }
        Ok(())
    }
}
