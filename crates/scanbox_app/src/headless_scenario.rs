//! Scenario definition for headless page runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Ordered list of steps played against a page.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Whether any step inspects page state
    pub fn has_assertions(&self) -> bool {
        self.steps.iter().any(ScenarioStep::is_assertion)
    }
}

/// One scenario step. Input steps take effect on the following frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Run frames covering `ms` milliseconds
    Wait { ms: u64 },
    Tick { frames: u32 },
    ScrollTo { offset: f32 },
    Resize { width: u32, height: u32 },
    /// Deliver a model with the given bounding-box size, optionally
    /// reporting byte progress first
    LoadAsset {
        size: [f32; 3],
        #[serde(default)]
        total_bytes: Option<u64>,
    },
    FailAsset { message: String },
    AssertFloating { expected: bool },
    AssertNear {
        probe: String,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    /// Step names: idle, spin, shrink_model, shrink_container, burst, done
    AssertStep { step: String },
    AssertBursts { count: usize },
}

fn default_tolerance() -> f32 {
    1e-3
}

impl ScenarioStep {
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertFloating { .. }
                | ScenarioStep::AssertNear { .. }
                | ScenarioStep::AssertStep { .. }
                | ScenarioStep::AssertBursts { .. }
        )
    }
}
