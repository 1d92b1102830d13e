use std::path::Path;

use gungale_common::{ScriptStep, TickInput};
use serde::{Deserialize, Serialize};

/// Errors from reading or writing an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A recorded sequence of per-tick inputs and the frame times they ran with.
///
/// Serialized as a plain JSON array of `{ "input": ..., "dt": ... }` objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tick.
    pub fn record(&mut self, input: TickInput, dt: f32) {
        self.steps.push(ScriptStep { input, dt });
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total recorded time in seconds.
    pub fn duration(&self) -> f64 {
        self.steps.iter().map(|s| f64::from(s.dt)).sum()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let script = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), steps = script.len(), "loaded input script");
        Ok(script)
    }

    pub fn to_json_pretty(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::debug!(path = %path.display(), steps = self.len(), "saved input script");
        Ok(())
    }
}

impl From<Vec<ScriptStep>> for InputScript {
    fn from(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }
}
