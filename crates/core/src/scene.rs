//! Reproducible description of an animation run.
//!
//! A [`Scene`] captures everything needed to recompute the same frames:
//! law name, parameter overrides, the first frame index and how many frames
//! to produce. Field models are pure, so two identical scenes always yield
//! bit-identical frames.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Reproducible description of a run over one law.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub law: String,
    #[serde(default = "empty_object")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub start_frame: u64,
    #[serde(default = "default_frames")]
    pub frames: u64,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_frames() -> u64 {
    1
}

impl Scene {
    /// Creates a single-frame scene at frame 0 with no parameter overrides.
    pub fn new(law: &str) -> Self {
        Self {
            law: law.to_string(),
            params: empty_object(),
            start_frame: 0,
            frames: default_frames(),
        }
    }

    /// Checks that the scene asks for at least one frame, that `params` is
    /// a JSON object, and that the frame range does not overflow.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.frames == 0 {
            return Err(FieldError::InvalidScene("frames must be at least 1".into()));
        }
        if !self.params.is_object() {
            return Err(FieldError::InvalidScene("params must be a JSON object".into()));
        }
        self.start_frame
            .checked_add(self.frames)
            .ok_or_else(|| FieldError::InvalidScene("frame range overflows".into()))?;
        Ok(())
    }

    /// Frame indices covered by this scene, before any wrapping.
    pub fn frame_indices(&self) -> std::ops::Range<u64> {
        self.start_frame..self.start_frame.saturating_add(self.frames)
    }
}
