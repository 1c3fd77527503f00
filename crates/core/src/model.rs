//! The `FieldModel` trait that every simulated law implements.
//!
//! The trait is object-safe so models can be used as `dyn FieldModel` for
//! runtime switching between laws.

use crate::error::FieldError;
use crate::frame::FrameResult;
use crate::grid::SampleGrid;
use crate::params::{ParamSet, ParamSpec};
use serde_json::{Map, Value};
use std::time::Duration;

/// Frames per unit of simulated time: `t = frame_index / FRAMES_PER_TIME_UNIT`.
pub const FRAMES_PER_TIME_UNIT: f64 = 20.0;

/// Simulated time for a frame index.
pub fn frame_time(frame_index: u64) -> f64 {
    frame_index as f64 / FRAMES_PER_TIME_UNIT
}

/// Animation pacing for a law.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Wall-clock interval between ticks.
    pub interval: Duration,
    /// The frame index wraps back to 0 after this many frames.
    pub frame_count: u64,
}

impl Timing {
    pub const fn from_millis(interval_ms: u64, frame_count: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            frame_count,
        }
    }

    /// The index following `frame_index`, wrapping at `frame_count`.
    ///
    /// A `frame_count` of zero never wraps.
    pub fn next_frame(&self, frame_index: u64) -> u64 {
        let next = frame_index.wrapping_add(1);
        if self.frame_count == 0 {
            next
        } else {
            next % self.frame_count
        }
    }
}

/// A field law: a pure mapping from grid, parameters and frame index to a frame.
pub trait FieldModel {
    /// Stable machine name (e.g. `"faraday"`).
    fn name(&self) -> &'static str;

    /// Declared parameters with bounds and defaults.
    fn param_specs(&self) -> &'static [ParamSpec];

    /// Builds the fixed grid this law is evaluated on.
    fn sample_grid(&self) -> Result<SampleGrid, FieldError>;

    /// Tick interval and frame wrap for animation.
    fn timing(&self) -> Timing;

    /// Evaluates the field for one frame.
    ///
    /// Pure: reads `grid` and `params`, returns a fresh frame. Fails only with
    /// `FieldError::GridMismatch` when handed a grid of the wrong shape.
    fn compute(
        &self,
        grid: &SampleGrid,
        params: &ParamSet,
        frame_index: u64,
    ) -> Result<FrameResult, FieldError>;

    /// Parameters at their defaults.
    fn default_params(&self) -> ParamSet {
        ParamSet::from_specs(self.param_specs())
    }

    /// Schema describing all parameters, their ranges, units, and defaults.
    fn param_schema(&self) -> Value {
        let map: Map<String, Value> = self
            .param_specs()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.schema()))
            .collect();
        Value::Object(map)
    }
}
