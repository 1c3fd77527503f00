#![deny(unsafe_code)]
//! Ampère–Maxwell law.
//!
//! A travelling electromagnetic wave on a 1D axis where the magnetic curve is
//! lifted by a conduction current density `J`:
//!
//! ```text
//!   E(x, t) = sin(f · (x + t))
//!   B(x, t) = J + cos(f · (x + t))
//! ```
//!
//! The displacement term shows up as the oscillation; `J` shifts B without
//! changing its shape.

use maxwell_core::error::FieldError;
use maxwell_core::frame::{Curve, FieldKind, FrameResult};
use maxwell_core::grid::{LineGrid, SampleGrid};
use maxwell_core::model::{frame_time, FieldModel, Timing};
use maxwell_core::params::{param_f64, ParamSet, ParamSpec};
use serde_json::Value;

const DEFAULT_FREQUENCY: f64 = 1.0;
const DEFAULT_CURRENT_DENSITY: f64 = 0.5;
const AXIS_START: f64 = 0.0;
const AXIS_END: f64 = 10.0;
const SAMPLES: usize = 100;

const FREQUENCY: ParamSpec = ParamSpec {
    name: "frequency",
    label: "Wave frequency f",
    min: 0.0,
    max: 5.0,
    default: DEFAULT_FREQUENCY,
    unit: "Hz",
};

const CURRENT_DENSITY: ParamSpec = ParamSpec {
    name: "current_density",
    label: "Current density J",
    min: 0.0,
    max: 2.0,
    default: DEFAULT_CURRENT_DENSITY,
    unit: "A/m²",
};

const SPECS: &[ParamSpec] = &[FREQUENCY, CURRENT_DENSITY];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmpereMaxwellParams {
    pub frequency: f64,
    pub current_density: f64,
}

impl Default for AmpereMaxwellParams {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            current_density: DEFAULT_CURRENT_DENSITY,
        }
    }
}

impl AmpereMaxwellParams {
    pub fn from_params(params: &ParamSet) -> Self {
        Self {
            frequency: params.get_or(FREQUENCY.name, DEFAULT_FREQUENCY),
            current_density: params.get_or(CURRENT_DENSITY.name, DEFAULT_CURRENT_DENSITY),
        }
    }

    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            frequency: FREQUENCY.clamp(param_f64(params, FREQUENCY.name, DEFAULT_FREQUENCY)),
            current_density: CURRENT_DENSITY.clamp(param_f64(
                params,
                CURRENT_DENSITY.name,
                DEFAULT_CURRENT_DENSITY,
            )),
        }
    }
}

/// `(E, B)` at position `x` and time `t`.
pub fn fields_at(x: f64, t: f64, params: AmpereMaxwellParams) -> (f64, f64) {
    let (sin, cos) = (params.frequency * (x + t)).sin_cos();
    (sin, params.current_density + cos)
}

/// Electromagnetic wave model over a fixed line.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmpereMaxwell;

impl AmpereMaxwell {
    pub fn new() -> Self {
        Self
    }

    /// The `E` and `B` curves over `line` at time `t`.
    pub fn sample(line: &LineGrid, t: f64, params: AmpereMaxwellParams) -> [Curve; 2] {
        let (e, b): (Vec<f64>, Vec<f64>) =
            line.xs().iter().map(|&x| fields_at(x, t, params)).unzip();
        [
            Curve {
                kind: FieldKind::Electric,
                values: e,
            },
            Curve {
                kind: FieldKind::Magnetic,
                values: b,
            },
        ]
    }
}

impl FieldModel for AmpereMaxwell {
    fn name(&self) -> &'static str {
        "ampere-maxwell"
    }

    fn param_specs(&self) -> &'static [ParamSpec] {
        SPECS
    }

    fn sample_grid(&self) -> Result<SampleGrid, FieldError> {
        Ok(LineGrid::new(AXIS_START, AXIS_END, SAMPLES)?.into())
    }

    fn timing(&self) -> Timing {
        Timing::from_millis(50, 200)
    }

    fn compute(
        &self,
        grid: &SampleGrid,
        params: &ParamSet,
        frame_index: u64,
    ) -> Result<FrameResult, FieldError> {
        let line = grid.as_line()?;
        let curves = Self::sample(
            line,
            frame_time(frame_index),
            AmpereMaxwellParams::from_params(params),
        );
        Ok(FrameResult::curves(frame_index, curves.into()))
    }
}
