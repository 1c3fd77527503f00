#![deny(unsafe_code)]
//! Gauss's law for magnetism.
//!
//! Draws a closed, circulating field around the origin, scaled by a magnetic
//! moment `m`:
//!
//! ```text
//!   B(x, y) = m · (-y, x) / r³
//! ```
//!
//! Every field line closes on itself, which is the picture of ∇·B = 0: no
//! sources and no sinks. The field is static in time.

use glam::DVec2;
use maxwell_core::error::FieldError;
use maxwell_core::frame::{FieldKind, FrameResult};
use maxwell_core::grid::{MeshGrid, SampleGrid};
use maxwell_core::model::{FieldModel, Timing};
use maxwell_core::params::{param_f64, ParamSet, ParamSpec};
use serde_json::Value;

/// Default magnetic moment.
const DEFAULT_MOMENT: f64 = 1.0;
const EXTENT: f64 = 5.0;
const SAMPLES_PER_AXIS: usize = 20;

const MOMENT: ParamSpec = ParamSpec {
    name: "moment",
    label: "Magnetic moment m",
    min: 0.0,
    max: 5.0,
    default: DEFAULT_MOMENT,
    unit: "A·m²",
};

const SPECS: &[ParamSpec] = &[MOMENT];

/// Simulation parameters for the circulating field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussMagneticParams {
    pub moment: f64,
}

impl Default for GaussMagneticParams {
    fn default() -> Self {
        Self {
            moment: DEFAULT_MOMENT,
        }
    }
}

impl GaussMagneticParams {
    pub fn from_params(params: &ParamSet) -> Self {
        Self {
            moment: params.get_or(MOMENT.name, DEFAULT_MOMENT),
        }
    }

    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            moment: MOMENT.clamp(param_f64(params, MOMENT.name, DEFAULT_MOMENT)),
        }
    }
}

/// Field of moment `m` at `point`; `radius` is the origin-clamped distance.
pub fn field_at(point: DVec2, radius: f64, moment: f64) -> DVec2 {
    point.perp() * (moment / (radius * radius * radius))
}

/// Circulating magnetic field model.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussMagnetic;

impl GaussMagnetic {
    pub fn new() -> Self {
        Self
    }

    pub fn sample(mesh: &MeshGrid, params: GaussMagneticParams) -> Vec<DVec2> {
        mesh.samples()
            .map(|(p, r)| field_at(p, r, params.moment))
            .collect()
    }
}

impl FieldModel for GaussMagnetic {
    fn name(&self) -> &'static str {
        "gauss-magnetic"
    }

    fn param_specs(&self) -> &'static [ParamSpec] {
        SPECS
    }

    fn sample_grid(&self) -> Result<SampleGrid, FieldError> {
        Ok(MeshGrid::square(-EXTENT, EXTENT, SAMPLES_PER_AXIS)?.into())
    }

    fn timing(&self) -> Timing {
        Timing::from_millis(100, 100)
    }

    fn compute(
        &self,
        grid: &SampleGrid,
        params: &ParamSet,
        frame_index: u64,
    ) -> Result<FrameResult, FieldError> {
        let mesh = grid.as_mesh()?;
        Ok(FrameResult::vectors(
            frame_index,
            FieldKind::Magnetic,
            Self::sample(mesh, GaussMagneticParams::from_params(params)),
        ))
    }
}
