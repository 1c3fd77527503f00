#![deny(unsafe_code)]
//! Gauss's law for electric fields.
//!
//! Samples the field of a single point charge at the origin on a square mesh:
//!
//! ```text
//!   E(x, y) = q · (x, y) / r³
//! ```
//!
//! The field is static: the frame index only tags the output. Mesh points on
//! the origin carry the grid's substitute radius, so the field stays finite
//! everywhere.

use glam::DVec2;
use maxwell_core::error::FieldError;
use maxwell_core::frame::{FieldKind, FrameResult};
use maxwell_core::grid::{MeshGrid, SampleGrid};
use maxwell_core::model::{FieldModel, Timing};
use maxwell_core::params::{param_f64, ParamSet, ParamSpec};
use serde_json::Value;

/// Default point charge in coulombs.
const DEFAULT_CHARGE: f64 = 1.0;
/// Half-width of the square sampling window.
const EXTENT: f64 = 5.0;
/// Samples per mesh axis.
const SAMPLES_PER_AXIS: usize = 20;

const CHARGE: ParamSpec = ParamSpec {
    name: "charge",
    label: "Point charge q",
    min: -5.0,
    max: 5.0,
    default: DEFAULT_CHARGE,
    unit: "C",
};

const SPECS: &[ParamSpec] = &[CHARGE];

/// Simulation parameters for the point-charge field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussElectricParams {
    /// Point charge q; its sign sets the field direction.
    pub charge: f64,
}

impl Default for GaussElectricParams {
    fn default() -> Self {
        Self {
            charge: DEFAULT_CHARGE,
        }
    }
}

impl GaussElectricParams {
    /// Reads the live parameter set, falling back to defaults.
    pub fn from_params(params: &ParamSet) -> Self {
        Self {
            charge: params.get_or(CHARGE.name, DEFAULT_CHARGE),
        }
    }

    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Values are clamped to the declared range.
    pub fn from_json(params: &Value) -> Self {
        Self {
            charge: CHARGE.clamp(param_f64(params, CHARGE.name, DEFAULT_CHARGE)),
        }
    }
}

/// Field of charge `q` at `point`, using the precomputed (origin-clamped) `radius`.
pub fn field_at(point: DVec2, radius: f64, charge: f64) -> DVec2 {
    point * (charge / (radius * radius * radius))
}

/// Point-charge field model.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussElectric;

impl GaussElectric {
    pub fn new() -> Self {
        Self
    }

    /// Field vectors over `mesh` for the given parameters.
    pub fn sample(mesh: &MeshGrid, params: GaussElectricParams) -> Vec<DVec2> {
        mesh.samples()
            .map(|(p, r)| field_at(p, r, params.charge))
            .collect()
    }
}

impl FieldModel for GaussElectric {
    fn name(&self) -> &'static str {
        "gauss-electric"
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
        let p = GaussElectricParams::from_params(params);
        Ok(FrameResult::vectors(
            frame_index,
            FieldKind::Electric,
            Self::sample(mesh, p),
        ))
    }
}
