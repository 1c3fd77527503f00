#![deny(unsafe_code)]
//! Faraday's law of induction.
//!
//! An oscillating magnetic field travels along a 1D axis and induces an
//! electric field a quarter period out of phase:
//!
//! ```text
//!   B(x, t) =  A · sin(f · (x + t))
//!   E(x, t) = -A · cos(f · (x + t))
//! ```
//!
//! `t` is derived from the frame index via [`frame_time`], so both curves are
//! periodic in time with period `2π / f`.

use maxwell_core::error::FieldError;
use maxwell_core::frame::{Curve, FieldKind, FrameResult};
use maxwell_core::grid::{LineGrid, SampleGrid};
use maxwell_core::model::{frame_time, FieldModel, Timing};
use maxwell_core::params::{param_f64, ParamSet, ParamSpec};
use serde_json::Value;

const DEFAULT_FREQUENCY: f64 = 1.0;
const DEFAULT_AMPLITUDE: f64 = 1.0;
/// Extent of the sampled axis.
const AXIS_START: f64 = 0.0;
const AXIS_END: f64 = 10.0;
const SAMPLES: usize = 100;

const FREQUENCY: ParamSpec = ParamSpec {
    name: "frequency",
    label: "Oscillation frequency f",
    min: 0.0,
    max: 5.0,
    default: DEFAULT_FREQUENCY,
    unit: "Hz",
};

const AMPLITUDE: ParamSpec = ParamSpec {
    name: "amplitude",
    label: "Amplitude of B",
    min: 0.0,
    max: 2.0,
    default: DEFAULT_AMPLITUDE,
    unit: "T",
};

const SPECS: &[ParamSpec] = &[FREQUENCY, AMPLITUDE];

/// Simulation parameters for the induction curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaradayParams {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Default for FaradayParams {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl FaradayParams {
    pub fn from_params(params: &ParamSet) -> Self {
        Self {
            frequency: params.get_or(FREQUENCY.name, DEFAULT_FREQUENCY),
            amplitude: params.get_or(AMPLITUDE.name, DEFAULT_AMPLITUDE),
        }
    }

    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            frequency: FREQUENCY.clamp(param_f64(params, FREQUENCY.name, DEFAULT_FREQUENCY)),
            amplitude: AMPLITUDE.clamp(param_f64(params, AMPLITUDE.name, DEFAULT_AMPLITUDE)),
        }
    }
}

/// `(B, E)` at position `x` and time `t`.
pub fn fields_at(x: f64, t: f64, params: FaradayParams) -> (f64, f64) {
    let (sin, cos) = (params.frequency * (x + t)).sin_cos();
    (params.amplitude * sin, -params.amplitude * cos)
}

/// Induction model over a fixed line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faraday;

impl Faraday {
    pub fn new() -> Self {
        Self
    }

    /// The `B` and `E` curves over `line` at time `t`.
    pub fn sample(line: &LineGrid, t: f64, params: FaradayParams) -> [Curve; 2] {
        let (b, e): (Vec<f64>, Vec<f64>) =
            line.xs().iter().map(|&x| fields_at(x, t, params)).unzip();
        [
            Curve {
                kind: FieldKind::Magnetic,
                values: b,
            },
            Curve {
                kind: FieldKind::Electric,
                values: e,
            },
        ]
    }
}

impl FieldModel for Faraday {
    fn name(&self) -> &'static str {
        "faraday"
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
            FaradayParams::from_params(params),
        );
        Ok(FrameResult::curves(frame_index, curves.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxwell_core::grid::MeshGrid;
    use serde_json::json;
    use std::f64::consts::PI;

    fn params_with(frequency: f64, amplitude: f64) -> ParamSet {
        let mut p = Faraday.default_params();
        p.set("frequency", frequency).unwrap();
        p.set("amplitude", amplitude).unwrap();
        p
    }

    #[test]
    fn worked_example_at_origin() {
        let (b, e) = fields_at(0.0, 0.0, FaradayParams::default());
        assert!(b.abs() < 1e-12, "B = {b}");
        assert!((e + 1.0).abs() < 1e-12, "E = {e}");
    }

    #[test]
    fn worked_example_through_model() {
        let grid = Faraday.sample_grid().unwrap();
        let frame = Faraday.compute(&grid, &params_with(1.0, 1.0), 0).unwrap();
        let b = frame.curve(FieldKind::Magnetic).unwrap();
        let e = frame.curve(FieldKind::Electric).unwrap();
        assert!(b.values[0].abs() < 1e-12);
        assert!((e.values[0] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn curves_are_b_then_e() {
        let grid = Faraday.sample_grid().unwrap();
        let frame = Faraday.compute(&grid, &Faraday.default_params(), 0).unwrap();
        let kinds: Vec<_> = frame.as_curves().unwrap().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![FieldKind::Magnetic, FieldKind::Electric]);
    }

    #[test]
    fn fields_are_in_quadrature() {
        let p = FaradayParams {
            frequency: 2.0,
            amplitude: 1.5,
        };
        for i in 0..50 {
            let (b, e) = fields_at(i as f64 * 0.2, 0.35, p);
            assert!((b * b + e * e - 2.25).abs() < 1e-9);
        }
    }

    #[test]
    fn time_shifts_the_wave() {
        let p = FaradayParams::default();
        // One frame-time unit forward at x equals x + 1 at time zero.
        let (b1, e1) = fields_at(2.0, 1.0, p);
        let (b2, e2) = fields_at(3.0, 0.0, p);
        assert!((b1 - b2).abs() < 1e-12 && (e1 - e2).abs() < 1e-12);

        let grid = Faraday.sample_grid().unwrap();
        let a = Faraday.compute(&grid, &Faraday.default_params(), 0).unwrap();
        let b = Faraday.compute(&grid, &Faraday.default_params(), 20).unwrap();
        assert_ne!(a.as_curves(), b.as_curves());
    }

    #[test]
    fn zero_frequency_is_static() {
        let grid = Faraday.sample_grid().unwrap();
        let params = params_with(0.0, 1.5);
        let a = Faraday.compute(&grid, &params, 0).unwrap();
        let b = Faraday.compute(&grid, &params, 133).unwrap();
        assert_eq!(a.as_curves(), b.as_curves());
        let e = a.curve(FieldKind::Electric).unwrap();
        assert!(e.values.iter().all(|v| (v + 1.5).abs() < 1e-12));
    }

    #[test]
    fn default_grid_is_100_points_on_0_10() {
        let grid = Faraday.sample_grid().unwrap();
        let line = grid.as_line().unwrap();
        assert_eq!(line.len(), 100);
        assert_eq!(line.bounds(), (0.0, 10.0));
    }

    #[test]
    fn mesh_grid_is_rejected() {
        let grid: SampleGrid = MeshGrid::square(-1.0, 1.0, 2).unwrap().into();
        assert!(Faraday.compute(&grid, &Faraday.default_params(), 0).is_err());
    }

    #[test]
    fn timing_is_fast_redraw() {
        let t = Faraday.timing();
        assert_eq!(t.interval.as_millis(), 50);
        assert_eq!(t.frame_count, 200);
    }

    #[test]
    fn from_json_extracts_and_clamps() {
        let p = FaradayParams::from_json(&json!({"frequency": 2.5, "amplitude": 9}));
        assert_eq!(p.frequency, 2.5);
        assert_eq!(p.amplitude, 2.0);
        assert_eq!(FaradayParams::from_json(&json!({})), FaradayParams::default());
    }

    #[test]
    fn schema_lists_both_parameters() {
        let schema = Faraday.param_schema();
        for key in ["frequency", "amplitude"] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
            assert!(schema[key].get("description").is_some());
        }
    }

    #[test]
    fn frame_index_period_matches_frequency() {
        // f = π/5 gives a period of 10 time units, which is 200 frames.
        let grid = Faraday.sample_grid().unwrap();
        let params = params_with(PI / 5.0, 1.5);
        for k in [0, 3, 57, 199] {
            let a = Faraday.compute(&grid, &params, k).unwrap();
            let b = Faraday.compute(&grid, &params, k + 200).unwrap();
            for (ca, cb) in a.as_curves().unwrap().iter().zip(b.as_curves().unwrap()) {
                assert_eq!(ca.kind, cb.kind);
                for (va, vb) in ca.values.iter().zip(&cb.values) {
                    assert!((va - vb).abs() < 1e-9, "frame {k}: {va} vs {vb}");
                }
            }
        }
        let half = Faraday.compute(&grid, &params, 100).unwrap();
        let start = Faraday.compute(&grid, &params, 0).unwrap();
        assert_ne!(half.as_curves(), start.as_curves());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn finite_for_all_in_bounds_params(
                f in 0.0_f64..=5.0,
                a in 0.0_f64..=2.0,
                frame in 0_u64..10_000,
            ) {
                let grid = Faraday.sample_grid().unwrap();
                let frame = Faraday.compute(&grid, &params_with(f, a), frame).unwrap();
                prop_assert!(frame.is_finite());
            }

            #[test]
            fn periodic_in_time(
                f in 0.1_f64..=5.0,
                a in 0.0_f64..=2.0,
                x in 0.0_f64..=10.0,
                t in 0.0_f64..=10.0,
            ) {
                let p = FaradayParams { frequency: f, amplitude: a };
                let period = 2.0 * PI / f;
                let (b0, e0) = fields_at(x, t, p);
                let (b1, e1) = fields_at(x, t + period, p);
                prop_assert!((b0 - b1).abs() < 1e-9);
                prop_assert!((e0 - e1).abs() < 1e-9);
            }

            #[test]
            fn bounded_by_amplitude(
                f in 0.0_f64..=5.0,
                a in 0.0_f64..=2.0,
                frame in 0_u64..200,
            ) {
                let grid = Faraday.sample_grid().unwrap();
                let frame = Faraday.compute(&grid, &params_with(f, a), frame).unwrap();
                for c in frame.as_curves().unwrap() {
                    for v in &c.values {
                        prop_assert!(v.abs() <= a + 1e-12);
                    }
                }
            }
        }
    }
}
