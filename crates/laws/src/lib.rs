#![deny(unsafe_code)]
//! Law registry: maps law names to field models and provides CPU-side plot
//! rasterization and PNG snapshots.
//!
//! This crate sits between `maxwell-core` (which defines the `FieldModel`
//! trait and the driver) and the four law crates. Hosts depend on it to get
//! a single [`LawModel`] type they can hand to
//! [`AnimationDriver`](maxwell_core::AnimationDriver).

pub mod plot;

#[cfg(feature = "png")]
pub mod snapshot;

use maxwell_ampere::AmpereMaxwell;
use maxwell_core::error::FieldError;
use maxwell_core::frame::FrameResult;
use maxwell_core::grid::SampleGrid;
use maxwell_core::model::{FieldModel, Timing};
use maxwell_core::params::{ParamSet, ParamSpec};
use maxwell_core::schedule::Scheduler;
use maxwell_core::AnimationDriver;
use maxwell_faraday::Faraday;
use maxwell_gauss_electric::GaussElectric;
use maxwell_gauss_magnetic::GaussMagnetic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the four laws is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveLaw {
    GaussElectric,
    GaussMagnetic,
    Faraday,
    AmpereMaxwell,
}

impl ActiveLaw {
    /// All laws in presentation order.
    pub const ALL: [ActiveLaw; 4] = [
        ActiveLaw::GaussElectric,
        ActiveLaw::GaussMagnetic,
        ActiveLaw::Faraday,
        ActiveLaw::AmpereMaxwell,
    ];

    /// Stable machine name, as accepted by [`ActiveLaw::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            ActiveLaw::GaussElectric => "gauss-electric",
            ActiveLaw::GaussMagnetic => "gauss-magnetic",
            ActiveLaw::Faraday => "faraday",
            ActiveLaw::AmpereMaxwell => "ampere-maxwell",
        }
    }

    /// Human-readable title.
    pub fn display_name(self) -> &'static str {
        match self {
            ActiveLaw::GaussElectric => "Gauss's law (electric)",
            ActiveLaw::GaussMagnetic => "Gauss's law (magnetic)",
            ActiveLaw::Faraday => "Faraday's law",
            ActiveLaw::AmpereMaxwell => "Ampère–Maxwell law",
        }
    }

    /// Looks a law up by machine name.
    ///
    /// Returns `FieldError::UnknownLaw` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        Self::ALL
            .into_iter()
            .find(|law| law.name() == name)
            .ok_or_else(|| FieldError::UnknownLaw(name.to_string()))
    }

    /// Builds the field model for this law.
    pub fn model(self) -> LawModel {
        match self {
            ActiveLaw::GaussElectric => LawModel::GaussElectric(GaussElectric::new()),
            ActiveLaw::GaussMagnetic => LawModel::GaussMagnetic(GaussMagnetic::new()),
            ActiveLaw::Faraday => LawModel::Faraday(Faraday::new()),
            ActiveLaw::AmpereMaxwell => LawModel::AmpereMaxwell(AmpereMaxwell::new()),
        }
    }
}

impl fmt::Display for ActiveLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActiveLaw {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Enumeration of all field models.
///
/// Wraps each law's implementation and delegates `FieldModel` trait methods.
pub enum LawModel {
    GaussElectric(GaussElectric),
    GaussMagnetic(GaussMagnetic),
    Faraday(Faraday),
    AmpereMaxwell(AmpereMaxwell),
}

impl LawModel {
    /// Constructs a model by law name.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        Ok(ActiveLaw::from_name(name)?.model())
    }

    /// The selection this model belongs to.
    pub fn law(&self) -> ActiveLaw {
        match self {
            LawModel::GaussElectric(_) => ActiveLaw::GaussElectric,
            LawModel::GaussMagnetic(_) => ActiveLaw::GaussMagnetic,
            LawModel::Faraday(_) => ActiveLaw::Faraday,
            LawModel::AmpereMaxwell(_) => ActiveLaw::AmpereMaxwell,
        }
    }

    /// Computes a single frame with parameter overrides, outside any driver.
    ///
    /// Overrides are a JSON object of parameter values, clamped to bounds.
    pub fn compute_once(
        &self,
        overrides: &serde_json::Value,
        frame_index: u64,
    ) -> Result<(SampleGrid, FrameResult), FieldError> {
        let grid = self.sample_grid()?;
        let mut params = self.default_params();
        params.apply_json(overrides)?;
        let frame = self.compute(&grid, &params, frame_index)?;
        Ok((grid, frame))
    }
}

impl fmt::Debug for LawModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LawModel").field(&self.law()).finish()
    }
}

impl FieldModel for LawModel {
    fn name(&self) -> &'static str {
        match self {
            LawModel::GaussElectric(m) => m.name(),
            LawModel::GaussMagnetic(m) => m.name(),
            LawModel::Faraday(m) => m.name(),
            LawModel::AmpereMaxwell(m) => m.name(),
        }
    }

    fn param_specs(&self) -> &'static [ParamSpec] {
        match self {
            LawModel::GaussElectric(m) => m.param_specs(),
            LawModel::GaussMagnetic(m) => m.param_specs(),
            LawModel::Faraday(m) => m.param_specs(),
            LawModel::AmpereMaxwell(m) => m.param_specs(),
        }
    }

    fn sample_grid(&self) -> Result<SampleGrid, FieldError> {
        match self {
            LawModel::GaussElectric(m) => m.sample_grid(),
            LawModel::GaussMagnetic(m) => m.sample_grid(),
            LawModel::Faraday(m) => m.sample_grid(),
            LawModel::AmpereMaxwell(m) => m.sample_grid(),
        }
    }

    fn timing(&self) -> Timing {
        match self {
            LawModel::GaussElectric(m) => m.timing(),
            LawModel::GaussMagnetic(m) => m.timing(),
            LawModel::Faraday(m) => m.timing(),
            LawModel::AmpereMaxwell(m) => m.timing(),
        }
    }

    fn compute(
        &self,
        grid: &SampleGrid,
        params: &ParamSet,
        frame_index: u64,
    ) -> Result<FrameResult, FieldError> {
        match self {
            LawModel::GaussElectric(m) => m.compute(grid, params, frame_index),
            LawModel::GaussMagnetic(m) => m.compute(grid, params, frame_index),
            LawModel::Faraday(m) => m.compute(grid, params, frame_index),
            LawModel::AmpereMaxwell(m) => m.compute(grid, params, frame_index),
        }
    }
}

/// Driver specialised to the four laws.
pub type LawDriver = AnimationDriver<LawModel>;

/// Selects `law` on `driver`, tearing down whatever was running.
pub fn select_law<S: Scheduler + ?Sized>(
    driver: &mut LawDriver,
    law: ActiveLaw,
    scheduler: &mut S,
) -> Result<(), FieldError> {
    log::debug!("switching to {}", law.display_name());
    driver.select(law.model(), scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxwell_core::frame::FieldKind;
    use maxwell_core::schedule::ManualScheduler;
    use serde_json::json;

    #[test]
    fn from_name_round_trips_every_law() {
        for law in ActiveLaw::ALL {
            assert_eq!(ActiveLaw::from_name(law.name()).unwrap(), law);
            assert_eq!(law.name().parse::<ActiveLaw>().unwrap(), law);
            assert_eq!(law.to_string(), law.name());
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        assert!(matches!(
            ActiveLaw::from_name("coulomb"),
            Err(FieldError::UnknownLaw(_))
        ));
        assert!(LawModel::from_name("coulomb").is_err());
    }

    #[test]
    fn all_lists_four_laws_in_order() {
        let names: Vec<_> = ActiveLaw::ALL.iter().map(|law| law.name()).collect();
        assert_eq!(
            names,
            vec!["gauss-electric", "gauss-magnetic", "faraday", "ampere-maxwell"]
        );
    }

    #[test]
    fn serde_uses_kebab_case_names() {
        for law in ActiveLaw::ALL {
            assert_eq!(serde_json::to_value(law).unwrap(), json!(law.name()));
        }
        let law: ActiveLaw = serde_json::from_str("\"ampere-maxwell\"").unwrap();
        assert_eq!(law, ActiveLaw::AmpereMaxwell);
    }

    #[test]
    fn model_delegation_matches_law() {
        for law in ActiveLaw::ALL {
            let model = law.model();
            assert_eq!(model.law(), law);
            assert_eq!(model.name(), law.name());
            assert!(!model.param_specs().is_empty());
        }
    }

    #[test]
    fn grid_shape_per_law() {
        let shapes = [
            (ActiveLaw::GaussElectric, "mesh"),
            (ActiveLaw::GaussMagnetic, "mesh"),
            (ActiveLaw::Faraday, "line"),
            (ActiveLaw::AmpereMaxwell, "line"),
        ];
        for (law, kind) in shapes {
            assert_eq!(law.model().sample_grid().unwrap().kind(), kind, "{law}");
        }
    }

    #[test]
    fn compute_once_applies_overrides() {
        let model = ActiveLaw::GaussElectric.model();
        let (grid, frame) = model.compute_once(&json!({"charge": -2.0}), 0).unwrap();
        let mesh = grid.as_mesh().unwrap();
        let (p, r) = mesh.samples().next().unwrap();
        let expected = p * (-2.0 / (r * r * r));
        assert!((frame.as_vectors().unwrap()[0] - expected).length() < 1e-12);
    }

    #[test]
    fn compute_once_rejects_foreign_parameter() {
        let model = ActiveLaw::Faraday.model();
        assert!(matches!(
            model.compute_once(&json!({"charge": 1.0}), 0),
            Err(FieldError::ParamNotFound(_))
        ));
    }

    #[test]
    fn faraday_worked_example_through_registry() {
        let model = ActiveLaw::Faraday.model();
        let (_, frame) = model.compute_once(&json!({}), 0).unwrap();
        assert!(frame.curve(FieldKind::Magnetic).unwrap().values[0].abs() < 1e-12);
        assert!((frame.curve(FieldKind::Electric).unwrap().values[0] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn select_law_switches_cleanly() {
        let mut sched = ManualScheduler::new();
        let mut driver = LawDriver::new();
        select_law(&mut driver, ActiveLaw::Faraday, &mut sched).unwrap();
        let stale = driver.timer().unwrap();
        select_law(&mut driver, ActiveLaw::GaussMagnetic, &mut sched).unwrap();
        select_law(&mut driver, ActiveLaw::AmpereMaxwell, &mut sched).unwrap();
        assert_eq!(sched.active_count(), 1);
        assert_eq!(driver.model().unwrap().law(), ActiveLaw::AmpereMaxwell);

        let mut frames: Vec<FrameResult> = Vec::new();
        assert!(!driver.tick(stale, &mut frames).unwrap());
        let current = driver.timer().unwrap();
        assert!(driver.tick(current, &mut frames).unwrap());
        assert_eq!(frames.len(), 1);
        assert!(frames[0].curve(FieldKind::Electric).is_some());
    }

    #[test]
    fn every_law_animates_finitely() {
        let mut sched = ManualScheduler::new();
        let mut driver = LawDriver::new();
        for law in ActiveLaw::ALL {
            select_law(&mut driver, law, &mut sched).unwrap();
            let timer = driver.timer().unwrap();
            let mut frames: Vec<FrameResult> = Vec::new();
            for _ in 0..25 {
                driver.tick(timer, &mut frames).unwrap();
            }
            assert_eq!(frames.len(), 25);
            assert!(frames.iter().all(FrameResult::is_finite), "{law} produced non-finite output");
        }
    }

    #[test]
    fn object_safety() {
        let boxed: Box<dyn FieldModel> = Box::new(ActiveLaw::Faraday.model());
        assert_eq!(boxed.name(), "faraday");
    }
}
