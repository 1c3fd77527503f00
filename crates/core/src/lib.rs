#![deny(unsafe_code)]
//! Core types and traits for the Maxwell field simulator.
//!
//! Provides the `FieldModel` trait, `SampleGrid` (mesh and line), bounded
//! `Parameter`/`ParamSet`, `FrameResult`, the `AnimationDriver` state machine
//! with its `Scheduler` and `RenderSink` seams, and the serializable `Scene`.

pub mod driver;
pub mod error;
pub mod frame;
pub mod grid;
pub mod model;
pub mod params;
pub mod scene;
pub mod schedule;

pub use driver::{AnimationDriver, RenderSink};
pub use error::FieldError;
pub use frame::{Curve, FieldKind, FrameData, FrameResult};
pub use grid::{LineGrid, MeshGrid, SampleGrid};
pub use model::{frame_time, FieldModel, Timing};
pub use params::{ParamSet, ParamSpec, Parameter};
pub use scene::Scene;
pub use schedule::{IntervalClock, ManualScheduler, Scheduler, TimerId};
