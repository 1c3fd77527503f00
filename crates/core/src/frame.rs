//! Per-frame output of a field model.
//!
//! A [`FrameResult`] is recomputed on every tick and never retained by the
//! driver. Vector frames are aligned index-for-index with the mesh points of
//! the grid they were computed on; curve frames hold one value per line
//! coordinate for each curve.

use glam::DVec2;
use serde::Serialize;

/// Which physical field a series or vector set represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Electric,
    Magnetic,
}

impl FieldKind {
    /// Conventional symbol, `E` or `B`.
    pub fn symbol(self) -> &'static str {
        match self {
            FieldKind::Electric => "E",
            FieldKind::Magnetic => "B",
        }
    }
}

/// One scalar series over a line grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub kind: FieldKind,
    pub values: Vec<f64>,
}

impl Curve {
    /// `(min, max)` of the values, or `None` for an empty curve.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// The sampled field for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FrameData {
    /// A vector per mesh point.
    Vectors { kind: FieldKind, vectors: Vec<DVec2> },
    /// One or more curves over a line grid.
    Curves { curves: Vec<Curve> },
}

/// A computed frame, tagged with the index it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    pub frame_index: u64,
    pub data: FrameData,
}

impl FrameResult {
    pub fn vectors(frame_index: u64, kind: FieldKind, vectors: Vec<DVec2>) -> Self {
        Self {
            frame_index,
            data: FrameData::Vectors { kind, vectors },
        }
    }

    pub fn curves(frame_index: u64, curves: Vec<Curve>) -> Self {
        Self {
            frame_index,
            data: FrameData::Curves { curves },
        }
    }

    /// Vector data, if this is a vector frame.
    pub fn as_vectors(&self) -> Option<&[DVec2]> {
        match &self.data {
            FrameData::Vectors { vectors, .. } => Some(vectors),
            FrameData::Curves { .. } => None,
        }
    }

    /// Curve data, if this is a curve frame.
    pub fn as_curves(&self) -> Option<&[Curve]> {
        match &self.data {
            FrameData::Curves { curves } => Some(curves),
            FrameData::Vectors { .. } => None,
        }
    }

    /// The curve for `kind`, if present.
    pub fn curve(&self, kind: FieldKind) -> Option<&Curve> {
        self.as_curves()?.iter().find(|c| c.kind == kind)
    }

    /// True when every component of every sample is finite.
    pub fn is_finite(&self) -> bool {
        match &self.data {
            FrameData::Vectors { vectors, .. } => vectors.iter().all(|v| v.is_finite()),
            FrameData::Curves { curves } => curves
                .iter()
                .all(|c| c.values.iter().all(|v| v.is_finite())),
        }
    }

    /// Largest vector magnitude, or `None` for curve frames and empty meshes.
    pub fn max_magnitude(&self) -> Option<f64> {
        self.as_vectors()?
            .iter()
            .map(|v| v.length())
            .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))))
    }
}
