//! Fixed sample grids on which field models are evaluated.
//!
//! A [`SampleGrid`] is built once when a law is selected and then shared
//! read-only by every frame. Two shapes exist: a 2D [`MeshGrid`] for vector
//! fields and a 1D [`LineGrid`] for travelling-wave curves.
//!
//! Mesh points sitting on the origin get [`ORIGIN_RADIUS`] as their radius
//! instead of zero, so inverse-square and inverse-cube terms stay finite.

use crate::error::FieldError;
use glam::DVec2;

/// Radius substituted for mesh points at the origin.
pub const ORIGIN_RADIUS: f64 = 0.1;
/// Radii at or below this are treated as the origin.
pub const ORIGIN_EPSILON: f64 = 1e-12;

/// Returns `n` evenly spaced values from `start` to `end` inclusive.
///
/// A single sample yields `[start]`. Returns `InvalidDimensions` for `n == 0`
/// and `InvalidRange` if either bound is non-finite or `start > end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>, FieldError> {
    if n == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    if !start.is_finite() || !end.is_finite() || start > end {
        return Err(FieldError::InvalidRange {
            min: start,
            max: end,
        });
    }
    if n == 1 {
        return Ok(vec![start]);
    }
    let step = (end - start) / (n - 1) as f64;
    Ok((0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect())
}

/// Row-major 2D mesh of sample points with precomputed, origin-clamped radii.
#[derive(Debug, Clone)]
pub struct MeshGrid {
    nx: usize,
    ny: usize,
    points: Vec<DVec2>,
    radii: Vec<f64>,
}

impl MeshGrid {
    /// Builds the cartesian product of `xs` and `ys` (x varies fastest).
    pub fn from_axes(xs: &[f64], ys: &[f64]) -> Result<Self, FieldError> {
        if xs.is_empty() || ys.is_empty() {
            return Err(FieldError::InvalidDimensions);
        }
        let len = xs
            .len()
            .checked_mul(ys.len())
            .ok_or(FieldError::InvalidDimensions)?;
        let mut points = Vec::with_capacity(len);
        for &y in ys {
            for &x in xs {
                points.push(DVec2::new(x, y));
            }
        }
        let radii = points.iter().map(|p| clamped_radius(*p)).collect();
        Ok(Self {
            nx: xs.len(),
            ny: ys.len(),
            points,
            radii,
        })
    }

    /// Square mesh with `n` samples per axis spanning `[min, max]` on both axes.
    pub fn square(min: f64, max: f64, n: usize) -> Result<Self, FieldError> {
        let axis = linspace(min, max, n)?;
        Self::from_axes(&axis, &axis)
    }

    /// Number of samples along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of samples along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed mesh; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Distance of each point from the origin, never below [`ORIGIN_RADIUS`]
    /// for points at the origin.
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Iterates over `(point, radius)` pairs in row-major order.
    pub fn samples(&self) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        self.points.iter().copied().zip(self.radii.iter().copied())
    }

    /// Distance between neighbouring samples along x, or 0 for a single column.
    pub fn spacing_x(&self) -> f64 {
        if self.nx < 2 {
            return 0.0;
        }
        self.points[1].x - self.points[0].x
    }

    /// Distance between neighbouring samples along y, or 0 for a single row.
    pub fn spacing_y(&self) -> f64 {
        if self.ny < 2 {
            return 0.0;
        }
        self.points[self.nx].y - self.points[0].y
    }

    /// Axis-aligned bounds as `(min, max)` corners.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        (first.min(last), first.max(last))
    }
}

fn clamped_radius(p: DVec2) -> f64 {
    let r = p.length();
    if r <= ORIGIN_EPSILON {
        ORIGIN_RADIUS
    } else {
        r
    }
}

/// Ordered 1D sample coordinates.
#[derive(Debug, Clone)]
pub struct LineGrid {
    xs: Vec<f64>,
}

impl LineGrid {
    /// `n` evenly spaced samples on `[start, end]`.
    pub fn new(start: f64, end: f64, n: usize) -> Result<Self, FieldError> {
        Ok(Self {
            xs: linspace(start, end, n)?,
        })
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// First and last coordinate.
    pub fn bounds(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

/// The grid a law is evaluated on.
#[derive(Debug, Clone)]
pub enum SampleGrid {
    Mesh(MeshGrid),
    Line(LineGrid),
}

impl SampleGrid {
    /// Short shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SampleGrid::Mesh(_) => "mesh",
            SampleGrid::Line(_) => "line",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SampleGrid::Mesh(m) => m.len(),
            SampleGrid::Line(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the mesh, or fails with `GridMismatch` for a line grid.
    pub fn as_mesh(&self) -> Result<&MeshGrid, FieldError> {
        match self {
            SampleGrid::Mesh(m) => Ok(m),
            other => Err(FieldError::GridMismatch {
                expected: "mesh",
                got: other.kind(),
            }),
        }
    }

    /// Borrows the line, or fails with `GridMismatch` for a mesh grid.
    pub fn as_line(&self) -> Result<&LineGrid, FieldError> {
        match self {
            SampleGrid::Line(l) => Ok(l),
            other => Err(FieldError::GridMismatch {
                expected: "line",
                got: other.kind(),
            }),
        }
    }
}

impl From<MeshGrid> for SampleGrid {
    fn from(m: MeshGrid) -> Self {
        SampleGrid::Mesh(m)
    }
}

impl From<LineGrid> for SampleGrid {
    fn from(l: LineGrid) -> Self {
        SampleGrid::Line(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- linspace --

    #[test]
    fn linspace_includes_both_endpoints() {
        let xs = linspace(0.0, 10.0, 100).unwrap();
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 10.0);
    }

    #[test]
    fn linspace_single_sample_is_start() {
        assert_eq!(linspace(-2.0, 4.0, 1).unwrap(), vec![-2.0]);
    }

    #[test]
    fn linspace_rejects_zero_samples() {
        assert!(matches!(
            linspace(0.0, 1.0, 0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn linspace_rejects_inverted_or_nan_range() {
        assert!(matches!(
            linspace(1.0, 0.0, 5),
            Err(FieldError::InvalidRange { .. })
        ));
        assert!(linspace(f64::NAN, 1.0, 5).is_err());
        assert!(linspace(0.0, f64::INFINITY, 5).is_err());
    }

    // -- MeshGrid --

    #[test]
    fn square_mesh_is_row_major() {
        let mesh = MeshGrid::square(-5.0, 5.0, 20).unwrap();
        assert_eq!(mesh.nx(), 20);
        assert_eq!(mesh.ny(), 20);
        assert_eq!(mesh.len(), 400);
        assert_eq!(mesh.points()[0], DVec2::new(-5.0, -5.0));
        assert_eq!(mesh.points()[19], DVec2::new(5.0, -5.0));
        assert_eq!(mesh.points()[20].x, -5.0);
        assert!(mesh.points()[20].y > -5.0);
    }

    #[test]
    fn even_square_mesh_never_hits_origin() {
        let mesh = MeshGrid::square(-5.0, 5.0, 20).unwrap();
        assert!(mesh.radii().iter().all(|&r| r > 0.2));
    }

    #[test]
    fn origin_radius_is_substituted() {
        let mesh = MeshGrid::square(-1.0, 1.0, 3).unwrap();
        let center = 4;
        assert_eq!(mesh.points()[center], DVec2::ZERO);
        assert_eq!(mesh.radii()[center], ORIGIN_RADIUS);
        assert!((mesh.radii()[1] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spacing_matches_axis_step() {
        let mesh = MeshGrid::square(0.0, 4.0, 5).unwrap();
        assert!((mesh.spacing_x() - 1.0).abs() < 1e-12);
        assert!((mesh.spacing_y() - 1.0).abs() < 1e-12);
        let single = MeshGrid::from_axes(&[1.0], &[2.0]).unwrap();
        assert_eq!(single.spacing_x(), 0.0);
        assert_eq!(single.spacing_y(), 0.0);
    }

    #[test]
    fn bounds_span_corners() {
        let mesh = MeshGrid::square(-5.0, 5.0, 20).unwrap();
        let (lo, hi) = mesh.bounds();
        assert_eq!(lo, DVec2::splat(-5.0));
        assert_eq!(hi, DVec2::splat(5.0));
    }

    #[test]
    fn from_axes_rejects_empty_axis() {
        assert!(MeshGrid::from_axes(&[], &[1.0]).is_err());
        assert!(MeshGrid::from_axes(&[1.0], &[]).is_err());
    }

    // -- SampleGrid --

    #[test]
    fn as_mesh_on_line_is_mismatch() {
        let grid: SampleGrid = LineGrid::new(0.0, 10.0, 100).unwrap().into();
        assert_eq!(grid.kind(), "line");
        assert_eq!(grid.len(), 100);
        assert!(matches!(
            grid.as_mesh(),
            Err(FieldError::GridMismatch {
                expected: "mesh",
                got: "line"
            })
        ));
        assert!(grid.as_line().is_ok());
    }

    #[test]
    fn as_line_on_mesh_is_mismatch() {
        let grid: SampleGrid = MeshGrid::square(-1.0, 1.0, 4).unwrap().into();
        assert!(grid.as_line().is_err());
        assert!(grid.as_mesh().is_ok());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mesh_radii_are_never_zero(
                min in -20.0_f64..0.0,
                span in 0.0_f64..40.0,
                n in 1_usize..=25,
            ) {
                let mesh = MeshGrid::square(min, min + span, n).unwrap();
                for &r in mesh.radii() {
                    prop_assert!(r > ORIGIN_EPSILON, "radius {r} too small");
                    prop_assert!(r.is_finite());
                }
            }

            #[test]
            fn linspace_is_monotonic(
                start in -100.0_f64..100.0,
                span in 0.0_f64..100.0,
                n in 1_usize..200,
            ) {
                let xs = linspace(start, start + span, n).unwrap();
                prop_assert_eq!(xs.len(), n);
                for w in xs.windows(2) {
                    prop_assert!(w[0] <= w[1]);
                }
            }
        }
    }
}
