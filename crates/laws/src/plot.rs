//! Pure-computation rasterization of a [`FrameResult`] into an RGBA8 buffer.
//!
//! This module is always available (no feature gate) so that hosts which
//! blit raw pixels can share the drawing with the `png` snapshot path.
//!
//! Vector frames become quiver plots: one arrow per mesh point, tail on the
//! point, scaled so the longest arrow spans 90% of a mesh cell. Curve frames
//! become line plots over a fixed vertical range of [-3, 3].

use glam::DVec2;
use maxwell_core::error::FieldError;
use maxwell_core::frame::{Curve, FieldKind, FrameData, FrameResult};
use maxwell_core::grid::{LineGrid, MeshGrid, SampleGrid};

/// An sRGB color with alpha.
pub type Rgba = [u8; 4];

const BACKGROUND: Rgba = [255, 255, 255, 255];
const GRID_LINE: Rgba = [225, 225, 225, 255];
const AXIS_LINE: Rgba = [150, 150, 150, 255];
const QUIVER_ELECTRIC: Rgba = [31, 64, 220, 255];
const QUIVER_MAGNETIC: Rgba = [34, 139, 34, 255];
const CURVE_ELECTRIC: Rgba = [214, 39, 40, 255];
const CURVE_MAGNETIC: Rgba = [44, 160, 44, 255];

/// Fraction of each image side left blank around the plot area.
const MARGIN_FRACTION: f64 = 0.08;
/// Longest arrow as a fraction of the mesh cell size.
const ARROW_CELL_FRACTION: f64 = 0.9;
/// Arrow head length as a fraction of the arrow.
const ARROW_HEAD_FRACTION: f64 = 0.3;
/// Half-angle of the arrow head.
const ARROW_HEAD_ANGLE: f64 = 0.45;
/// Fixed vertical range for curve plots.
pub const CURVE_Y_RANGE: (f64, f64) = (-3.0, 3.0);
/// Largest accepted image side, in pixels.
pub const MAX_SIDE: usize = 16_384;
/// Largest accepted image area, in pixels (64 MiB of RGBA).
pub const MAX_PIXELS: usize = 1 << 24;

/// Color used for a field kind in the given plot style.
pub fn color_for(kind: FieldKind, quiver: bool) -> Rgba {
    match (kind, quiver) {
        (FieldKind::Electric, true) => QUIVER_ELECTRIC,
        (FieldKind::Magnetic, true) => QUIVER_MAGNETIC,
        (FieldKind::Electric, false) => CURVE_ELECTRIC,
        (FieldKind::Magnetic, false) => CURVE_MAGNETIC,
    }
}

/// Rasterizes `frame` (computed on `grid`) into a `width * height * 4` RGBA buffer.
///
/// Returns `InvalidDimensions` for a zero image size, a side above
/// [`MAX_SIDE`] or an area above [`MAX_PIXELS`], and
/// `GridMismatch` when the frame kind does not match the grid shape.
pub fn frame_to_rgba(
    grid: &SampleGrid,
    frame: &FrameResult,
    width: usize,
    height: usize,
) -> Result<Vec<u8>, FieldError> {
    let mut canvas = Canvas::new(width, height)?;
    match &frame.data {
        FrameData::Vectors { kind, vectors } => {
            let mesh = grid.as_mesh()?;
            draw_quiver(&mut canvas, mesh, *kind, vectors);
        }
        FrameData::Curves { curves } => {
            let line = grid.as_line()?;
            draw_curves(&mut canvas, line, curves);
        }
    }
    Ok(canvas.into_rgba())
}

fn draw_quiver(canvas: &mut Canvas, mesh: &MeshGrid, kind: FieldKind, vectors: &[DVec2]) {
    let (lo, hi) = mesh.bounds();
    let pad = DVec2::new(mesh.spacing_x(), mesh.spacing_y()) * 0.5;
    let pad = DVec2::new(
        if pad.x > 0.0 { pad.x } else { 1.0 },
        if pad.y > 0.0 { pad.y } else { 1.0 },
    );
    let view = Viewport::new(canvas, lo - pad, hi + pad);
    draw_grid_lines(canvas, &view);

    let cell = (pad * 2.0).min_element();
    let longest = vectors.iter().map(|v| v.length()).fold(0.0_f64, f64::max);
    if longest <= 0.0 || !longest.is_finite() {
        return;
    }
    let scale = ARROW_CELL_FRACTION * cell / longest;
    let color = color_for(kind, true);
    for (&p, &v) in mesh.points().iter().zip(vectors) {
        let tail = view.to_pixel(p);
        let tip = view.to_pixel(p + v * scale);
        draw_arrow(canvas, tail, tip, color);
    }
}

fn draw_curves(canvas: &mut Canvas, line: &LineGrid, curves: &[Curve]) {
    let (x0, x1) = line.bounds();
    let x1 = if x1 > x0 { x1 } else { x0 + 1.0 };
    let (y0, y1) = CURVE_Y_RANGE;
    let view = Viewport::new(canvas, DVec2::new(x0, y0), DVec2::new(x1, y1));
    draw_grid_lines(canvas, &view);

    for curve in curves {
        let color = color_for(curve.kind, false);
        let pixels: Vec<DVec2> = line
            .xs()
            .iter()
            .zip(&curve.values)
            .map(|(&x, &y)| view.to_pixel(DVec2::new(x, y)))
            .collect();
        for w in pixels.windows(2) {
            canvas.line(w[0], w[1], color);
        }
    }
}

/// Light lines at every integer coordinate, darker at zero.
fn draw_grid_lines(canvas: &mut Canvas, view: &Viewport) {
    let (lo, hi) = (view.lo, view.hi);
    for i in (lo.x.ceil() as i64)..=(hi.x.floor() as i64) {
        let color = if i == 0 { AXIS_LINE } else { GRID_LINE };
        let x = i as f64;
        canvas.line(
            view.to_pixel(DVec2::new(x, lo.y)),
            view.to_pixel(DVec2::new(x, hi.y)),
            color,
        );
    }
    for j in (lo.y.ceil() as i64)..=(hi.y.floor() as i64) {
        let color = if j == 0 { AXIS_LINE } else { GRID_LINE };
        let y = j as f64;
        canvas.line(
            view.to_pixel(DVec2::new(lo.x, y)),
            view.to_pixel(DVec2::new(hi.x, y)),
            color,
        );
    }
}

fn draw_arrow(canvas: &mut Canvas, tail: DVec2, tip: DVec2, color: Rgba) {
    canvas.line(tail, tip, color);
    let shaft = tip - tail;
    let len = shaft.length();
    if len < 2.0 {
        return;
    }
    let back = -shaft / len * (len * ARROW_HEAD_FRACTION);
    let rot = DVec2::from_angle(ARROW_HEAD_ANGLE);
    canvas.line(tip, tip + rot.rotate(back), color);
    canvas.line(tip, tip + DVec2::new(rot.x, -rot.y).rotate(back), color);
}

/// Maps data coordinates into the plot area of a canvas (y up).
struct Viewport {
    lo: DVec2,
    hi: DVec2,
    origin: DVec2,
    size: DVec2,
}

impl Viewport {
    fn new(canvas: &Canvas, lo: DVec2, hi: DVec2) -> Self {
        let w = canvas.width as f64;
        let h = canvas.height as f64;
        let margin = DVec2::new(w, h) * MARGIN_FRACTION;
        Self {
            lo,
            hi,
            origin: margin,
            size: DVec2::new(w, h) - margin * 2.0 - DVec2::ONE,
        }
    }

    fn to_pixel(&self, p: DVec2) -> DVec2 {
        let t = (p - self.lo) / (self.hi - self.lo);
        DVec2::new(
            self.origin.x + t.x * self.size.x,
            self.origin.y + (1.0 - t.y) * self.size.y,
        )
    }
}

/// Minimal RGBA8 raster with clipped line drawing.
struct Canvas {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(FieldError::InvalidDimensions);
        }
        let pixels = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_PIXELS)
            .ok_or(FieldError::InvalidDimensions)?;
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&BACKGROUND);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&color);
    }

    /// Bresenham line between two pixel positions; off-canvas pixels are skipped.
    fn line(&mut self, a: DVec2, b: DVec2, color: Rgba) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let limit = (self.width.max(self.height) * 4) as f64;
        let clamp = |v: f64| v.clamp(-limit, limit).round() as i64;
        let (mut x0, mut y0) = (clamp(a.x), clamp(a.y));
        let (x1, y1) = (clamp(b.x), clamp(b.y));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn into_rgba(self) -> Vec<u8> {
        self.data
    }
}
