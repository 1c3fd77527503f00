//! PNG rendering of a computed frame.
//!
//! This module is feature-gated behind `png` (default on) so that hosts that
//! blit pixels themselves can depend on this crate without pulling in the
//! `image` crate. The rasterization itself lives in [`crate::plot`] (always
//! available).

use maxwell_core::error::FieldError;
use maxwell_core::frame::FrameResult;
use maxwell_core::grid::SampleGrid;
use std::path::Path;

use crate::plot::frame_to_rgba;

/// Rasterizes `frame` at `width × height` and writes it as a PNG image.
///
/// Returns `FieldError::InvalidDimensions` if the size is zero or exceeds the
/// rasterizer limits, or `FieldError::Io` on write failure.
pub fn write_png(
    grid: &SampleGrid,
    frame: &FrameResult,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), FieldError> {
    let w = u32::try_from(width).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| FieldError::InvalidDimensions)?;
    let rgba = frame_to_rgba(grid, frame, width, height)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::debug!("wrote frame {} to {}", frame.frame_index, path.display());
    Ok(())
}
