//! RGBA frame output for presenters (canvas `ImageData`, texture upload).

use crate::error::{Result, SimError};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 4],
    pub sand: [u8; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [230, 241, 254, 255],
            sand: [221, 132, 59, 255],
        }
    }
}

/// Bytes needed to render a `size`×`size` grid.
#[must_use]
pub fn rgba_len(size: usize) -> usize {
    size * size * 4
}

/// Write one RGBA pixel per cell into `out`, row-major.
///
/// # Errors
/// Returns [`SimError::BufferSize`] unless `out` holds exactly [`rgba_len`] bytes.
pub fn render_rgba(grid: &Grid, palette: &Palette, out: &mut [u8]) -> Result<()> {
    let expected = rgba_len(grid.size);
    if out.len() != expected {
        return Err(SimError::BufferSize {
            expected,
            actual: out.len(),
        });
    }
    for (pixel, &occupied) in out.chunks_exact_mut(4).zip(&grid.cells) {
        pixel.copy_from_slice(if occupied {
            &palette.sand
        } else {
            &palette.background
        });
    }
    Ok(())
}
