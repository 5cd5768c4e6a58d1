//! Circular sand brush and pointer mapping.

use crate::error::{Result, SimError};
use crate::grid::Grid;

/// Fill every in-bounds cell with `dx² + dy² < radius²` around `(cx, cy)`.
/// Never clears a cell. The center may lie off the grid.
///
/// Returns how many cells went from empty to sand.
///
/// # Errors
/// Returns [`SimError::InvalidBrushRadius`] when `radius < 1`.
pub fn apply_brush(grid: &mut Grid, cx: i32, cy: i32, radius: i32) -> Result<usize> {
    if radius < 1 {
        return Err(SimError::InvalidBrushRadius { radius });
    }
    let last = grid.size as i64 - 1;
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let r2 = r * r;

    // Only offsets strictly inside the radius can pass the distance test.
    let x_span = (cx - r + 1).max(0)..=(cx + r - 1).min(last);
    let y_span = (cy - r + 1).max(0)..=(cy + r - 1).min(last);

    let mut painted = 0;
    for y in y_span {
        let dy = y - cy;
        for x in x_span.clone() {
            let dx = x - cx;
            if dx * dx + dy * dy >= r2 {
                continue;
            }
            let cell = &mut grid.cells[y as usize * grid.size + x as usize];
            if !*cell {
                *cell = true;
                painted += 1;
            }
        }
    }
    Ok(painted)
}

/// Brush radius adjusted by scroll input, kept within `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushRadius {
    radius: i32,
    max: i32,
}

impl BrushRadius {
    /// # Errors
    /// Returns [`SimError::InvalidBrushRadius`] when `radius` is below 1 or above `max`.
    pub fn new(radius: i32, max: i32) -> Result<Self> {
        if radius < 1 || radius > max {
            return Err(SimError::InvalidBrushRadius { radius });
        }
        Ok(Self { radius, max })
    }

    #[must_use]
    pub fn get(self) -> i32 {
        self.radius
    }

    /// Grow or shrink by `delta`, returning the new radius.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.radius = self.radius.saturating_add(delta).clamp(1, self.max);
        self.radius
    }
}

/// Map a pointer position in a `width`×`height` window onto grid coordinates.
/// Positions outside the window map outside the grid; the brush skips them.
///
/// # Errors
/// Returns [`SimError::InvalidWindow`] when either window dimension is zero.
pub fn window_to_grid(px: i32, py: i32, width: u32, height: u32, size: usize) -> Result<(i32, i32)> {
    if width == 0 || height == 0 {
        return Err(SimError::InvalidWindow { width, height });
    }
    let scale = |p: i32, extent: u32| {
        let scaled = (i64::from(p) * size as i64).div_euclid(i64::from(extent));
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };
    Ok((scale(px, width), scale(py, height)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn brush_paints_open_disc() {
        let mut grid = Grid::new(10);
        let painted = apply_brush(&mut grid, 5, 5, 3).unwrap();

        let mut expected = 0;
        for y in 0..10i32 {
            for x in 0..10i32 {
                let (dx, dy) = (x - 5, y - 5);
                let inside = dx * dx + dy * dy < 9;
                assert_eq!(grid.get(x, y), inside, "cell ({x}, {y})");
                expected += usize::from(inside);
            }
        }
        assert_eq!(painted, expected);
        // offsets -2..=2 on both axes; (±3, 0) sits exactly on the radius
        assert_eq!(painted, 25);
    }

    #[test]
    fn brush_never_clears() {
        let mut grid = Grid::new(10);
        grid.cells.fill(true);
        assert_eq!(apply_brush(&mut grid, 5, 5, 4).unwrap(), 0);
        assert_eq!(grid.count(), 100);
    }

    #[test]
    fn radius_one_paints_only_center() {
        let mut grid = Grid::new(10);
        assert_eq!(apply_brush(&mut grid, 0, 9, 1).unwrap(), 1);
        assert!(grid.get(0, 9));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let mut grid = Grid::new(10);
        assert_eq!(
            apply_brush(&mut grid, 5, 5, 0),
            Err(SimError::InvalidBrushRadius { radius: 0 })
        );
        assert!(apply_brush(&mut grid, 5, 5, -3).is_err());
        assert_eq!(grid.count(), 0);
    }

    #[test]
    fn brush_radius_clamps_on_adjust() {
        let mut brush = BrushRadius::new(16, 20).unwrap();
        assert_eq!(brush.adjust(10), 20);
        assert_eq!(brush.adjust(-100), 1);
        assert_eq!(brush.adjust(i32::MIN), 1);
        assert_eq!(brush.adjust(2), 3);
        assert!(BrushRadius::new(0, 20).is_err());
        assert!(BrushRadius::new(21, 20).is_err());
    }

    #[test]
    fn window_scaling_matches_grid() {
        assert_eq!(window_to_grid(0, 0, 1024, 1024, 256), Ok((0, 0)));
        assert_eq!(window_to_grid(1023, 512, 1024, 1024, 256), Ok((255, 128)));
        assert_eq!(window_to_grid(-4, 2048, 1024, 1024, 256), Ok((-1, 512)));
        assert_eq!(
            window_to_grid(1, 1, 0, 768, 256),
            Err(SimError::InvalidWindow { width: 0, height: 768 })
        );
    }

    proptest! {
        #[test]
        fn prop_brush_stays_in_bounds_and_inside_radius(
            cx in -2000i32..2000,
            cy in -2000i32..2000,
            radius in 1i32..3000,
        ) {
            let mut grid = Grid::new(32);
            let painted = apply_brush(&mut grid, cx, cy, radius).unwrap();
            prop_assert_eq!(grid.cells.len(), 32 * 32);
            prop_assert_eq!(grid.count(), painted);

            let r2 = i64::from(radius) * i64::from(radius);
            for y in 0..32i32 {
                for x in 0..32i32 {
                    let dx = i64::from(x - cx);
                    let dy = i64::from(y - cy);
                    prop_assert_eq!(grid.get(x, y), dx * dx + dy * dy < r2);
                }
            }
        }
    }
}
