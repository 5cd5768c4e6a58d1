//! Slope collapse: tall unsupported stacks shed their top grain sideways.

use rand::Rng;

use crate::grid::Grid;
use crate::order::ColumnOrder;
use crate::slope::max_slope;

/// For every vertical pair of grains, measure the drop on each side. If
/// either drop exceeds the positional tolerance, the upper grain moves one
/// column toward the open side. A wall (drop 0) forces the other side;
/// otherwise a coin flip picks. Columns are visited in `order`.
pub(super) fn apply<R: Rng + ?Sized>(next: &mut Grid, order: &ColumnOrder, rng: &mut R) -> usize {
    let n = next.size as i32;
    let mut collapsed = 0;

    for x in order.iter() {
        let x = x as i32;
        for y in 0..n - 1 {
            if !(next.get(x, y) && next.get(x, y + 1)) {
                continue;
            }

            let left = drop_beside(next, x - 1, y);
            let right = drop_beside(next, x + 1, y);
            let max = max_slope(i64::from(x), i64::from(y));
            if left <= max && right <= max {
                continue;
            }

            let dx = if left == 0 {
                1
            } else if right == 0 || !rng.random_bool(0.5) {
                -1
            } else {
                1
            };
            if !next.in_bounds(x + dx, y) {
                continue;
            }
            next.set(x, y, false);
            next.set(x + dx, y, true);
            collapsed += 1;
        }
    }
    collapsed
}

/// Empty cells in column `x` from row `y` down to the first grain or the floor.
/// Zero off the grid.
fn drop_beside(grid: &Grid, x: i32, y: i32) -> usize {
    if !grid.in_bounds(x, y) {
        return 0;
    }
    (y..grid.size as i32).take_while(|&j| !grid.get(x, j)).count()
}
