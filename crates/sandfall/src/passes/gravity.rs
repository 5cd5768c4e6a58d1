//! Gravity: contiguous runs of sand fall one row together.

use rand::Rng;

use crate::grid::Grid;

/// Scan each column bottom-up. A run of sand either rests where it is (on
/// the floor, or on sand in `current`) or moves down one row as a block.
/// With probability `skip_chance` a grain holds its row for this frame.
///
/// Only `current` decides whether a run rests, so columns see the frame-start
/// state even while `next` fills up.
pub(super) fn apply<R: Rng + ?Sized>(
    current: &Grid,
    next: &mut Grid,
    visited: &mut Grid,
    skip_chance: f64,
    rng: &mut R,
) -> usize {
    let n = current.size as i32;
    let mut fallen = 0;

    for x in 0..n {
        for y in (0..n).rev() {
            if !current.get(x, y) || visited.get(x, y) {
                continue;
            }

            if rng.random::<f64>() < skip_chance {
                visited.set(x, y, true);
                next.set(x, y, true);
                continue;
            }

            let resting = y == n - 1 || current.get(x, y + 1);
            let drop = i32::from(!resting);
            let mut top = y;
            while current.get(x, top) {
                visited.set(x, top, true);
                next.set(x, top + drop, true);
                top -= 1;
            }
            if !resting {
                fallen += (y - top) as usize;
            }
        }
    }
    fallen
}
