//! Pressure relief: grains with air beneath them occasionally slip sideways.

use rand::Rng;

use crate::grid::Grid;

/// Nudge unsupported grains one column left or right into empty cells.
/// A draw below `chance` tries left, a draw at or above `1 - chance` tries
/// right. Grains resting on something never move here.
pub(super) fn apply<R: Rng + ?Sized>(next: &mut Grid, chance: f64, rng: &mut R) -> usize {
    let n = next.size as i32;
    let mut drifted = 0;

    for x in 0..n {
        for y in 0..n - 1 {
            if !next.get(x, y) || next.get(x, y + 1) {
                continue;
            }

            let r: f64 = rng.random();
            let dx = if r < chance && x > 0 && !next.get(x - 1, y) {
                -1
            } else if r >= 1.0 - chance && x < n - 1 && !next.get(x + 1, y) {
                1
            } else {
                continue;
            };
            next.set(x, y, false);
            next.set(x + dx, y, true);
            drifted += 1;
        }
    }
    drifted
}
