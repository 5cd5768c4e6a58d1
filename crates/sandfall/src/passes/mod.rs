//! Per-frame update passes, run in a fixed order by [`advance_frame`].
//!
//! Gravity reads the frame-start grid and writes the next grid. Pressure and
//! collapse then rework the next grid in place and never look back at the
//! frame-start grid.

mod collapse;
mod gravity;
mod pressure;

use rand::Rng;

use crate::config::Rules;
use crate::grid::Grid;
use crate::order::ColumnOrder;

/// What moved during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Grains that dropped one row.
    pub fallen: usize,
    /// Grains pushed sideways by pressure relief.
    pub drifted: usize,
    /// Stack tops knocked sideways by slope collapse.
    pub collapsed: usize,
}

/// Compute the next grid from `current`. `next` and `visited` are scratch
/// buffers of the same size; both are cleared before use.
pub fn advance_frame<R: Rng + ?Sized>(
    current: &Grid,
    next: &mut Grid,
    visited: &mut Grid,
    order: &ColumnOrder,
    rules: &Rules,
    rng: &mut R,
) -> FrameStats {
    debug_assert_eq!(current.size, next.size);
    debug_assert_eq!(current.size, visited.size);
    debug_assert_eq!(current.size, order.len());

    next.clear();
    visited.clear();

    let fallen = gravity::apply(current, next, visited, rules.skip_chance, rng);
    let drifted = pressure::apply(next, rules.pressure_chance, rng);
    let collapsed = collapse::apply(next, order, rng);

    FrameStats {
        fallen,
        drifted,
        collapsed,
    }
}

/// RNG that returns the same word forever. `FixedRng(0)` draws 0.0 and
/// `FixedRng(u64::MAX)` draws just under 1.0.
#[cfg(test)]
pub(crate) struct FixedRng(pub u64);

#[cfg(test)]
impl rand::RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(self.0 as u8);
    }
}
