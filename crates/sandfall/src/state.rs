//! Simulation state owned by the caller and threaded through every frame.

use std::ops::Range;

use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::brush;
use crate::config::{check_probability, Rules, SimConfig};
use crate::error::{Result, SimError};
use crate::grid::Grid;
use crate::order::ColumnOrder;
use crate::passes::{self, FrameStats};

/// Double-buffered sand grid plus the scratch and randomness a frame needs.
///
/// All buffers are allocated once in the constructor and reused every frame.
#[derive(Debug)]
pub struct GridState {
    current: Grid,
    next: Grid,
    visited: Grid,
    order: ColumnOrder,
    rules: Rules,
    rng: Pcg32,
    frame: u64,
}

impl GridState {
    /// Empty `size`×`size` grid with default rules and a random seed.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidSize`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_config(&SimConfig::empty(size))
    }

    /// Build from a validated config and apply its startup fill band.
    ///
    /// # Errors
    /// Any [`SimConfig::validate`] failure.
    pub fn with_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let size = config.size;
        let order = ColumnOrder::shuffled(size, &mut rng);
        debug!("sand grid {size}x{size}, seed {seed}");

        let mut state = Self {
            current: Grid::new(size),
            next: Grid::new(size),
            visited: Grid::new(size),
            order,
            rules: config.rules,
            rng,
            frame: 0,
        };
        if let Some(band) = config.initial_fill {
            let seeded = state.seed_region(band.top..band.bottom, 0..size, band.probability)?;
            debug!("seeded {seeded} grains in rows {}..{}", band.top, band.bottom);
        }
        Ok(state)
    }

    /// Replace the visiting order, e.g. to pin it in tests.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidColumnOrder`] when the order does not cover
    /// exactly this grid's columns.
    pub fn set_column_order(&mut self, order: ColumnOrder) -> Result<()> {
        if order.len() != self.size() {
            return Err(SimError::InvalidColumnOrder { size: self.size() });
        }
        self.order = order;
        Ok(())
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.current.size
    }

    #[must_use]
    pub fn current(&self) -> &Grid {
        &self.current
    }

    #[must_use]
    pub fn column_order(&self) -> &ColumnOrder {
        &self.order
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Frames advanced since creation or the last reset.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.current.count()
    }

    /// # Errors
    /// Returns [`SimError::OutOfBounds`] outside the grid.
    pub fn is_occupied(&self, x: i32, y: i32) -> Result<bool> {
        if !self.current.in_bounds(x, y) {
            return Err(SimError::OutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                size: self.size(),
            });
        }
        Ok(self.current.get(x, y))
    }

    /// Fill each cell in `rows`×`cols` with sand with the given probability.
    /// Ranges are clipped to the grid. Returns how many cells became sand.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidProbability`] outside `[0, 1]`.
    pub fn seed_region(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        probability: f64,
    ) -> Result<usize> {
        check_probability("probability", probability)?;
        let size = self.size();
        let mut seeded = 0;
        for y in rows.start.min(size)..rows.end.min(size) {
            for x in cols.start.min(size)..cols.end.min(size) {
                if self.rng.random_bool(probability) {
                    let cell = &mut self.current.cells[y * size + x];
                    seeded += usize::from(!*cell);
                    *cell = true;
                }
            }
        }
        Ok(seeded)
    }

    /// Paint sand with a circular brush. See [`brush::apply_brush`].
    ///
    /// # Errors
    /// Returns [`SimError::InvalidBrushRadius`] when `radius < 1`.
    pub fn apply_brush(&mut self, cx: i32, cy: i32, radius: i32) -> Result<usize> {
        brush::apply_brush(&mut self.current, cx, cy, radius)
    }

    /// Run one frame: gravity, pressure relief and slope collapse, then adopt
    /// the result as the current grid.
    pub fn advance(&mut self) -> FrameStats {
        let stats = passes::advance_frame(
            &self.current,
            &mut self.next,
            &mut self.visited,
            &self.order,
            &self.rules,
            &mut self.rng,
        );
        std::mem::swap(&mut self.current, &mut self.next);
        self.frame += 1;
        trace!(
            "frame {}: {} grains, fallen {} drifted {} collapsed {}",
            self.frame,
            self.current.count(),
            stats.fallen,
            stats.drifted,
            stats.collapsed
        );
        stats
    }

    /// Empty the grid and draw a fresh column order.
    pub fn reset(&mut self) {
        self.current.clear();
        self.next.clear();
        self.visited.clear();
        self.order.reshuffle(&mut self.rng);
        self.frame = 0;
        info!("sand grid reset");
    }

    /// Restart the frame RNG from `seed`. The column order is left alone.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }
}
