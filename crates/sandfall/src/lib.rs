//! Falling sand cellular automaton.
//!
//! A square grid of binary cells (sand or empty) advances one frame at a
//! time through three passes: gravity, pressure relief and slope collapse.
//! [`GridState`] owns the buffers; [`Universe`] wraps it for a browser host.

pub mod brush;
pub mod config;
pub mod error;
pub mod grid;
pub mod order;
pub mod passes;
pub mod render;
pub mod slope;
pub mod state;

pub use config::{FillBand, Rules, SimConfig};
pub use error::{Result, SimError};
pub use grid::Grid;
pub use order::ColumnOrder;
pub use passes::FrameStats;
pub use slope::max_slope;
pub use state::GridState;

use brush::BrushRadius;
use render::Palette;
use wasm_bindgen::prelude::*;

/// Browser-facing handle: simulation state, brush, and an RGBA frame buffer
/// the host reads straight out of wasm memory.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    state: GridState,
    brush: BrushRadius,
    palette: Palette,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl Universe {
    /// Empty grid of `size` with default rules.
    ///
    /// # Errors
    /// Fails when `size` is zero or too large to allocate.
    #[wasm_bindgen(constructor)]
    pub fn new(size: u32) -> Result<Universe, JsError> {
        Ok(Self::from_config(&SimConfig::empty(size as usize))?)
    }

    /// Build from a JSON [`SimConfig`]; missing fields take their defaults.
    ///
    /// # Errors
    /// Fails on malformed JSON or a config that does not validate.
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<Universe, JsError> {
        Ok(Self::from_config(&SimConfig::from_json(json)?)?)
    }

    /// Paint at grid coordinates with the current brush radius.
    ///
    /// # Errors
    /// Fails only if the brush radius is below 1, which [`BrushRadius`] prevents.
    pub fn paint(&mut self, x: i32, y: i32) -> Result<u32, JsError> {
        Ok(self.state.apply_brush(x, y, self.brush.get())? as u32)
    }

    /// Paint at a pointer position inside a `width`×`height` canvas.
    ///
    /// # Errors
    /// Fails when the canvas has a zero dimension.
    #[wasm_bindgen(js_name = paintWindow)]
    pub fn paint_window(&mut self, px: i32, py: i32, width: u32, height: u32) -> Result<u32, JsError> {
        let (x, y) = brush::window_to_grid(px, py, width, height, self.state.size())?;
        self.paint(x, y)
    }

    /// Grow or shrink the brush, e.g. on scroll. Returns the new radius.
    #[wasm_bindgen(js_name = adjustBrush)]
    pub fn adjust_brush(&mut self, delta: i32) -> i32 {
        self.brush.adjust(delta)
    }

    #[must_use]
    #[wasm_bindgen(js_name = brushRadius)]
    pub fn brush_radius(&self) -> i32 {
        self.brush.get()
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.state.advance();
    }

    /// # Errors
    /// Fails when `(x, y)` lies outside the grid.
    #[wasm_bindgen(js_name = isOccupied)]
    pub fn is_occupied(&self, x: i32, y: i32) -> Result<bool, JsError> {
        Ok(self.state.is_occupied(x, y)?)
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.state.size() as u32
    }

    #[must_use]
    #[wasm_bindgen(js_name = occupiedCount)]
    pub fn occupied_count(&self) -> u32 {
        self.state.occupied_count() as u32
    }

    /// Redraw the frame buffer from the current grid.
    ///
    /// # Errors
    /// Fails if the frame buffer no longer matches the grid size.
    pub fn render(&mut self) -> Result<(), JsError> {
        render::render_rgba(self.state.current(), &self.palette, &mut self.pixels)?;
        Ok(())
    }

    #[must_use]
    #[wasm_bindgen(js_name = pixelsPtr)]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    #[must_use]
    #[wasm_bindgen(js_name = pixelsLen)]
    pub fn pixels_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Universe {
    /// # Errors
    /// Any configuration error from [`GridState::with_config`] or the brush limits.
    pub fn from_config(config: &SimConfig) -> Result<Universe, SimError> {
        let state = GridState::with_config(config)?;
        let brush = BrushRadius::new(config.brush_radius, config.max_brush_radius)?;
        let pixels = vec![0; render::rgba_len(state.size())];
        Ok(Self {
            state,
            brush,
            palette: Palette::default(),
            pixels,
        })
    }

    #[must_use]
    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
