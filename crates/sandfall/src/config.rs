//! Simulation settings, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::grid::Grid;

/// Probabilities driving the random parts of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Chance that a grain holds its row for one frame instead of falling.
    pub skip_chance: f64,
    /// Width of each pressure band: `[0, p)` drifts left, `[1 - p, 1)` drifts right.
    pub pressure_chance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            skip_chance: 0.2,
            pressure_chance: 0.1,
        }
    }
}

impl Rules {
    /// Rules with every random effect switched off. Grains fall one row per
    /// frame and only the deterministic parts of collapse remain.
    #[must_use]
    pub fn deterministic() -> Self {
        Self {
            skip_chance: 0.0,
            pressure_chance: 0.0,
        }
    }

    /// # Errors
    /// Returns [`SimError::InvalidProbability`] when a chance leaves `[0, 1]`
    /// or the pressure bands would overlap.
    pub fn validate(&self) -> Result<()> {
        check_probability("skip_chance", self.skip_chance)?;
        check_probability("pressure_chance", self.pressure_chance)?;
        if self.pressure_chance > 0.5 {
            return Err(SimError::InvalidProbability {
                name: "pressure_chance",
                value: self.pressure_chance,
            });
        }
        Ok(())
    }
}

/// Band of rows randomly filled with sand at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillBand {
    pub top: usize,
    pub bottom: usize,
    pub probability: f64,
}

impl Default for FillBand {
    fn default() -> Self {
        Self {
            top: 10,
            bottom: 90,
            probability: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub size: usize,
    pub rules: Rules,
    pub brush_radius: i32,
    pub max_brush_radius: i32,
    /// Fixed seed for the frame RNG. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    pub initial_fill: Option<FillBand>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 256,
            rules: Rules::default(),
            brush_radius: 16,
            max_brush_radius: 128,
            seed: None,
            initial_fill: Some(FillBand::default()),
        }
    }
}

impl SimConfig {
    /// Empty grid of `size` with default rules.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            initial_fill: None,
            ..Self::default()
        }
    }

    /// # Errors
    /// Returns [`SimError::Config`] on malformed JSON, or the validation error.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Fails on a zero or oversized grid, an out-of-range chance or brush radius.
    pub fn validate(&self) -> Result<()> {
        // Coordinates are i32 and the frame buffer holds four bytes per cell.
        let fits = i32::try_from(self.size).is_ok()
            && Grid::cell_count(self.size)
                .and_then(|cells| cells.checked_mul(4))
                .is_some();
        if self.size == 0 || !fits {
            return Err(SimError::InvalidSize { size: self.size });
        }
        self.rules.validate()?;
        if self.brush_radius < 1 {
            return Err(SimError::InvalidBrushRadius {
                radius: self.brush_radius,
            });
        }
        if self.max_brush_radius < self.brush_radius {
            return Err(SimError::Config(format!(
                "max_brush_radius {} is below brush_radius {}",
                self.max_brush_radius, self.brush_radius
            )));
        }
        if let Some(band) = &self.initial_fill {
            check_probability("initial_fill.probability", band.probability)?;
        }
        Ok(())
    }
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = SimConfig::default();
        assert_eq!(config.size, 256);
        assert_eq!(config.brush_radius, 16);
        assert_eq!(config.initial_fill, Some(FillBand::default()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = SimConfig::from_json(r#"{"size": 64, "rules": {"skip_chance": 0.3}}"#)
            .expect("valid json");
        assert_eq!(config.size, 64);
        assert!((config.rules.skip_chance - 0.3).abs() < f64::EPSILON);
        assert!((config.rules.pressure_chance - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = SimConfig::from_json(r#"{"size": 0}"#).unwrap_err();
        assert_eq!(err, SimError::InvalidSize { size: 0 });
    }

    #[test]
    fn oversized_grid_is_rejected() {
        for size in [usize::MAX, 1 << (usize::BITS / 2), i32::MAX as usize + 1] {
            assert_eq!(
                SimConfig::empty(size).validate(),
                Err(SimError::InvalidSize { size }),
                "size {size}"
            );
        }
        assert!(SimConfig::empty(4096).validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SimConfig::from_json("{size:").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn chances_outside_unit_interval_are_rejected() {
        let rules = Rules {
            skip_chance: -0.1,
            ..Rules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(SimError::InvalidProbability { name: "skip_chance", .. })
        ));

        let rules = Rules {
            skip_chance: 0.2,
            pressure_chance: 0.6,
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn brush_radius_must_fit_under_max() {
        let config = SimConfig {
            brush_radius: 0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimError::InvalidBrushRadius { radius: 0 })
        );

        let config = SimConfig {
            brush_radius: 40,
            max_brush_radius: 20,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
    }
}
