//! Construction parameters for the color map.

use std::time::Duration;

use thiserror::Error;

use crate::constants;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("wheel side must be at least 1 pixel")]
    EmptyWheel,
    #[error("wheel side {0} exceeds {max} pixels", max = constants::MAX_WHEEL_RASTER_SIZE)]
    WheelTooLarge(u32),
    #[error("reference lightness {0} is outside 0.0–1.0")]
    LightnessOutOfRange(f64),
    #[error("palette capacity must be at least 1")]
    EmptyPalette,
    #[error("settle window must be non-zero")]
    ZeroSettleWindow,
    #[error("settle window {0:?} exceeds {max:?}", max = constants::MAX_SETTLE_WINDOW)]
    SettleWindowTooLong(Duration),
    #[error("pixel board size {0} exceeds the 256 addressable units")]
    BoardTooLarge(usize),
}

/// Everything fixed when the control is created.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    /// Wheel raster side, in pixels.
    pub side: u32,
    /// Lightness the wheel raster is drawn at.
    pub reference_lightness: f64,
    /// How long a color must stay unchanged before it enters the palette.
    pub settle_window: Duration,
    pub palette_capacity: usize,
    /// Addressed units on the downstream device.
    pub board_size: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            side: constants::WHEEL_RASTER_SIZE,
            reference_lightness: constants::REFERENCE_LIGHTNESS,
            settle_window: constants::SETTLE_WINDOW,
            palette_capacity: constants::PALETTE_CAPACITY,
            board_size: constants::BOARD_SIZE,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side == 0 {
            return Err(ConfigError::EmptyWheel);
        }
        if self.side > constants::MAX_WHEEL_RASTER_SIZE {
            return Err(ConfigError::WheelTooLarge(self.side));
        }
        if !(0.0..=1.0).contains(&self.reference_lightness) {
            return Err(ConfigError::LightnessOutOfRange(self.reference_lightness));
        }
        if self.palette_capacity == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        if self.settle_window.is_zero() {
            return Err(ConfigError::ZeroSettleWindow);
        }
        if self.settle_window > constants::MAX_SETTLE_WINDOW {
            return Err(ConfigError::SettleWindowTooLong(self.settle_window));
        }
        if self.board_size > 256 {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PickerConfig::default();
        assert_eq!(config.side, 1000);
        assert_eq!(config.palette_capacity, 8);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = PickerConfig {
            side: 0,
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::EmptyWheel));

        let bad = PickerConfig {
            reference_lightness: 1.5,
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::LightnessOutOfRange(1.5)));

        let bad = PickerConfig {
            board_size: 300,
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::BoardTooLarge(300)));
    }

    #[test]
    fn test_rejects_oversized_limits() {
        let bad = PickerConfig {
            settle_window: Duration::MAX,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::SettleWindowTooLong(Duration::MAX))
        );

        let bad = PickerConfig {
            side: 40_000,
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::WheelTooLarge(40_000)));

        let edge = PickerConfig {
            side: constants::MAX_WHEEL_RASTER_SIZE,
            settle_window: constants::MAX_SETTLE_WINDOW,
            ..Default::default()
        };
        assert_eq!(edge.validate(), Ok(()));
    }
}
