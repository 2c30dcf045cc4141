//! Sizing, timing, and styling constants for the picker.

use std::time::Duration;

/// Side length of the wheel raster, in pixels
pub const WHEEL_RASTER_SIZE: u32 = 1000;

/// Largest accepted wheel raster side
pub const MAX_WHEEL_RASTER_SIZE: u32 = 8192;

/// Lightness the wheel raster is drawn at
pub const REFERENCE_LIGHTNESS: f64 = 0.5;

/// Quiescence window before a color counts as settled
pub const SETTLE_WINDOW: Duration = Duration::from_secs(1);

/// Longest accepted quiescence window
pub const MAX_SETTLE_WINDOW: Duration = Duration::from_secs(60);

/// Number of recent colors kept in the palette
pub const PALETTE_CAPACITY: usize = 8;

/// Number of addressed pixels on the clock face
pub const BOARD_SIZE: usize = 64;

/// 1D slider track width (the lightness slider is vertical)
#[cfg(feature = "view")]
pub const SLIDER_WIDTH: f32 = 16.0;

/// Thumb indicator radius on the wheel
#[cfg(feature = "view")]
pub const CURSOR_RADIUS: f64 = 8.0;

/// Thumb radius on 1D sliders
#[cfg(feature = "view")]
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for swatches
#[cfg(feature = "view")]
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
#[cfg(feature = "view")]
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
#[cfg(feature = "view")]
pub const PADDING: f32 = 8.0;

/// Palette swatch side
#[cfg(feature = "view")]
pub const SWATCH_SIZE: f32 = 20.0;

/// Label font size
#[cfg(feature = "view")]
pub const LABEL_FONT: f32 = 11.0;
