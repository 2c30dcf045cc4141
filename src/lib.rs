//! # floem-colormap
//!
//! An HSL color wheel for [Floem](https://github.com/lapce/floem).
//!
//! Pick hue and saturation on a disc, lightness on a vertical slider, and
//! reuse recent colors from a small palette. The picked color is a two-way
//! binding: writing the signal moves the wheel's indicator, and dragging on
//! the wheel writes the signal.
//!
//! The wheel logic itself ([`BindingCoordinator`], [`PointerMapper`],
//! [`PaletteHistory`], the rasterizer) has no Floem dependency and is
//! available with `default-features = false`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_colormap::{color_map_picker, SolidColor};
//!
//! let color = RwSignal::new(SolidColor::from_hex("3B82F6").unwrap());
//! // Use `color_map_picker(color)` in your Floem view tree.
//! ```

mod color;

pub mod binding;
pub mod config;
pub mod debounce;
pub mod mapper;
pub mod math;
pub mod palette;
pub mod sink;
pub mod wheel_raster;

mod constants;

#[cfg(feature = "view")]
mod color_map;
#[cfg(feature = "view")]
mod inputs;
#[cfg(feature = "view")]
mod lightness_slider;
#[cfg(feature = "view")]
mod palette_view;
#[cfg(feature = "view")]
mod picker;

pub use binding::{BindingCoordinator, ColorChange, PointerDrag, PointerId, UpdateSource};
pub use color::{Hsl, SolidColor};
pub use config::{ConfigError, PickerConfig};
pub use debounce::{Debouncer, Ticket};
pub use mapper::{PointerMapper, WheelPosition};
pub use palette::{PaletteEntry, PaletteHistory};
pub use sink::{pixel_message, ColorSink, PixelBoard, SinkError};
pub use wheel_raster::{rasterize_wheel, RenderError, RenderJob, WheelBitmap};

#[cfg(feature = "view")]
pub use view::*;

#[cfg(feature = "view")]
mod view {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Once;

    use floem::prelude::*;
    use floem::reactive::RwSignal;
    use floem::text::FONT_SYSTEM;

    use crate::color::SolidColor;
    use crate::config::{ConfigError, PickerConfig};
    use crate::sink::PixelBoard;

    static LOAD_LUCIDE_FONT: Once = Once::new();

    fn load_icon_font() {
        LOAD_LUCIDE_FONT.call_once(|| {
            FONT_SYSTEM
                .lock()
                .db_mut()
                .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
        });
    }

    /// Creates the color map picker with default settings.
    ///
    /// The picker reads from and writes to `color`. Any external changes to the
    /// signal are reflected in the UI, and user edits update the signal.
    pub fn color_map_picker(color: RwSignal<SolidColor>) -> impl IntoView {
        load_icon_font();
        crate::picker::picker(color, PickerConfig::default(), None)
    }

    /// Creates the color map picker with `config`, optionally driving a
    /// pixel board whose selected pixel follows the picked color.
    pub fn color_map_picker_with(
        color: RwSignal<SolidColor>,
        config: PickerConfig,
        board: Option<Rc<RefCell<PixelBoard>>>,
    ) -> Result<impl IntoView, ConfigError> {
        config.validate()?;
        load_icon_font();
        Ok(crate::picker::picker(color, config, board))
    }
}
