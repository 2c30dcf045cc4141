//! Row of recent-color swatches.
//!
//! Each slot shows the palette entry at its index, or an empty outline. A
//! click activates the entry, which writes its color into the bound signal.

use std::cell::RefCell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet};

use crate::color::SolidColor;
use crate::constants;
use crate::palette::PaletteHistory;

fn swatch(
    index: usize,
    colors: RwSignal<Vec<SolidColor>>,
    history: Rc<RefCell<PaletteHistory>>,
) -> impl IntoView {
    empty()
        .style(move |s| {
            let s = s
                .size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                .border_radius(constants::RADIUS)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200));
            match colors.get().get(index) {
                Some(c) => {
                    let (r, g, b) = c.to_rgb();
                    s.background(Color::rgb8(r, g, b))
                        .cursor(floem::style::CursorStyle::Pointer)
                }
                None => s,
            }
        })
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            // Clone out first: activation writes the bound color, and that
            // must not happen while the history is borrowed.
            let entry = history.borrow().get(index).cloned();
            if let Some(entry) = entry {
                entry.activate();
            }
        })
}

/// Creates the palette row with `capacity` slots.
pub(crate) fn palette_row(
    colors: RwSignal<Vec<SolidColor>>,
    history: Rc<RefCell<PaletteHistory>>,
    capacity: usize,
) -> impl IntoView {
    h_stack_from_iter((0..capacity).map(move |i| swatch(i, colors, history.clone())))
        .style(|s| s.gap(constants::GAP / 2.0).items_center().justify_center())
}
