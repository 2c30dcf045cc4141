//! Picker panel: color map, lightness slider, readout and recent colors.
//!
//! Also wires the palette's settle timer to floem's timers and feeds the
//! optional pixel board.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use floem::action::{exec_after, TimerToken};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::SolidColor;
use crate::color_map::{color_map, MapSignals};
use crate::config::PickerConfig;
use crate::constants;
use crate::inputs::{color_swatch, copy_button, hex_readout};
use crate::lightness_slider::lightness_slider;
use crate::palette::PaletteHistory;
use crate::palette_view::palette_row;
use crate::sink::PixelBoard;

/// Cancel the timer held in `slot`, if any, and hold the one `schedule`
/// starts instead. At most one timer is outstanding.
fn rearm<T>(slot: &Cell<Option<T>>, cancel: impl FnOnce(T), schedule: impl FnOnce() -> T) {
    if let Some(previous) = slot.take() {
        cancel(previous);
    }
    slot.set(Some(schedule()));
}

/// Record settled values of `color` into `history` and mirror the list into
/// `colors` for the swatch row.
fn track_palette(
    color: RwSignal<SolidColor>,
    history: Rc<RefCell<PaletteHistory>>,
    colors: RwSignal<Vec<SolidColor>>,
) {
    let window = history.borrow().settle_window();
    let timer: Rc<Cell<Option<TimerToken>>> = Rc::new(Cell::new(None));
    create_effect(move |_| {
        let c = color.get();
        let ticket = history.borrow_mut().observe(c, Instant::now());
        let history = history.clone();
        let slot = timer.clone();
        rearm(&timer, TimerToken::cancel, move || {
            exec_after(window, move |_| {
                slot.set(None);
                let recorded = history.borrow_mut().fire(ticket);
                if recorded {
                    colors.set(history.borrow().colors());
                }
            })
        });
    });
}

/// Builds the picker panel around `color`.
pub(crate) fn picker(
    color: RwSignal<SolidColor>,
    config: PickerConfig,
    board: Option<Rc<RefCell<PixelBoard>>>,
) -> impl IntoView {
    let signals = MapSignals {
        color,
        lightness: RwSignal::new(color.get_untracked().to_hsl().l),
        preview: RwSignal::new(SolidColor::from_rgb(255, 0, 0)),
        writer: Rc::new(Cell::new(None)),
    };

    let history = Rc::new(RefCell::new(PaletteHistory::new(
        config.palette_capacity,
        config.settle_window,
        move |c| color.set(c),
    )));
    let palette_colors = RwSignal::new(Vec::new());
    track_palette(color, history.clone(), palette_colors);

    if let Some(board) = board {
        create_effect(move |_| {
            let c = color.get();
            board.borrow_mut().color_changed(c);
        });
    }

    let lightness = signals.lightness;
    let preview = signals.preview;
    let capacity = config.palette_capacity;

    v_stack((
        h_stack((
            color_map(signals, &config),
            lightness_slider(lightness, preview).style(|s| s.height_full()),
        ))
        .style(|s| s.gap(constants::GAP).margin_top(12.0)),
        h_stack((
            color_swatch(color, 32.0),
            empty().style(|s| s.flex_grow(1.0)),
            hex_readout(color),
            copy_button(move || format!("#{}", color.get_untracked().to_hex())),
        ))
        .style(|st| st.gap(constants::GAP).items_center().margin_horiz(8.0)),
        palette_row(palette_colors, history, capacity),
    ))
    .style(|st| {
        st.gap(constants::GAP)
            .padding_horiz(constants::PADDING)
            .padding_bottom(constants::PADDING)
            .padding_top(2.0)
            .size_full()
            .justify_center()
            .background(Color::rgb8(242, 242, 242))
    })
}
