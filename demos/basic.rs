//! Standalone demo: opens a window with the color map picker and a button
//! that pushes the picked color to a logging pixel board.

use std::cell::RefCell;
use std::rc::Rc;

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_colormap::{
    color_map_picker_with, pixel_message, ColorSink, PickerConfig, PixelBoard, SinkError,
    SolidColor,
};

/// Prints every pixel message instead of talking to hardware.
struct LogSink;

impl ColorSink for LogSink {
    fn send(&mut self, index: u8, color: SolidColor) -> Result<(), SinkError> {
        log::info!("pixel {:?}", pixel_message(index, color));
        Ok(())
    }
}

fn main() {
    env_logger::init();

    let config = PickerConfig::default();
    let board = Rc::new(RefCell::new(PixelBoard::new(config.board_size)));
    let color = RwSignal::new(SolidColor::WHITE);
    if let Err(err) = board.borrow_mut().select(0, color.get_untracked()) {
        log::error!("{err}");
    }

    floem::Application::new()
        .window(
            move |_| {
                let picker = match color_map_picker_with(color, config.clone(), Some(board.clone())) {
                    Ok(picker) => picker.into_any(),
                    Err(err) => label(move || format!("invalid config: {err}")).into_any(),
                };
                let board = board.clone();
                v_stack((
                    picker,
                    label(|| "Send to all pixels").on_click_stop(move |_| {
                        let c = color.get_untracked();
                        if let Err(err) = board.borrow_mut().send_all(c, &mut LogSink) {
                            log::error!("send failed: {err}");
                        }
                    }),
                ))
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((300.0, 480.0))
                    .title("floem-colormap"),
            ),
        )
        .run();
}
