//! Downstream consumers of the picked color.
//!
//! The device on the other end is a grid of addressed pixels. A [`PixelBoard`]
//! mirrors that grid: one pixel can be selected to follow the picked color,
//! and the whole board can be pushed through a [`ColorSink`]. How the bytes
//! travel (serial, Firmata sysex, anything else) is the sink's business.

use thiserror::Error;

use crate::color::SolidColor;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("pixel index {index} is outside a board of {size}")]
    OutOfRange { index: usize, size: usize },
    #[error("sink is not connected")]
    Disconnected,
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepts one RGB triple per addressed unit.
pub trait ColorSink {
    fn send(&mut self, index: u8, color: SolidColor) -> Result<(), SinkError>;

    /// Called after a batch of sends.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Wire payload for one pixel: `[R, G, B, index]`. Alpha is not sent.
pub fn pixel_message(index: u8, color: SolidColor) -> [u8; 4] {
    let (r, g, b) = color.to_rgb();
    [r, g, b, index]
}

/// Colors of every addressed pixel, plus the one following the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBoard {
    pixels: Vec<SolidColor>,
    selected: Option<usize>,
}

impl PixelBoard {
    /// A board of `size` black pixels, nothing selected.
    ///
    /// Indices are sent as a single byte, so sizes above 256 are truncated.
    pub fn new(size: usize) -> Self {
        Self {
            pixels: vec![SolidColor::BLACK; size.min(256)],
            selected: None,
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, index: usize) -> Option<SolidColor> {
        self.pixels.get(index).copied()
    }

    pub fn pixels(&self) -> &[SolidColor] {
        &self.pixels
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a pixel; it takes on `current` right away.
    pub fn select(&mut self, index: usize, current: SolidColor) -> Result<(), SinkError> {
        let size = self.pixels.len();
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(SinkError::OutOfRange { index, size })?;
        *slot = current;
        self.selected = Some(index);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// The picked color changed; the selected pixel follows it.
    pub fn color_changed(&mut self, color: SolidColor) {
        if let Some(slot) = self.selected.and_then(|i| self.pixels.get_mut(i)) {
            *slot = color;
        }
    }

    /// Paint every pixel `color` and push the board to `sink`.
    pub fn send_all(&mut self, color: SolidColor, sink: &mut dyn ColorSink) -> Result<(), SinkError> {
        self.pixels.fill(color);
        self.send_board(sink)
    }

    /// Push the current board to `sink`, one message per pixel.
    pub fn send_board(&self, sink: &mut dyn ColorSink) -> Result<(), SinkError> {
        for (index, color) in self.pixels.iter().enumerate() {
            sink.send(index as u8, *color)?;
        }
        sink.flush()?;
        log::debug!("sent {} pixels", self.pixels.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        messages: Vec<[u8; 4]>,
        flushes: usize,
        fail_at: Option<u8>,
    }

    impl ColorSink for RecordingSink {
        fn send(&mut self, index: u8, color: SolidColor) -> Result<(), SinkError> {
            if self.fail_at == Some(index) {
                return Err(SinkError::Disconnected);
            }
            self.messages.push(pixel_message(index, color));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), SinkError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_pixel_message_layout() {
        let c = SolidColor::from_rgba(1, 2, 3, 4);
        assert_eq!(pixel_message(63, c), [1, 2, 3, 63]);
    }

    #[test]
    fn test_selected_pixel_follows_color() {
        let mut board = PixelBoard::new(64);
        board.color_changed(SolidColor::WHITE);
        assert_eq!(board.pixel(5), Some(SolidColor::BLACK));

        let red = SolidColor::from_rgb(255, 0, 0);
        board.select(5, red).unwrap();
        assert_eq!(board.pixel(5), Some(red));
        board.color_changed(SolidColor::WHITE);
        assert_eq!(board.pixel(5), Some(SolidColor::WHITE));
        assert_eq!(board.pixel(6), Some(SolidColor::BLACK));

        board.deselect();
        board.color_changed(red);
        assert_eq!(board.pixel(5), Some(SolidColor::WHITE));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut board = PixelBoard::new(4);
        let err = board.select(4, SolidColor::WHITE).unwrap_err();
        assert!(matches!(err, SinkError::OutOfRange { index: 4, size: 4 }));
        assert_eq!(board.selected(), None);
    }

    #[test]
    fn test_send_all_addresses_every_pixel() {
        let mut board = PixelBoard::new(64);
        let mut sink = RecordingSink::default();
        let c = SolidColor::from_rgb(9, 8, 7);
        board.send_all(c, &mut sink).unwrap();
        assert_eq!(sink.messages.len(), 64);
        assert_eq!(sink.messages[0], [9, 8, 7, 0]);
        assert_eq!(sink.messages[63], [9, 8, 7, 63]);
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_send_stops_on_error() {
        let board = PixelBoard::new(8);
        let mut sink = RecordingSink {
            fail_at: Some(3),
            ..Default::default()
        };
        assert!(matches!(board.send_board(&mut sink), Err(SinkError::Disconnected)));
        assert_eq!(sink.messages.len(), 3);
        assert_eq!(sink.flushes, 0);
    }
}
