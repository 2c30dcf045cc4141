//! Hue/saturation wheel rasterizer.
//!
//! Fills a square RGBA8 buffer where angle maps to hue and distance from the
//! center maps to saturation, all at one reference lightness. The fill is
//! O(N²) trig work, so it runs on a worker thread that owns the buffer until
//! it hands the finished bitmap back.
//!
//! The bitmap is never regenerated when the live lightness changes; only the
//! picked color and the preview stop follow it.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use thiserror::Error;

use crate::color::SolidColor;
use crate::math;

/// Errors from the background rasterizer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to spawn wheel render thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("wheel render thread exited before producing a bitmap")]
    Disconnected,
}

/// A finished wheel raster, row-major RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelBitmap {
    side: u32,
    lightness: f64,
    pixels: Vec<u8>,
}

impl WheelBitmap {
    /// Side length in pixels.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// The reference lightness the wheel was drawn at.
    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Raw RGBA8 bytes, `side * side * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Color of pixel (`x`, `y`), or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SolidColor> {
        if x >= self.side || y >= self.side {
            return None;
        }
        let offset = (y as usize * self.side as usize + x as usize) * 4;
        let px = &self.pixels[offset..offset + 4];
        Some(SolidColor::from_rgba(px[0], px[1], px[2], px[3]))
    }
}

/// Rasterize the wheel at `lightness` into a `side`×`side` bitmap.
///
/// Runs on the calling thread; use [`RenderJob::spawn`] to keep it off the
/// interactive path.
pub fn rasterize_wheel(side: u32, lightness: f64) -> WheelBitmap {
    let mut pixels = vec![0u8; (side as usize) * (side as usize) * 4];
    let n = side as f64;

    for py in 0..side {
        let v = py as f64 / n;
        let row_offset = (py as usize) * (side as usize) * 4;

        for px in 0..side {
            let u = px as f64 / n;
            let color = math::wheel_color(u, v, lightness);
            let offset = row_offset + (px as usize) * 4;
            pixels[offset] = color.r();
            pixels[offset + 1] = color.g();
            pixels[offset + 2] = color.b();
            pixels[offset + 3] = color.a();
        }
    }

    WheelBitmap {
        side,
        lightness,
        pixels,
    }
}

/// Rasterize on a worker thread and hand the result to `on_ready`.
///
/// `on_ready` runs on the worker thread; callers that need the bitmap on
/// their UI thread should pass a closure that forwards it there.
pub fn spawn_render(
    side: u32,
    lightness: f64,
    on_ready: impl FnOnce(WheelBitmap) + Send + 'static,
) -> Result<JoinHandle<()>, RenderError> {
    let handle = thread::Builder::new()
        .name("wheel-raster".to_string())
        .spawn(move || {
            let started = Instant::now();
            log::debug!("rasterizing {side}x{side} wheel at lightness {lightness}");
            let bitmap = rasterize_wheel(side, lightness);
            log::debug!("wheel raster finished in {:?}", started.elapsed());
            on_ready(bitmap);
        })?;
    Ok(handle)
}

/// A wheel render in flight, polled for completion.
pub struct RenderJob {
    rx: Receiver<WheelBitmap>,
    handle: Option<JoinHandle<()>>,
    bitmap: Option<Arc<WheelBitmap>>,
}

impl RenderJob {
    /// Start rasterizing in the background.
    pub fn spawn(side: u32, lightness: f64) -> Result<Self, RenderError> {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_render(side, lightness, move |bitmap| {
            // Receiver gone means nobody is waiting anymore.
            let _ = tx.send(bitmap);
        })?;
        Ok(Self {
            rx,
            handle: Some(handle),
            bitmap: None,
        })
    }

    /// Whether the bitmap has been received.
    pub fn is_ready(&self) -> bool {
        self.bitmap.is_some()
    }

    /// Non-blocking completion check. Returns the bitmap once it exists.
    pub fn try_finish(&mut self) -> Result<Option<Arc<WheelBitmap>>, RenderError> {
        if let Some(bitmap) = &self.bitmap {
            return Ok(Some(bitmap.clone()));
        }
        match self.rx.try_recv() {
            Ok(bitmap) => Ok(Some(self.store(bitmap))),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(RenderError::Disconnected),
        }
    }

    /// Block until the bitmap is available.
    pub fn wait(mut self) -> Result<Arc<WheelBitmap>, RenderError> {
        if let Some(bitmap) = self.bitmap.take() {
            return Ok(bitmap);
        }
        let bitmap = self.rx.recv().map_err(|_| RenderError::Disconnected)?;
        Ok(self.store(bitmap))
    }

    fn store(&mut self, bitmap: WheelBitmap) -> Arc<WheelBitmap> {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("wheel render thread panicked after sending its bitmap");
            }
        }
        let bitmap = Arc::new(bitmap);
        self.bitmap = Some(bitmap.clone());
        bitmap
    }
}
