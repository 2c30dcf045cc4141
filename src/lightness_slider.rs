//! Vertical lightness slider (0.0–1.0).
//!
//! Renders a white → current hue → black gradient, top to bottom, as a
//! rasterized image. The middle stop is the picked hue at full saturation.

use std::sync::Arc;

use floem::kurbo::Rect;
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::SolidColor;
use crate::constants;

/// Rasterize a vertical three-stop gradient: white, `mid`, black.
fn rasterize_lightness_gradient(width: u32, height: u32, mid: SolidColor) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    let (mr, mg, mb, _) = mid.to_unit_rgba();
    for py in 0..height {
        let t = py as f64 / (height - 1).max(1) as f64; // 0 at top, 1 at bottom
        let (r, g, b) = if t < 0.5 {
            let k = t * 2.0;
            (1.0 + (mr - 1.0) * k, 1.0 + (mg - 1.0) * k, 1.0 + (mb - 1.0) * k)
        } else {
            let k = (1.0 - t) * 2.0;
            (mr * k, mg * k, mb * k)
        };
        let px = [
            (r * 255.0 + 0.5) as u8,
            (g * 255.0 + 0.5) as u8,
            (b * 255.0 + 0.5) as u8,
            255,
        ];
        let row = (py * width * 4) as usize;
        for chunk in buf[row..row + (width * 4) as usize].chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }
    buf
}

enum LightnessUpdate {
    Value(f64),
    Preview(SolidColor),
}

pub(crate) struct LightnessSlider {
    id: ViewId,
    held: bool,
    lightness: f64,
    preview: SolidColor,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(f64)>>,
    /// Cached gradient image.
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_preview: SolidColor,
    cached_dims: (u32, u32),
}

/// Creates a vertical lightness slider.
///
/// - `lightness`: 1.0 (white, top) to 0.0 (black, bottom).
/// - `preview`: read-only, the gradient's middle stop.
pub(crate) fn lightness_slider(
    lightness: RwSignal<f64>,
    preview: RwSignal<SolidColor>,
) -> LightnessSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        let l = lightness.get();
        id.update_state(LightnessUpdate::Value(l));
    });

    create_effect(move |_| {
        let c = preview.get();
        id.update_state(LightnessUpdate::Preview(c));
    });

    LightnessSlider {
        id,
        held: false,
        lightness: lightness.get_untracked(),
        preview: preview.get_untracked(),
        size: Default::default(),
        on_change: Some(Box::new(move |val| {
            lightness.set(val);
        })),
        grad_img: None,
        grad_hash: Vec::new(),
        cached_preview: SolidColor::BLACK,
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.width(constants::SLIDER_WIDTH)
            .min_height(100.0)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl LightnessSlider {
    fn update_from_pointer(&mut self, y: f64) {
        let h = self.size.height as f64;
        let r = constants::THUMB_RADIUS;
        let usable = h - 2.0 * r;
        if usable > 0.0 {
            // Top = white, bottom = black
            self.lightness = 1.0 - ((y - r) / usable).clamp(0.0, 1.0);
        }
    }

    fn emit(&self) {
        if let Some(cb) = &self.on_change {
            cb(self.lightness);
        }
    }

    fn ensure_gradient_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        let dims = (pw, ph);
        if self.grad_img.is_some() && self.cached_dims == dims && self.cached_preview == self.preview {
            return;
        }

        let pixels = rasterize_lightness_gradient(pw, ph, self.preview);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        self.grad_hash = blob.id().to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_preview = self.preview;
        self.cached_dims = dims;
    }
}

impl View for LightnessSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<LightnessUpdate>() {
            match *update {
                LightnessUpdate::Value(val) => self.lightness = val,
                LightnessUpdate::Preview(c) => self.preview = c,
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                self.update_from_pointer(e.pos.y);
                self.emit();
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.update_from_pointer(e.pos.y);
                    self.emit();
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_gradient_image(scale);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Thumb (circular ring; top = 1.0, bottom = 0.0)
        let radius = constants::THUMB_RADIUS;
        let thumb_y = radius + (1.0 - self.lightness) * (h - 2.0 * radius);
        let thumb_cx = w / 2.0;
        let circle = floem::kurbo::Circle::new((thumb_cx, thumb_y), radius);
        cx.stroke(
            &circle,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let inner = floem::kurbo::Circle::new((thumb_cx, thumb_y), radius - 1.5);
        cx.stroke(&inner, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(buf: &[u8], width: u32, y: u32) -> [u8; 4] {
        let o = (y * width * 4) as usize;
        [buf[o], buf[o + 1], buf[o + 2], buf[o + 3]]
    }

    #[test]
    fn test_gradient_stops() {
        let mid = SolidColor::from_rgb(255, 0, 0);
        let buf = rasterize_lightness_gradient(2, 101, mid);
        assert_eq!(px(&buf, 2, 0), [255, 255, 255, 255]);
        assert_eq!(px(&buf, 2, 50), [255, 0, 0, 255]);
        assert_eq!(px(&buf, 2, 100), [0, 0, 0, 255]);
    }
}
