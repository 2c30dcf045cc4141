//! Circular HSL color map view.
//!
//! Angle maps to hue and radius to saturation. The wheel is rasterized once,
//! off the UI thread, at the reference lightness; until that finishes the
//! view paints nothing and ignores input. The raster is scaled to widget size
//! rather than redrawn, and it is not redrawn when the lightness changes.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use floem::ext_event::create_ext_action;
use floem::kurbo::{Circle, Point, Rect};
use floem::peniko::{self, Blob, Color};
use floem::reactive::{create_effect, RwSignal, Scope, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::binding::{BindingCoordinator, ColorChange, PointerDrag, PointerId, UpdateSource};
use crate::color::SolidColor;
use crate::config::PickerConfig;
use crate::constants;
use crate::mapper::WheelPosition;
use crate::wheel_raster::{self, WheelBitmap};

/// Single-pointer input: every press is the same pointer.
const MOUSE: PointerId = PointerId(0);

enum MapUpdate {
    External(SolidColor),
    Lightness(f64),
    Ready(WheelBitmap),
}

/// Signals shared between the color map, the lightness slider and the owner
/// of the bound color.
#[derive(Clone)]
pub(crate) struct MapSignals {
    pub color: RwSignal<SolidColor>,
    pub lightness: RwSignal<f64>,
    pub preview: RwSignal<SolidColor>,
    /// The writer currently pushing into the signals above, if any.
    pub writer: Rc<Cell<Option<UpdateSource>>>,
}

pub(crate) struct ColorMap {
    id: ViewId,
    coordinator: BindingCoordinator,
    signals: MapSignals,
    size: floem::taffy::prelude::Size<f32>,
    wheel_img: Option<peniko::Image>,
    wheel_hash: Vec<u8>,
}

/// Creates the color map bound to `signals.color`.
pub(crate) fn color_map(signals: MapSignals, config: &PickerConfig) -> ColorMap {
    let id = ViewId::new();

    let color = signals.color;
    let guard = signals.writer.clone();
    create_effect(move |_| {
        let c = color.get();
        // Our own writes come back through the signal; skip them.
        if guard.get().is_some() {
            return;
        }
        id.update_state(MapUpdate::External(c));
    });

    let lightness = signals.lightness;
    let guard = signals.writer.clone();
    create_effect(move |_| {
        let l = lightness.get();
        if guard.get().is_some() {
            return;
        }
        id.update_state(MapUpdate::Lightness(l));
    });

    let on_ready = create_ext_action(Scope::new(), move |bitmap: WheelBitmap| {
        id.update_state(MapUpdate::Ready(bitmap));
    });
    if let Err(err) = wheel_raster::spawn_render(config.side, config.reference_lightness, on_ready) {
        log::error!("color map will stay blank: {err}");
    }

    let coordinator = BindingCoordinator::from_config(config, signals.color.get_untracked());

    ColorMap {
        id,
        coordinator,
        signals,
        size: Default::default(),
        wheel_img: None,
        wheel_hash: Vec::new(),
    }
    .style(|s| {
        s.flex_grow(1.0)
            .aspect_ratio(1.0)
            .min_height(100.0)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl ColorMap {
    /// Side length of the square region used for the wheel.
    fn side(&self) -> f64 {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        w.min(h)
    }

    /// The square rect centered within the widget, used for drawing the wheel.
    fn wheel_rect(&self) -> Rect {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        let r = self.side() / 2.0;
        Rect::new(w / 2.0 - r, h / 2.0 - r, w / 2.0 + r, h / 2.0 + r)
    }

    fn to_wheel(&self, pos: Point) -> WheelPosition {
        let rect = self.wheel_rect();
        WheelPosition::new(pos.x - rect.x0, pos.y - rect.y0)
    }

    /// Presses only start a drag on the disc itself.
    fn hits_disc(&self, pos: WheelPosition) -> bool {
        let r = self.side() / 2.0;
        let center = WheelPosition::new(r, r);
        r > 0.0 && pos.distance(center) <= r
    }

    /// Push coordinator state into the signals under `source`'s token.
    fn publish(&self, source: UpdateSource, change: Option<ColorChange>) {
        let s = &self.signals;
        s.writer.set(Some(source));
        if let Some(change) = change {
            if s.color.get_untracked() != change.color {
                s.color.set(change.color);
            }
        }
        let l = self.coordinator.lightness();
        if s.lightness.get_untracked() != l {
            s.lightness.set(l);
        }
        let preview = self.coordinator.preview();
        if s.preview.get_untracked() != preview {
            s.preview.set(preview);
        }
        s.writer.set(None);
    }

    fn install_bitmap(&mut self, bitmap: WheelBitmap) {
        let side = bitmap.side();
        let blob = Blob::new(Arc::new(bitmap.into_bytes()));
        self.wheel_hash = blob.id().to_le_bytes().to_vec();
        self.wheel_img = Some(peniko::Image::new(blob, peniko::Format::Rgba8, side, side));
        self.coordinator.mark_ready();
        self.publish(UpdateSource::External, None);
    }
}

impl View for ColorMap {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<MapUpdate>() {
            match *update {
                MapUpdate::External(c) => {
                    let change = self.coordinator.set_color(c, UpdateSource::External);
                    self.publish(UpdateSource::External, change);
                }
                MapUpdate::Lightness(l) => {
                    let change = self.coordinator.set_lightness(l);
                    self.publish(UpdateSource::Slider, change);
                }
                MapUpdate::Ready(bitmap) => self.install_bitmap(bitmap),
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let pos = self.to_wheel(e.pos);
                if !self.hits_disc(pos) {
                    return EventPropagation::Continue;
                }
                cx.update_active(self.id());
                let change = self.coordinator.begin_drag(MOUSE, pos);
                self.publish(UpdateSource::Wheel, change);
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.coordinator.is_dragging() {
                    let pos = self.to_wheel(e.pos);
                    let change = self.coordinator.move_drag(MOUSE, pos);
                    self.publish(UpdateSource::Wheel, change);
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.coordinator.end_drag(MOUSE);
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        let side = self.side();
        self.coordinator.set_bounds(side, side);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let side = self.side();
        if side == 0.0 {
            return;
        }
        let Some(img) = &self.wheel_img else {
            return;
        };

        let wheel_rect = self.wheel_rect();
        let radius = side / 2.0;
        let center_pt = wheel_rect.center();
        cx.save();
        cx.clip(&Circle::new(center_pt, radius));
        cx.draw_img(
            floem_renderer::Img {
                img: img.clone(),
                hash: &self.wheel_hash,
            },
            wheel_rect,
        );
        cx.restore();

        // Indicator stays hidden until something is picked or derived
        let Some(pos) = self.coordinator.position() else {
            return;
        };
        let cur_pt = Point::new(wheel_rect.x0 + pos.x, wheel_rect.y0 + pos.y);
        let outer = Circle::new(cur_pt, constants::CURSOR_RADIUS + 1.0);
        cx.stroke(
            &outer,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let (r, g, b) = self.coordinator.color().to_rgb();
        let cursor = Circle::new(cur_pt, constants::CURSOR_RADIUS);
        cx.fill(&cursor, Color::rgb8(r, g, b), 0.0);
        cx.stroke(&cursor, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
        let inner = Circle::new(cur_pt, constants::CURSOR_RADIUS - 1.5);
        cx.stroke(
            &inner,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
