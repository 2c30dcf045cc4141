//! Two-way binding between the observed color and the wheel's own state.
//!
//! Three writers can change the color: the wheel (pointer drags), the
//! lightness slider, and whoever owns the bound value outside the control.
//! Each write runs under an [`UpdateSource`] token naming the active writer.
//! A write that arrives while another writer holds the token only stores
//! what it was given and derives nothing, so the three paths cannot bounce
//! updates off each other.
//!
//! All of this runs on one event thread; the token is not a lock.

use std::fmt;

use crate::color::SolidColor;
use crate::config::PickerConfig;
use crate::mapper::{PointerMapper, WheelPosition};
use crate::math;

/// Lightness of the slider's middle gradient stop.
const PREVIEW_LIGHTNESS: f64 = 0.5;

/// Which path is writing the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSource {
    /// Pointer on the wheel.
    Wheel,
    /// The lightness slider.
    Slider,
    /// Anyone outside the control: bindings, code, palette activation.
    External,
}

/// A committed change of the observed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorChange {
    pub color: SolidColor,
    pub source: UpdateSource,
}

/// Identifies one pointer for drag capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// Drag capture over the wheel, independent of any UI runtime.
///
/// A drag starts on a pointer press inside the wheel, follows that pointer
/// only, and ends on release or focus loss.
pub trait PointerDrag {
    /// Capture `pointer` and pick the color under `pos`.
    fn begin_drag(&mut self, pointer: PointerId, pos: WheelPosition) -> Option<ColorChange>;
    /// Follow a captured pointer. Other pointers and positions outside the
    /// wheel are ignored.
    fn move_drag(&mut self, pointer: PointerId, pos: WheelPosition) -> Option<ColorChange>;
    /// Release `pointer` if it holds the capture.
    fn end_drag(&mut self, pointer: PointerId);
    /// Whether a drag is in progress.
    fn is_dragging(&self) -> bool;
}

type Listener = Box<dyn FnMut(&ColorChange)>;

/// Owns the observed color, the lightness, and the picked wheel position.
pub struct BindingCoordinator {
    mapper: PointerMapper,
    color: SolidColor,
    lightness: f64,
    /// Last picked or derived position; also where the indicator is drawn.
    position: Option<WheelPosition>,
    preview: SolidColor,
    ready: bool,
    writer: Option<UpdateSource>,
    captured: Option<PointerId>,
    listeners: Vec<Listener>,
}

impl BindingCoordinator {
    pub fn new(mapper: PointerMapper, color: SolidColor) -> Self {
        Self {
            mapper,
            color,
            lightness: PREVIEW_LIGHTNESS,
            position: None,
            preview: math::hsl_to_rgb(0.0, 1.0, PREVIEW_LIGHTNESS),
            ready: false,
            writer: None,
            captured: None,
            listeners: Vec::new(),
        }
    }

    /// Coordinator for a square wheel of the configured side.
    pub fn from_config(config: &PickerConfig, color: SolidColor) -> Self {
        let side = config.side as f64;
        Self::new(PointerMapper::new(side, side), color)
    }

    pub fn color(&self) -> SolidColor {
        self.color
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Where the indicator sits, or `None` before anything was picked.
    pub fn position(&self) -> Option<WheelPosition> {
        self.position
    }

    /// Current hue at full saturation, for the slider's middle stop.
    pub fn preview(&self) -> SolidColor {
        self.preview
    }

    pub fn mapper(&self) -> &PointerMapper {
        &self.mapper
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The writer currently holding the token, if any.
    pub fn active_writer(&self) -> Option<UpdateSource> {
        self.writer
    }

    /// Be told about every committed color change.
    pub fn subscribe(&mut self, listener: impl FnMut(&ColorChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The wheel bitmap exists; start processing updates.
    ///
    /// A color set before this point is reflected in the indicator now.
    pub fn mark_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.write(UpdateSource::External, |this| this.sync_from_color());
        log::debug!("color map ready at #{}", self.color.to_hex());
    }

    /// The wheel was laid out at a new size.
    ///
    /// The picked position is scaled with the wheel, so hue and saturation
    /// survive even while lightness makes the color achromatic.
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        let mapper = PointerMapper::new(width, height);
        if mapper == self.mapper {
            return;
        }
        let old = std::mem::replace(&mut self.mapper, mapper);
        self.position = match self.position {
            Some(p) if old.width() > 0.0 && old.height() > 0.0 => Some(WheelPosition::new(
                p.x * width / old.width(),
                p.y * height / old.height(),
            )),
            Some(_) => Some(self.mapper.color_to_position(self.color)),
            None => None,
        };
    }

    /// Set the observed color on behalf of `source`.
    ///
    /// Values written back by the wheel or slider path (a binding echoing the
    /// control's own output) are dropped: this control already holds them,
    /// and re-deriving the position would fight the drag that produced them.
    pub fn set_color(&mut self, color: SolidColor, source: UpdateSource) -> Option<ColorChange> {
        match source {
            UpdateSource::External => self.set_from_external(color),
            UpdateSource::Wheel | UpdateSource::Slider => {
                log::trace!("ignoring {source:?} echo of #{}", color.to_hex());
                None
            }
        }
    }

    /// External path: a new value from outside the control.
    pub fn set_from_external(&mut self, color: SolidColor) -> Option<ColorChange> {
        if let Some(writer) = self.writer {
            log::trace!("external set ignored while {writer:?} is writing");
            return None;
        }
        if color == self.color {
            return None;
        }
        self.color = color;
        if self.ready {
            self.write(UpdateSource::External, |this| this.sync_from_color());
        }
        Some(self.notify(color, UpdateSource::External))
    }

    /// Pointer path: pick the color under `pos`.
    ///
    /// Discarded until the control is ready.
    pub fn set_from_pointer(&mut self, pos: WheelPosition) -> Option<ColorChange> {
        if !self.ready || self.writer.is_some() {
            return None;
        }
        self.write(UpdateSource::Wheel, |this| this.pick(pos))
    }

    /// Slider path: the user moved the lightness slider.
    ///
    /// Recomputes the color from the picked position. While another writer
    /// holds the token the value is only stored.
    pub fn set_lightness(&mut self, lightness: f64) -> Option<ColorChange> {
        let lightness = lightness.clamp(0.0, 1.0);
        if lightness == self.lightness {
            return None;
        }
        self.lightness = lightness;
        if let Some(writer) = self.writer {
            log::trace!("slider value {} stored during {writer:?} write", self.lightness);
            return None;
        }
        if !self.ready {
            return None;
        }
        let pos = self.position?;
        self.write(UpdateSource::Slider, |this| this.recolor(pos))
    }

    fn write<R>(&mut self, source: UpdateSource, f: impl FnOnce(&mut Self) -> R) -> R {
        self.writer = Some(source);
        let result = f(self);
        self.writer = None;
        result
    }

    fn pick(&mut self, pos: WheelPosition) -> Option<ColorChange> {
        let (u, v) = self.mapper.normalize(pos);
        let (hue, _) = math::wheel_hue_saturation(u, v);
        self.preview = math::hsl_to_rgb(hue, 1.0, PREVIEW_LIGHTNESS);
        self.recolor(pos)
    }

    fn recolor(&mut self, pos: WheelPosition) -> Option<ColorChange> {
        let source = self.writer?;
        let color = self.mapper.position_to_color(pos, self.lightness);
        // Always opaque today; kept so a transparent result never commits.
        if color.a() == 0 {
            return None;
        }
        self.position = Some(pos);
        if color == self.color {
            return None;
        }
        self.color = color;
        Some(self.notify(color, source))
    }

    fn sync_from_color(&mut self) {
        let hsl = self.color.to_hsl();
        // Runs under the External token, so the slider handler only stores.
        self.set_lightness(hsl.l);
        self.preview = math::hsl_to_rgb(hsl.h, 1.0, PREVIEW_LIGHTNESS);
        self.position = Some(self.mapper.color_to_position(self.color));
    }

    fn notify(&mut self, color: SolidColor, source: UpdateSource) -> ColorChange {
        let change = ColorChange { color, source };
        for listener in &mut self.listeners {
            listener(&change);
        }
        change
    }
}

impl PointerDrag for BindingCoordinator {
    fn begin_drag(&mut self, pointer: PointerId, pos: WheelPosition) -> Option<ColorChange> {
        if !self.mapper.contains(pos) {
            return None;
        }
        self.captured = Some(pointer);
        self.set_from_pointer(pos)
    }

    fn move_drag(&mut self, pointer: PointerId, pos: WheelPosition) -> Option<ColorChange> {
        if self.captured != Some(pointer) || !self.mapper.contains(pos) {
            return None;
        }
        self.set_from_pointer(pos)
    }

    fn end_drag(&mut self, pointer: PointerId) {
        if self.captured == Some(pointer) {
            self.captured = None;
        }
    }

    fn is_dragging(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Debug for BindingCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingCoordinator")
            .field("mapper", &self.mapper)
            .field("color", &self.color)
            .field("lightness", &self.lightness)
            .field("position", &self.position)
            .field("ready", &self.ready)
            .field("writer", &self.writer)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}
