//! Recently used colors.
//!
//! Keeps up to `capacity` distinct colors, newest first. Only settled values
//! are recorded: every observed color reschedules the settle timer, and the
//! color that survives the quiescence window is inserted. A color already in
//! the list is not moved to the front.

use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::color::SolidColor;
use crate::constants;
use crate::debounce::{Debouncer, Ticket};

/// One palette swatch. Immutable once created.
#[derive(Clone)]
pub struct PaletteEntry {
    color: SolidColor,
    activate: Rc<dyn Fn()>,
}

impl PaletteEntry {
    pub fn color(&self) -> SolidColor {
        self.color
    }

    /// Choose this entry, which sets the bound color to it.
    pub fn activate(&self) {
        (self.activate)();
    }
}

impl fmt::Debug for PaletteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteEntry")
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Bounded, deduplicated most-recent-colors list.
pub struct PaletteHistory {
    entries: Vec<PaletteEntry>,
    capacity: usize,
    on_activate: Rc<dyn Fn(SolidColor)>,
    settle: Debouncer<SolidColor>,
}

impl PaletteHistory {
    /// An empty palette. `on_activate` receives an entry's color when the
    /// entry is chosen and is expected to set the bound color.
    pub fn new(
        capacity: usize,
        settle_window: Duration,
        on_activate: impl Fn(SolidColor) + 'static,
    ) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
            on_activate: Rc::new(on_activate),
            settle: Debouncer::new(settle_window),
        }
    }

    /// Palette with the default capacity and settle window.
    pub fn with_defaults(on_activate: impl Fn(SolidColor) + 'static) -> Self {
        Self::new(
            constants::PALETTE_CAPACITY,
            constants::SETTLE_WINDOW,
            on_activate,
        )
    }

    /// Fill every slot with `color`, the way a fresh editor shows a row of
    /// blank swatches.
    pub fn prefilled(mut self, color: SolidColor) -> Self {
        self.entries = (0..self.capacity).map(|_| self.entry(color)).collect();
        self
    }

    fn entry(&self, color: SolidColor) -> PaletteEntry {
        let on_activate = self.on_activate.clone();
        PaletteEntry {
            color,
            activate: Rc::new(move || on_activate(color)),
        }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub fn colors(&self) -> Vec<SolidColor> {
        self.entries.iter().map(PaletteEntry::color).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, color: SolidColor) -> bool {
        self.entries.iter().any(|e| e.color == color)
    }

    /// Record a settled color. Returns whether the list changed.
    pub fn record(&mut self, color: SolidColor) -> bool {
        if self.contains(color) {
            return false;
        }
        let keep = self.capacity - 1;
        while self.entries.len() > keep {
            let evicted = self.entries.remove(keep);
            log::debug!("palette: evicted #{}", evicted.color.to_hex());
        }
        let entry = self.entry(color);
        self.entries.insert(0, entry);
        log::debug!("palette: recorded #{}", color.to_hex());
        true
    }

    /// Note a new value of the bound color; it is recorded once it settles.
    pub fn observe(&mut self, color: SolidColor, now: Instant) -> Ticket {
        self.settle.schedule(color, now)
    }

    /// Record the pending color if its quiescence window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.settle.poll(now) {
            Some(color) => self.record(color),
            None => false,
        }
    }

    /// Timer callback form of [`poll`](Self::poll): records the pending color
    /// only if `ticket` was not superseded.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.settle.fire(ticket) {
            Some(color) => self.record(color),
            None => false,
        }
    }

    /// When the pending color settles, if one is pending.
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }

    pub fn settle_window(&self) -> Duration {
        self.settle.window()
    }
}

impl fmt::Debug for PaletteHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteHistory")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const RED: SolidColor = SolidColor::from_rgb(255, 0, 0);
    const GREEN: SolidColor = SolidColor::from_rgb(0, 255, 0);

    fn palette() -> (PaletteHistory, Rc<RefCell<Vec<SolidColor>>>) {
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let sink = chosen.clone();
        let p = PaletteHistory::with_defaults(move |c| sink.borrow_mut().push(c));
        (p, chosen)
    }

    fn gray(i: u8) -> SolidColor {
        SolidColor::from_rgb(i, i, i)
    }

    #[test]
    fn test_red_green_red() {
        let (mut p, _) = palette();
        let t0 = Instant::now();
        let step = Duration::from_millis(1100);
        for (i, c) in [RED, GREEN, RED].into_iter().enumerate() {
            let at = t0 + step * i as u32;
            p.observe(c, at);
            p.poll(at + step);
        }
        assert_eq!(p.colors(), vec![GREEN, RED]);
    }

    #[test]
    fn test_nine_distinct_evicts_oldest() {
        let (mut p, _) = palette();
        for i in 0..9 {
            assert!(p.record(gray(i)));
        }
        assert_eq!(p.len(), 8);
        assert!(!p.contains(gray(0)));
        assert_eq!(p.get(0).unwrap().color(), gray(8));
        assert_eq!(p.get(7).unwrap().color(), gray(1));
    }

    #[test]
    fn test_duplicate_leaves_list_unchanged() {
        let (mut p, _) = palette();
        for i in 0..5 {
            p.record(gray(i));
        }
        let before = p.colors();
        assert!(!p.record(gray(2)));
        assert_eq!(p.colors(), before);
    }

    #[test]
    fn test_cap_and_distinctness_hold() {
        let (mut p, _) = palette();
        for i in 0..200u32 {
            p.record(gray((i * 7 % 13) as u8));
            assert!(p.len() <= 8);
            let colors = p.colors();
            for (a, ca) in colors.iter().enumerate() {
                for cb in &colors[a + 1..] {
                    assert_ne!(ca, cb);
                }
            }
        }
    }

    #[test]
    fn test_unsettled_values_are_not_recorded() {
        let (mut p, _) = palette();
        let t0 = Instant::now();
        p.observe(RED, t0);
        p.observe(GREEN, t0 + Duration::from_millis(300));
        assert!(!p.poll(t0 + Duration::from_millis(1000)));
        assert!(p.poll(t0 + Duration::from_millis(1300)));
        assert_eq!(p.colors(), vec![GREEN]);
    }

    #[test]
    fn test_fire_ignores_superseded_ticket() {
        let (mut p, _) = palette();
        let t0 = Instant::now();
        let stale = p.observe(RED, t0);
        let latest = p.observe(GREEN, t0);
        assert!(!p.fire(stale));
        assert!(p.fire(latest));
        assert_eq!(p.colors(), vec![GREEN]);
    }

    #[test]
    fn test_activation_reports_entry_color() {
        let (mut p, chosen) = palette();
        p.record(RED);
        p.record(GREEN);
        p.get(1).unwrap().activate();
        assert_eq!(*chosen.borrow(), vec![RED]);
    }

    #[test]
    fn test_prefilled_slots() {
        let (p, _) = palette();
        let mut p = p.prefilled(SolidColor::BLACK);
        assert_eq!(p.len(), 8);
        assert!(!p.record(SolidColor::BLACK));
        assert!(p.record(RED));
        assert_eq!(p.len(), 8);
        assert_eq!(p.get(0).unwrap().color(), RED);
    }
}
