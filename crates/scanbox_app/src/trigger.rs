//! Scroll-position section triggers
//!
//! A trigger watches a `[start, end]` range of the scroll offset and reports
//! each boundary crossing:
//!
//! ```text
//!            start              end
//!   Before ----|----- Active -----|---- After
//!        Enter ->            Leave ->
//!     <- LeaveBack          <- EnterBack
//! ```
//!
//! A single update that jumps over the whole range reports both crossings in
//! the order they were passed.

use smallvec::{smallvec, SmallVec};

/// A boundary crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Crossed `start` scrolling down
    Enter,
    /// Crossed `end` scrolling down
    Leave,
    /// Crossed `end` scrolling up
    EnterBack,
    /// Crossed `start` scrolling up
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Active,
    After,
}

/// A scroll range with enter/leave callbacks expressed as events
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    name: String,
    start: f32,
    end: f32,
    pin: bool,
    zone: Zone,
}

impl ScrollTrigger {
    /// Create a trigger at the initial scroll position. Starting inside the
    /// range reports nothing.
    pub fn new(name: impl Into<String>, start: f32, end: f32, scroll: f32) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let mut trigger = Self {
            name: name.into(),
            start,
            end,
            pin: false,
            zone: Zone::Before,
        };
        trigger.zone = trigger.zone_of(scroll);
        trigger
    }

    /// Mark the section as pinned while the range is active
    pub fn with_pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn is_active(&self) -> bool {
        self.zone == Zone::Active
    }

    /// The section is held in place
    pub fn is_pinned(&self) -> bool {
        self.pin && self.is_active()
    }

    fn zone_of(&self, scroll: f32) -> Zone {
        if scroll < self.start {
            Zone::Before
        } else if scroll <= self.end {
            Zone::Active
        } else {
            Zone::After
        }
    }

    /// Feed a new scroll offset and collect the crossings
    pub fn update(&mut self, scroll: f32) -> SmallVec<[TriggerEvent; 2]> {
        let next = self.zone_of(scroll);
        let events = match (self.zone, next) {
            (Zone::Before, Zone::Active) => smallvec![TriggerEvent::Enter],
            (Zone::Before, Zone::After) => smallvec![TriggerEvent::Enter, TriggerEvent::Leave],
            (Zone::Active, Zone::After) => smallvec![TriggerEvent::Leave],
            (Zone::After, Zone::Active) => smallvec![TriggerEvent::EnterBack],
            (Zone::After, Zone::Before) => {
                smallvec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
            }
            (Zone::Active, Zone::Before) => smallvec![TriggerEvent::LeaveBack],
            _ => SmallVec::new(),
        };
        if !events.is_empty() {
            tracing::debug!(trigger = %self.name, scroll, ?events, "section crossed");
        }
        self.zone = next;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(trigger: &mut ScrollTrigger, offsets: &[f32]) -> Vec<TriggerEvent> {
        offsets
            .iter()
            .flat_map(|&offset| trigger.update(offset))
            .collect()
    }

    #[test]
    fn test_round_trip_through_range() {
        let mut trigger = ScrollTrigger::new("scanner", 1000.0, 1720.0, 0.0).with_pin(true);
        assert!(!trigger.is_active());

        let events = collect(&mut trigger, &[500.0, 999.0, 1000.0]);
        assert_eq!(events, vec![TriggerEvent::Enter]);
        assert!(trigger.is_pinned());

        let events = collect(&mut trigger, &[1720.0, 1721.0]);
        assert_eq!(events, vec![TriggerEvent::Leave]);
        assert!(!trigger.is_pinned());

        let events = collect(&mut trigger, &[1500.0, 999.9]);
        assert_eq!(
            events,
            vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
    }

    #[test]
    fn test_jump_over_range_reports_both_edges() {
        let mut trigger = ScrollTrigger::new("scanner", 100.0, 200.0, 0.0);
        assert_eq!(
            trigger.update(5000.0).as_slice(),
            &[TriggerEvent::Enter, TriggerEvent::Leave]
        );
        assert_eq!(
            trigger.update(0.0).as_slice(),
            &[TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
    }

    #[test]
    fn test_initially_active_reports_nothing() {
        let mut trigger = ScrollTrigger::new("top", 0.0, 10.0, 0.0);
        assert!(trigger.is_active());
        assert!(trigger.update(5.0).is_empty());

        assert_eq!(trigger.update(11.0).as_slice(), &[TriggerEvent::Leave]);
        assert_eq!(trigger.update(10.0).as_slice(), &[TriggerEvent::EnterBack]);
    }

    #[test]
    fn test_unpinned_never_pins() {
        let mut trigger = ScrollTrigger::new("top", 0.0, 10.0, 0.0);
        assert!(trigger.is_active());
        assert!(!trigger.is_pinned());
        trigger.update(50.0);
        assert!(!trigger.is_active());
    }

    #[test]
    fn test_reversed_bounds_are_normalised() {
        let trigger = ScrollTrigger::new("odd", 300.0, 100.0, 0.0);
        assert_eq!(trigger.start(), 100.0);
        assert_eq!(trigger.end(), 300.0);
        assert_eq!(trigger.name(), "odd");
    }
}
