//! Event dispatch system
//!
//! Page-level events coming from the host: scroll, viewport resize, section
//! threshold crossings and asset loading progress.

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Page event types
pub mod event_types {
    use super::EventType;

    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Section threshold crossings
    pub const SECTION_ENTER: EventType = 60;
    pub const SECTION_LEAVE: EventType = 61;
    pub const SECTION_ENTER_BACK: EventType = 62;
    pub const SECTION_LEAVE_BACK: EventType = 63;

    // Asset lifecycle
    pub const ASSET_PROGRESS: EventType = 70;
    pub const ASSET_LOADED: EventType = 71;
    pub const ASSET_FAILED: EventType = 72;
}

/// A page event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds since the page started
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Scroll {
        offset: f32,
        velocity: f32,
    },
    Resize {
        width: u32,
        height: u32,
    },
    /// A named section crossed one of its thresholds
    Section {
        name: String,
    },
    AssetProgress {
        loaded: u64,
        total: u64,
    },
    AssetFailed {
        message: String,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData, timestamp: u64) -> Self {
        Self {
            event_type,
            data,
            timestamp,
        }
    }

    pub fn scroll(offset: f32, velocity: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::SCROLL,
            EventData::Scroll { offset, velocity },
            timestamp,
        )
    }

    pub fn section(event_type: EventType, name: impl Into<String>, timestamp: u64) -> Self {
        Self::new(event_type, EventData::Section { name: name.into() }, timestamp)
    }

    /// Section name for section events
    pub fn section_name(&self) -> Option<&str> {
        match &self.data {
            EventData::Section { name } => Some(name),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn FnMut(&Event)>;

/// Dispatches events to handlers registered per event type, in
/// registration order.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: FxHashMap<EventType, Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event type
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch an event. Returns how many handlers saw it.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let Some(handlers) = self.handlers.get_mut(&event.event_type) else {
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    pub fn has_subscribers(&self, event_type: EventType) -> bool {
        self.handlers
            .get(&event_type)
            .is_some_and(|handlers| !handlers.is_empty())
    }
}
