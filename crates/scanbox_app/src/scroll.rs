//! Smooth scroll source
//!
//! Wheel and touch input set a target offset; every frame the rendered
//! offset eases toward it with an exponential damp so the motion looks the
//! same at any frame rate. Scroll events are only produced on frames where
//! the rendered offset actually moved.

/// Distance from the target under which the offset snaps onto it (pixels)
pub const SNAP_THRESHOLD: f32 = 0.5;

/// Frame length the lerp factor is expressed against (60 fps)
const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

/// Direction of the last movement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

/// Emitted on frames where the offset changed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f32,
    /// Pixels moved this frame (signed)
    pub velocity: f32,
    pub direction: ScrollDirection,
}

/// Lerped scroll position
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    current: f32,
    target: f32,
    lerp: f32,
    limit: f32,
    is_scrolling: bool,
}

impl SmoothScroll {
    /// `lerp` is the fraction of the remaining distance covered per 60 fps
    /// frame. 1 jumps straight to the target.
    pub fn new(lerp: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            lerp: lerp.clamp(f32::EPSILON, 1.0),
            limit: f32::INFINITY,
            is_scrolling: false,
        }
    }

    pub fn with_limit(mut self, limit: f32) -> Self {
        self.set_limit(limit);
        self
    }

    /// Bound the reachable offset to `[0, limit]`
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.min(self.limit);
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Rendered offset
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Ease toward `target`, clamped to the scrollable range
    pub fn scroll_to(&mut self, target: f32) {
        let target = if target.is_finite() { target } else { 0.0 };
        self.target = target.clamp(0.0, self.limit);
        self.is_scrolling = self.target != self.current;
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) -> Option<ScrollEvent> {
        if !self.is_scrolling || dt_ms <= 0.0 {
            return None;
        }

        let previous = self.current;
        let factor = if self.lerp >= 1.0 {
            1.0
        } else {
            1.0 - (1.0 - self.lerp).powf(dt_ms / REFERENCE_FRAME_MS)
        };
        self.current += (self.target - self.current) * factor;

        if (self.target - self.current).abs() < SNAP_THRESHOLD {
            self.current = self.target;
            self.is_scrolling = false;
        }

        let velocity = self.current - previous;
        if velocity == 0.0 {
            return None;
        }

        Some(ScrollEvent {
            scroll: self.current,
            velocity,
            direction: if velocity > 0.0 {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            },
        })
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(scroll: &mut SmoothScroll, dt_ms: f32) -> (usize, Vec<ScrollEvent>) {
        let mut events = Vec::new();
        let mut frames = 0;
        while scroll.is_scrolling() && frames < 10_000 {
            if let Some(event) = scroll.tick(dt_ms) {
                events.push(event);
            }
            frames += 1;
        }
        (frames, events)
    }

    #[test]
    fn test_eases_toward_target_and_snaps() {
        let mut scroll = SmoothScroll::new(0.1);
        scroll.scroll_to(500.0);

        let first = scroll.tick(REFERENCE_FRAME_MS).unwrap();
        assert!((first.scroll - 50.0).abs() < 1e-3);
        assert_eq!(first.direction, ScrollDirection::Down);

        let (_, events) = settle(&mut scroll, REFERENCE_FRAME_MS);
        assert_eq!(scroll.current(), 500.0);
        assert_eq!(events.last().unwrap().scroll, 500.0);
        assert!(events.windows(2).all(|w| w[1].scroll > w[0].scroll));
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut at_60 = SmoothScroll::new(0.1);
        let mut at_120 = SmoothScroll::new(0.1);
        at_60.scroll_to(1000.0);
        at_120.scroll_to(1000.0);

        for _ in 0..10 {
            at_60.tick(REFERENCE_FRAME_MS);
        }
        for _ in 0..20 {
            at_120.tick(REFERENCE_FRAME_MS / 2.0);
        }
        assert!((at_60.current() - at_120.current()).abs() < 0.01);
    }

    #[test]
    fn test_no_event_without_movement() {
        let mut scroll = SmoothScroll::new(0.1);
        assert_eq!(scroll.tick(16.0), None);

        scroll.scroll_to(0.0);
        assert!(!scroll.is_scrolling());
        assert_eq!(scroll.tick(16.0), None);
    }

    #[test]
    fn test_lerp_one_jumps() {
        let mut scroll = SmoothScroll::new(1.0);
        scroll.scroll_to(320.0);
        let event = scroll.tick(16.0).unwrap();
        assert_eq!(event.scroll, 320.0);
        assert_eq!(event.velocity, 320.0);
        assert!(!scroll.is_scrolling());
    }

    #[test]
    fn test_clamps_to_range() {
        let mut scroll = SmoothScroll::new(1.0).with_limit(1000.0);
        scroll.scroll_to(5000.0);
        assert_eq!(scroll.target(), 1000.0);

        scroll.tick(16.0);
        scroll.scroll_to(-40.0);
        assert_eq!(scroll.target(), 0.0);
        let event = scroll.tick(16.0).unwrap();
        assert_eq!(event.direction, ScrollDirection::Up);
        assert_eq!(event.scroll, 0.0);

        scroll.scroll_to(f32::NAN);
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut scroll = SmoothScroll::new(0.2);
        scroll.scroll_to(800.0);
        for _ in 0..5 {
            scroll.tick(REFERENCE_FRAME_MS);
        }
        let mid = scroll.current();
        scroll.scroll_to(0.0);
        let event = scroll.tick(REFERENCE_FRAME_MS).unwrap();
        assert!(event.scroll < mid);
        assert_eq!(event.direction, ScrollDirection::Up);

        settle(&mut scroll, REFERENCE_FRAME_MS);
        assert_eq!(scroll.current(), 0.0);
    }
}
