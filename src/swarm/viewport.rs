use bevy::prelude::*;

use crate::config::*;

/// Display class chosen once per build from the container width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    pub fn from_width(width: f32) -> Self {
        if width <= NARROW_BREAKPOINT {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    /// How many of `available` descriptors a build shows.
    pub fn token_budget(self, available: usize) -> usize {
        match self {
            Self::Narrow => available.min(NARROW_MAX_TOKENS),
            Self::Wide => available,
        }
    }

    pub fn token_size(self) -> f32 {
        match self {
            Self::Narrow => NARROW_TOKEN_SIZE,
            Self::Wide => WIDE_TOKEN_SIZE,
        }
    }

    pub fn max_speed(self) -> f32 {
        match self {
            Self::Narrow => NARROW_MAX_SPEED,
            Self::Wide => WIDE_MAX_SPEED,
        }
    }
}

/// Turns raw container size observations into rebuild requests.
///
/// Plain resizes are debounced by [`RESIZE_SETTLE`]; a change that flips the
/// orientation waits [`ORIENTATION_SETTLE`] instead. The first size seen is
/// debounced like a resize, so a canvas still fitting itself to the page
/// does not get a swarm laid out for its startup size.
#[derive(Resource, Default, Debug, Clone)]
pub struct ViewportWatcher {
    last: Option<Vec2>,
    due_at: Option<f32>,
}

impl ViewportWatcher {
    /// Feed the current container size (None if there is no container).
    /// Returns true exactly once when a scheduled rebuild comes due.
    pub fn observe(&mut self, size: Option<Vec2>, now: f32) -> bool {
        if let Some(size) = size {
            match self.last {
                None => self.due_at = Some(now + RESIZE_SETTLE),
                Some(prev) if prev != size => {
                    let settle = if is_landscape(prev) != is_landscape(size) {
                        ORIENTATION_SETTLE
                    } else {
                        RESIZE_SETTLE
                    };
                    self.due_at = Some(now + settle);
                }
                Some(_) => {}
            }
            self.last = Some(size);
        }

        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}

fn is_landscape(size: Vec2) -> bool {
    size.x > size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(ViewportClass::from_width(768.0), ViewportClass::Narrow);
        assert_eq!(ViewportClass::from_width(768.5), ViewportClass::Wide);
        assert_eq!(ViewportClass::from_width(320.0), ViewportClass::Narrow);
    }

    #[test]
    fn budgets_and_sizes() {
        assert_eq!(ViewportClass::Narrow.token_budget(7), 7);
        assert_eq!(ViewportClass::Narrow.token_budget(12), 8);
        assert_eq!(ViewportClass::Wide.token_budget(12), 12);
        assert_eq!(ViewportClass::Narrow.token_size(), 50.0);
        assert_eq!(ViewportClass::Wide.token_size(), 75.0);
    }

    #[test]
    fn first_observation_waits_to_settle() {
        let mut w = ViewportWatcher::default();
        assert!(!w.observe(None, 0.0));
        assert!(!w.observe(Some(Vec2::new(1280.0, 720.0)), 0.5));
        assert!(!w.observe(Some(Vec2::new(1280.0, 720.0)), 0.6));
        assert!(w.observe(Some(Vec2::new(1280.0, 720.0)), 0.76));
        assert!(!w.observe(Some(Vec2::new(1280.0, 720.0)), 0.9));
    }

    #[test]
    fn canvas_fitting_at_startup_builds_once_at_final_size() {
        let mut w = ViewportWatcher::default();
        // default window size, then the canvas fits its parent a frame later
        assert!(!w.observe(Some(Vec2::new(1280.0, 720.0)), 0.0));
        assert!(!w.observe(Some(Vec2::new(600.0, 400.0)), 0.016));
        assert!(!w.observe(Some(Vec2::new(600.0, 400.0)), 0.25));
        assert!(w.observe(Some(Vec2::new(600.0, 400.0)), 0.27));
        assert!(!w.observe(Some(Vec2::new(600.0, 400.0)), 1.0));
    }

    #[test]
    fn resize_is_debounced() {
        let mut w = ViewportWatcher::default();
        w.observe(Some(Vec2::new(1280.0, 720.0)), 0.0);
        assert!(w.observe(Some(Vec2::new(1280.0, 720.0)), 0.3));

        assert!(!w.observe(Some(Vec2::new(1200.0, 720.0)), 1.0));
        assert!(!w.observe(Some(Vec2::new(1100.0, 720.0)), 1.2));
        // 250ms after the last change, not the first
        assert!(!w.observe(Some(Vec2::new(1100.0, 720.0)), 1.3));
        assert!(w.observe(Some(Vec2::new(1100.0, 720.0)), 1.46));
        assert!(!w.observe(Some(Vec2::new(1100.0, 720.0)), 2.0));
    }

    #[test]
    fn orientation_flip_waits_longer() {
        let mut w = ViewportWatcher::default();
        w.observe(Some(Vec2::new(400.0, 800.0)), 0.0);
        assert!(w.observe(Some(Vec2::new(400.0, 800.0)), 0.3));

        assert!(!w.observe(Some(Vec2::new(800.0, 400.0)), 1.0));
        assert!(!w.observe(Some(Vec2::new(800.0, 400.0)), 1.26));
        assert!(w.observe(Some(Vec2::new(800.0, 400.0)), 1.31));
    }

    #[test]
    fn lost_window_keeps_pending_request() {
        let mut w = ViewportWatcher::default();
        w.observe(Some(Vec2::new(800.0, 600.0)), 0.0);
        assert!(w.observe(Some(Vec2::new(800.0, 600.0)), 0.3));
        assert!(!w.observe(Some(Vec2::new(700.0, 600.0)), 1.0));
        assert!(w.observe(None, 1.3));
    }
}
