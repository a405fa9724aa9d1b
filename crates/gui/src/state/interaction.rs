//! Click vs. drag disambiguation for viewport pointer events

use egui::Pos2;

/// Pointer state between press and release
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerPhase {
    #[default]
    Idle,
    Pressed { origin: Pos2, moved: bool },
}

/// Tracks one press/release cycle and reports whether it was a click
#[derive(Debug, Clone)]
pub struct PointerTracker {
    phase: PointerPhase,
    /// Travel in pixels beyond which the press becomes a drag
    threshold: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl PointerTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: PointerPhase::Idle,
            threshold: threshold.max(0.0),
        }
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.max(0.0);
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.phase = PointerPhase::Pressed {
            origin: pos,
            moved: false,
        };
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if let PointerPhase::Pressed { origin, moved } = &mut self.phase {
            if !*moved && origin.distance(pos) > self.threshold {
                *moved = true;
            }
        }
    }

    /// Ends the cycle. Returns `true` when it counts as a click.
    pub fn pointer_up(&mut self, pos: Pos2) -> bool {
        self.pointer_move(pos);
        match std::mem::take(&mut self.phase) {
            PointerPhase::Pressed { moved, .. } => !moved,
            PointerPhase::Idle => false,
        }
    }

    /// Drop an in-flight press without reporting a click
    pub fn cancel(&mut self) {
        self.phase = PointerPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_without_motion() {
        let mut t = PointerTracker::default();
        t.pointer_down(Pos2::new(10.0, 10.0));
        assert!(t.pointer_up(Pos2::new(10.0, 10.0)));
        assert_eq!(t.phase(), PointerPhase::Idle);
    }

    #[test]
    fn test_jitter_under_threshold_is_click() {
        let mut t = PointerTracker::default();
        t.pointer_down(Pos2::new(10.0, 10.0));
        t.pointer_move(Pos2::new(11.0, 11.0));
        assert!(t.pointer_up(Pos2::new(11.0, 10.0)));
    }

    #[test]
    fn test_drag_suppresses_click() {
        let mut t = PointerTracker::default();
        t.pointer_down(Pos2::new(10.0, 10.0));
        t.pointer_move(Pos2::new(40.0, 10.0));
        // Returning to the origin does not clear the drag
        t.pointer_move(Pos2::new(10.0, 10.0));
        assert!(!t.pointer_up(Pos2::new(10.0, 10.0)));
    }

    #[test]
    fn test_release_far_away_is_drag() {
        let mut t = PointerTracker::default();
        t.pointer_down(Pos2::new(0.0, 0.0));
        assert!(!t.pointer_up(Pos2::new(50.0, 0.0)));
    }

    #[test]
    fn test_up_without_down_ignored() {
        let mut t = PointerTracker::default();
        assert!(!t.pointer_up(Pos2::new(0.0, 0.0)));
        t.pointer_move(Pos2::new(5.0, 5.0));
        assert_eq!(t.phase(), PointerPhase::Idle);
    }

    #[test]
    fn test_new_press_clears_moved() {
        let mut t = PointerTracker::default();
        t.pointer_down(Pos2::new(0.0, 0.0));
        t.pointer_move(Pos2::new(30.0, 0.0));
        t.pointer_down(Pos2::new(0.0, 0.0));
        assert_eq!(
            t.phase(),
            PointerPhase::Pressed {
                origin: Pos2::new(0.0, 0.0),
                moved: false
            }
        );
    }
}
