//! Drag gesture tracking
//!
//! A plain two-state machine driven by whatever pointer events the
//! windowing layer delivers. Window movement is 1:1 with the pointer, no
//! smoothing.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        /// Pointer position at press time, in window-local coordinates.
        pointer_origin: Point,
    },
}

#[derive(Debug)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub fn new() -> Self {
        Self { state: DragState::Idle }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer pressed inside the window body.
    pub fn pointer_down(&mut self, local: Point) {
        self.state = DragState::Dragging { pointer_origin: local };
    }

    /// Pointer moved. While a drag is active, returns the window origin
    /// that keeps the grab point under the pointer. Moves with no prior
    /// press are ignored.
    pub fn pointer_moved(&mut self, local: Point, window_origin: Point) -> Option<Point> {
        match self.state {
            DragState::Dragging { pointer_origin } => Some(Point::new(
                window_origin.x + (local.x - pointer_origin.x),
                window_origin.y + (local.y - pointer_origin.y),
            )),
            DragState::Idle => None,
        }
    }

    /// Pointer released. True when this actually ended a drag.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::DragTracker;
    use crate::geometry::Point;

    #[test]
    fn move_without_press_is_ignored() {
        let mut tracker = DragTracker::new();
        assert_eq!(
            tracker.pointer_moved(Point::new(50.0, 50.0), Point::new(0.0, 0.0)),
            None
        );
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn drag_applies_one_to_one_delta() {
        let mut tracker = DragTracker::new();
        tracker.pointer_down(Point::new(20.0, 30.0));

        let new_origin = tracker
            .pointer_moved(Point::new(25.0, 28.0), Point::new(100.0, 100.0))
            .expect("drag should be active");
        assert_eq!(new_origin, Point::new(105.0, 98.0));
    }

    #[test]
    fn release_ends_the_drag() {
        let mut tracker = DragTracker::new();
        tracker.pointer_down(Point::new(0.0, 0.0));
        assert!(tracker.pointer_up());
        assert!(!tracker.is_dragging());
        assert_eq!(
            tracker.pointer_moved(Point::new(10.0, 10.0), Point::new(0.0, 0.0)),
            None
        );
    }

    #[test]
    fn release_without_press_reports_no_drag() {
        let mut tracker = DragTracker::new();
        assert!(!tracker.pointer_up());
    }

    #[test]
    fn successive_moves_track_the_pointer() {
        let mut tracker = DragTracker::new();
        tracker.pointer_down(Point::new(10.0, 10.0));

        // After the window moves, the pointer sits at the grab point again,
        // so an unmoved pointer produces no further displacement.
        let origin = tracker
            .pointer_moved(Point::new(14.0, 10.0), Point::new(0.0, 0.0))
            .unwrap();
        assert_eq!(origin, Point::new(4.0, 0.0));
        let origin = tracker
            .pointer_moved(Point::new(10.0, 10.0), origin)
            .unwrap();
        assert_eq!(origin, Point::new(4.0, 0.0));
    }
}
