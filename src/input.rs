// Host-neutral input: whatever window or test harness drives the session
// turns its raw events into these and hands them over through `InputSource`.

use crate::types::{Layer, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushCommand {
    Increase,
    Decrease,
    Reset,
}

/// Everything the editor reacts to. Pointer positions are already in buffer pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    SwitchLayer(Layer),
    ToggleLayer,
    Brush(BrushCommand),
    Undo,
    Redo,
}

/// Something that produces input events, polled once per frame.
pub trait InputSource {
    /// Append every event that happened since the last poll, oldest first.
    fn poll_events(&mut self, out: &mut Vec<InputEvent>);
}

/// A fixed queue of events, drained on the first poll. Handy for scripted replays.
impl InputSource for Vec<InputEvent> {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) {
        out.append(self);
    }
}

/// Turns per-frame "is the button held, where is the pointer" samples into
/// down / move / up events. Moves are only reported when the position changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Feed one sample; returns the event it produces, if any.
    /// A press with no known position waits until the pointer is over the window.
    pub fn update(&mut self, button_down: bool, pos: Option<Point>) -> Option<InputEvent> {
        let event = match (self.down, button_down, pos) {
            (false, true, Some(p)) => {
                self.down = true;
                Some(InputEvent::PointerDown(p))
            }
            (true, true, Some(p)) if self.last != Some(p) => Some(InputEvent::PointerMove(p)),
            (true, false, _) => {
                self.down = false;
                Some(InputEvent::PointerUp)
            }
            _ => None,
        };
        if pos.is_some() {
            self.last = pos;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_drag_release() {
        let mut t = PointerTracker::default();
        let p = Point::new(3, 4);
        let q = Point::new(5, 4);
        assert_eq!(t.update(false, Some(p)), None);
        assert_eq!(t.update(true, Some(p)), Some(InputEvent::PointerDown(p)));
        assert_eq!(t.update(true, Some(p)), None);
        assert_eq!(t.update(true, Some(q)), Some(InputEvent::PointerMove(q)));
        assert_eq!(t.update(false, Some(q)), Some(InputEvent::PointerUp));
        assert!(!t.is_down());
    }

    #[test]
    fn press_without_position_waits() {
        let mut t = PointerTracker::default();
        assert_eq!(t.update(true, None), None);
        assert!(!t.is_down());
        let p = Point::new(1, 1);
        assert_eq!(t.update(true, Some(p)), Some(InputEvent::PointerDown(p)));
    }

    #[test]
    fn release_off_window_still_ends_gesture() {
        let mut t = PointerTracker::default();
        t.update(true, Some(Point::new(0, 0)));
        assert_eq!(t.update(false, None), Some(InputEvent::PointerUp));
    }

    #[test]
    fn vec_source_drains_once() {
        let mut queued = vec![InputEvent::Undo, InputEvent::Redo];
        let mut out = Vec::new();
        queued.poll_events(&mut out);
        queued.poll_events(&mut out);
        assert_eq!(out, vec![InputEvent::Undo, InputEvent::Redo]);
    }
}
