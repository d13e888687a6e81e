// Stroke history: every paint gesture is recorded as one stroke of transfer actions,
// and undo/redo replay whole strokes against the surfaces.

use tracing::debug;

use crate::error::{Error, Result};
use crate::surface::{RasterSurfaces, transfer_region};
use crate::types::{Layer, Rect};

/// One recorded pixel-region transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// `destination` received source pixels in `rect`; the other layer was cleared there.
    Transfer { destination: Layer, rect: Rect },
}

impl Action {
    /// Re-apply what painting did.
    pub fn apply_forward<S>(&self, surfaces: &mut S) -> Result<()>
    where
        S: RasterSurfaces + ?Sized,
    {
        match *self {
            Action::Transfer { destination, rect } => transfer_region(surfaces, destination, rect),
        }
    }

    /// Swap the buffer roles: restore the cleared layer, clear the filled one.
    pub fn apply_inverse<S>(&self, surfaces: &mut S) -> Result<()>
    where
        S: RasterSurfaces + ?Sized,
    {
        match *self {
            Action::Transfer { destination, rect } => {
                transfer_region(surfaces, destination.other(), rect)
            }
        }
    }
}

/// Actions from one pointer-down .. pointer-up gesture, in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stroke {
    actions: Vec<Action>,
}

impl Stroke {
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// What an undo/redo request ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replay {
    /// Stroke `stroke` was replayed, touching `actions` actions.
    Applied { stroke: usize, actions: usize },
    /// A gesture is in progress; the request is dropped.
    Painting,
    /// Already at the oldest/newest stroke.
    NothingToReplay,
}

/// Linear undo/redo stack of strokes.
///
/// `applied` counts strokes currently in effect, so the cursor (`current_id`)
/// is `applied - 1` and `-1` means "before the first stroke".
#[derive(Clone, Debug, Default)]
pub struct StrokeHistory {
    strokes: Vec<Stroke>,
    applied: usize,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the most recently applied stroke, `-1` when none is.
    pub fn current_id(&self) -> isize {
        self.applied as isize - 1
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.strokes.len()
    }

    /// Open a fresh, empty stroke after the cursor.
    /// Any strokes that were undone are dropped: history does not branch.
    pub fn new_stroke(&mut self) {
        let dropped = self.strokes.len() - self.applied;
        self.strokes.truncate(self.applied);
        self.strokes.push(Stroke::default());
        self.applied += 1;
        debug!(stroke = self.applied - 1, dropped, "history.new_stroke");
    }

    /// Append to the stroke under the cursor.
    pub fn add_action(&mut self, action: Action) -> Result<()> {
        let Some(index) = self.applied.checked_sub(1) else {
            return Err(Error::NoActiveStroke);
        };
        self.strokes[index].actions.push(action);
        Ok(())
    }

    /// Revert the current stroke, last action first.
    ///
    /// If a replayed copy fails the error is returned and the cursor stays put.
    /// Replays always read from the source, so retrying converges.
    pub fn undo<S>(&mut self, is_painting: bool, surfaces: &mut S) -> Result<Replay>
    where
        S: RasterSurfaces + ?Sized,
    {
        if is_painting {
            return Ok(Replay::Painting);
        }
        let Some(index) = self.applied.checked_sub(1) else {
            return Ok(Replay::NothingToReplay);
        };

        let stroke = &self.strokes[index];
        // Reverse order: later actions may cover pixels an earlier one touched.
        for action in stroke.actions.iter().rev() {
            action.apply_inverse(surfaces)?;
        }
        let actions = stroke.len();

        self.applied -= 1;
        debug!(stroke = index, actions, "history.undo");
        Ok(Replay::Applied { stroke: index, actions })
    }

    /// Re-apply the stroke after the cursor, first action first.
    pub fn redo<S>(&mut self, is_painting: bool, surfaces: &mut S) -> Result<Replay>
    where
        S: RasterSurfaces + ?Sized,
    {
        if is_painting {
            return Ok(Replay::Painting);
        }
        let index = self.applied;
        let Some(stroke) = self.strokes.get(index) else {
            return Ok(Replay::NothingToReplay);
        };

        for action in stroke.actions.iter() {
            action.apply_forward(surfaces)?;
        }
        let actions = stroke.len();

        self.applied += 1;
        debug!(stroke = index, actions, "history.redo");
        Ok(Replay::Applied { stroke: index, actions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfacePair;
    use crate::types::FrameBuffer;

    fn transfer(destination: Layer, x: i32) -> Action {
        Action::Transfer { destination, rect: Rect::new(x, 0, 2, 2) }
    }

    fn pair() -> SurfacePair {
        SurfacePair::new(FrameBuffer::filled(8, 8, 0xFF11_2233))
    }

    #[test]
    fn starts_before_first_stroke() {
        let history = StrokeHistory::new();
        assert_eq!(history.current_id(), -1);
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn add_action_without_stroke_fails_fast() {
        let mut history = StrokeHistory::new();
        let err = history.add_action(transfer(Layer::Mask, 0)).unwrap_err();
        assert!(matches!(err, Error::NoActiveStroke));
    }

    #[test]
    fn new_stroke_advances_cursor() {
        let mut history = StrokeHistory::new();
        history.new_stroke();
        history.add_action(transfer(Layer::Mask, 0)).unwrap();
        history.new_stroke();
        assert_eq!(history.current_id(), 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.stroke(0).map(Stroke::len), Some(1));
        assert_eq!(history.stroke(1).map(Stroke::len), Some(0));
    }

    #[test]
    fn new_stroke_after_undo_drops_the_redo_tail() {
        let mut surfaces = pair();
        let mut history = StrokeHistory::new();
        for x in 0..3 {
            history.new_stroke();
            history.add_action(transfer(Layer::Mask, x * 2)).unwrap();
        }
        history.undo(false, &mut surfaces).unwrap();
        history.undo(false, &mut surfaces).unwrap();
        assert_eq!(history.current_id(), 0);

        history.new_stroke();
        assert_eq!(history.current_id(), 1);
        assert_eq!(history.len(), 2);
        assert!(history.stroke(1).is_some_and(Stroke::is_empty));
        assert_eq!(history.redo(false, &mut surfaces).unwrap(), Replay::NothingToReplay);
    }

    #[test]
    fn painting_blocks_undo_and_redo() {
        let mut surfaces = pair();
        let mut history = StrokeHistory::new();
        history.new_stroke();
        history.add_action(transfer(Layer::Mask, 0)).unwrap();

        assert_eq!(history.undo(true, &mut surfaces).unwrap(), Replay::Painting);
        assert_eq!(history.current_id(), 0);

        history.undo(false, &mut surfaces).unwrap();
        assert_eq!(history.redo(true, &mut surfaces).unwrap(), Replay::Painting);
        assert_eq!(history.current_id(), -1);
    }

    #[test]
    fn boundaries_are_quiet_no_ops() {
        let mut surfaces = pair();
        let before = surfaces.clone();
        let mut history = StrokeHistory::new();
        assert_eq!(history.undo(false, &mut surfaces).unwrap(), Replay::NothingToReplay);
        assert_eq!(history.redo(false, &mut surfaces).unwrap(), Replay::NothingToReplay);
        assert_eq!(history.current_id(), -1);
        assert_eq!(surfaces.layer(Layer::Image), before.layer(Layer::Image));
        assert_eq!(surfaces.layer(Layer::Mask), before.layer(Layer::Mask));
    }

    #[test]
    fn undo_redo_report_the_replayed_stroke() {
        let mut surfaces = pair();
        let mut history = StrokeHistory::new();
        history.new_stroke();
        history.add_action(transfer(Layer::Mask, 0)).unwrap();
        history.add_action(transfer(Layer::Mask, 1)).unwrap();

        assert_eq!(
            history.undo(false, &mut surfaces).unwrap(),
            Replay::Applied { stroke: 0, actions: 2 }
        );
        assert!(history.can_redo());
        assert_eq!(
            history.redo(false, &mut surfaces).unwrap(),
            Replay::Applied { stroke: 0, actions: 2 }
        );
        assert_eq!(history.current_id(), 0);
    }

    #[test]
    fn inverse_swaps_buffer_roles() {
        let mut surfaces = pair();
        let action = transfer(Layer::Mask, 0);
        action.apply_forward(&mut surfaces).unwrap();
        assert_eq!(surfaces.layer(Layer::Mask).get(0, 0), Some(0xFF11_2233));
        assert_eq!(surfaces.layer(Layer::Image).get(0, 0), Some(0));

        action.apply_inverse(&mut surfaces).unwrap();
        assert_eq!(surfaces.layer(Layer::Mask).get(0, 0), Some(0));
        assert_eq!(surfaces.layer(Layer::Image).get(0, 0), Some(0xFF11_2233));
    }
}
