// One editing session: the surfaces, the brush, the current layer, the painting guard
// and the stroke history, all owned here and driven by plain method calls.
// Visual expectation: while the left button is held, every pointer sample moves a
// brush-sized square of the picture from the layer you look at into the other one.

use tracing::{debug, info, trace};

use crate::brush::Brush;
use crate::error::Result;
use crate::history::{Action, Replay, StrokeHistory};
use crate::input::{BrushCommand, InputEvent, InputSource};
use crate::surface::{RasterSurfaces, transfer_region};
use crate::types::{Layer, Point, Rect};

pub struct Session<S> {
    surfaces: S,
    history: StrokeHistory,
    brush: Brush,
    current_layer: Layer,
    is_painting: bool, // true between pointer-down and pointer-up
    attached: bool,    // true between start() and stop()
    pending: Vec<InputEvent>,
}

impl<S: RasterSurfaces> Session<S> {
    pub fn new(surfaces: S, brush: Brush) -> Self {
        Self {
            surfaces,
            history: StrokeHistory::new(),
            brush,
            current_layer: Layer::Image,
            is_painting: false,
            attached: false,
            pending: Vec::new(),
        }
    }

    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn brush_size(&self) -> u32 {
        self.brush.size()
    }

    /// Pixels the next dab at `pos` would move.
    pub fn footprint(&self, pos: Point) -> Rect {
        self.brush.footprint(pos)
    }

    pub fn current_layer(&self) -> Layer {
        self.current_layer
    }

    pub fn is_painting(&self) -> bool {
        self.is_painting
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /* ---------- Lifecycle ---------- */

    /// Begin accepting input through `pump`.
    pub fn start(&mut self) {
        self.attached = true;
        info!(layer = %self.current_layer, brush = self.brush.size(), "session.start");
    }

    /// Stop accepting input. A gesture still in progress simply ends.
    pub fn stop(&mut self) {
        self.attached = false;
        self.is_painting = false;
        info!(strokes = self.history.len(), "session.stop");
    }

    /// Drain `source` and dispatch its events, oldest first.
    /// While detached the events are still drained, then dropped.
    /// Returns the first error; later events in the batch are still handled.
    pub fn pump<I>(&mut self, source: &mut I) -> Result<()>
    where
        I: InputSource + ?Sized,
    {
        let mut events = std::mem::take(&mut self.pending);
        source.poll_events(&mut events);

        let mut first_err = None;
        if self.attached {
            for event in events.drain(..) {
                if let Err(e) = self.dispatch(event) {
                    first_err.get_or_insert(e);
                }
            }
        }
        events.clear();
        self.pending = events; // keep the allocation for the next frame

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Route one input event to the matching operation.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerDown(pos) => self.on_pointer_down(pos)?,
            InputEvent::PointerMove(pos) => self.on_pointer_move(pos)?,
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::SwitchLayer(layer) => self.change_layer(layer),
            InputEvent::ToggleLayer => self.change_layer(self.current_layer.other()),
            InputEvent::Brush(BrushCommand::Increase) => {
                self.increase_brush_size();
            }
            InputEvent::Brush(BrushCommand::Decrease) => {
                self.decrease_brush_size();
            }
            InputEvent::Brush(BrushCommand::Reset) => {
                self.reset_brush_size();
            }
            InputEvent::Undo => {
                self.undo()?;
            }
            InputEvent::Redo => {
                self.redo()?;
            }
        }
        Ok(())
    }

    /* ---------- Pointer gesture ---------- */

    /// Start a gesture: open a new stroke, then paint once right where the pointer went down.
    pub fn on_pointer_down(&mut self, pos: Point) -> Result<()> {
        self.is_painting = true;
        self.history.new_stroke();
        self.transfer(pos)?;
        Ok(())
    }

    /// Keep painting while the button is held; ignored otherwise.
    pub fn on_pointer_move(&mut self, pos: Point) -> Result<()> {
        if self.is_painting {
            self.transfer(pos)?;
        }
        Ok(())
    }

    pub fn on_pointer_up(&mut self) {
        self.is_painting = false;
    }

    /// Move one brush footprint out of the current layer into the other one and record it.
    /// Nothing is recorded if the copy failed (and then nothing was cleared either).
    pub fn transfer(&mut self, pos: Point) -> Result<Action> {
        let rect = self.footprint(pos);
        // Pixels leave the layer being looked at and land on the other one.
        let destination = self.current_layer.other();

        transfer_region(&mut self.surfaces, destination, rect)?;

        let action = Action::Transfer { destination, rect };
        self.history.add_action(action)?;
        trace!(?rect, %destination, "session.transfer");
        Ok(action)
    }

    /* ---------- Commands ---------- */

    pub fn change_layer(&mut self, layer: Layer) {
        if self.current_layer != layer {
            info!(from = %self.current_layer, to = %layer, "session.change_layer");
        }
        self.current_layer = layer;
    }

    pub fn increase_brush_size(&mut self) -> u32 {
        let size = self.brush.increase();
        debug!(size, "brush.increase");
        size
    }

    pub fn decrease_brush_size(&mut self) -> u32 {
        let size = self.brush.decrease();
        debug!(size, "brush.decrease");
        size
    }

    pub fn reset_brush_size(&mut self) -> u32 {
        let size = self.brush.reset();
        debug!(size, "brush.reset");
        size
    }

    /// Revert the last stroke. Dropped while a gesture is in progress.
    pub fn undo(&mut self) -> Result<Replay> {
        self.history.undo(self.is_painting, &mut self.surfaces)
    }

    /// Re-apply the next stroke. Dropped while a gesture is in progress.
    pub fn redo(&mut self) -> Result<Replay> {
        self.history.redo(self.is_painting, &mut self.surfaces)
    }
}
