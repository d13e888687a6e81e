//! Shared test doubles.

#![allow(dead_code)]

use mask_brush::error::{Error, Result};
use mask_brush::surface::RasterSurfaces;
use mask_brush::types::{Layer, Rect};

/// One call made against the surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Copy(Layer, Rect),
    Clear(Layer, Rect),
}

/// Records every copy/clear instead of touching pixels.
/// `fail_copies_to` makes copies into that layer fail, for error-path tests.
#[derive(Debug, Default)]
pub struct RecordingSurfaces {
    pub ops: Vec<Op>,
    pub fail_copies_to: Option<Layer>,
}

impl RecordingSurfaces {
    pub fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }
}

impl RasterSurfaces for RecordingSurfaces {
    fn copy_region(&mut self, destination: Layer, rect: Rect) -> Result<()> {
        if self.fail_copies_to == Some(destination) {
            return Err(Error::SurfaceMismatch {
                layer: destination,
                expected: (0, 0),
                got: (0, 0),
            });
        }
        self.ops.push(Op::Copy(destination, rect));
        Ok(())
    }

    fn clear_region(&mut self, destination: Layer, rect: Rect) {
        self.ops.push(Op::Clear(destination, rect));
    }
}
