//! Brush-based image masking editor.
//!
//! A picture is loaded into an untouched source buffer plus two editable
//! layers, `image` and `mask`. Painting moves square brush footprints from the
//! layer on screen into the other one; every gesture is recorded as a stroke
//! and can be undone or redone as a whole.
//!
//! The core ([`session`], [`history`], [`surface`], [`brush`]) does not know
//! about windows: a host feeds it [`input::InputEvent`]s and reads the layers
//! back. [`draw`] is the minifb host used by the binary.

pub mod brush;
pub mod config;
pub mod draw;
pub mod error;
pub mod history;
pub mod input;
pub mod loader;
pub mod session;
pub mod surface;
pub mod types;

pub use brush::Brush;
pub use error::{Error, Result};
pub use history::{Action, Replay, Stroke, StrokeHistory};
pub use session::Session;
pub use surface::{RasterSurfaces, SurfacePair};
pub use types::{FrameBuffer, Layer, Point, Rect};
