// One error type for the whole crate.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Layer;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening/decoding the picture failed
    #[error("image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("image has no pixels: {path}")]
    EmptyImage { path: PathBuf },

    /// A layer buffer does not match the source it copies from
    #[error("{layer} layer is {got:?}, source is {expected:?}")]
    SurfaceMismatch {
        layer: Layer,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// An action was recorded before any stroke was started
    #[error("no active stroke to record into")]
    NoActiveStroke,
}
