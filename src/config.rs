// Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::brush::DEFAULT_BRUSH_SIZE;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 8.0;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "mask-brush",
    version,
    about = "Paint regions of a picture between an image layer and a mask layer"
)]
pub struct Config {
    /// Picture to edit (PNG, JPEG, ...)
    pub image: PathBuf,

    /// Starting brush size in canvas pixels
    #[arg(long, default_value_t = DEFAULT_BRUSH_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub brush_size: u32,

    /// Display zoom; 1.0 shows one screen pixel per canvas pixel
    #[arg(long, default_value_t = 1.0, value_parser = parse_zoom)]
    pub zoom: f32,

    /// Window title
    #[arg(long, default_value = "Mask Brush")]
    pub title: String,
}

impl Config {
    /// Window size for a canvas of `canvas` pixels at the configured zoom.
    pub fn window_size(&self, canvas: (usize, usize)) -> (usize, usize) {
        let scale = |v: usize| ((v as f32 * self.zoom).round() as usize).max(1);
        (scale(canvas.0), scale(canvas.1))
    }
}

fn parse_zoom(s: &str) -> Result<f32, String> {
    let zoom: f32 = s.parse().map_err(|e| format!("not a number: {e}"))?;
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(format!("zoom must be between {MIN_ZOOM} and {MAX_ZOOM}"));
    }
    Ok(zoom)
}
