// What you SEE now:
// • The picture, centred on a 16:7 canvas. Cleared pixels show a checkerboard.
// • Hold Left Mouse: the square under the brush moves to the other layer.
// • Tab toggles the layer you look at (I = image, M = mask).
// • = / - grow or shrink the brush, 0 resets it to 15.
// • Z undoes the last stroke, Y redoes it. ESC quits.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mask_brush::brush::Brush;
use mask_brush::config::Config;
use mask_brush::draw::{Drawer, compose_view, draw_brush_outline, draw_text_5x7, rect_to_window};
use mask_brush::error::Error;
use mask_brush::loader::load_source;
use mask_brush::session::Session;
use mask_brush::surface::SurfacePair;
use mask_brush::types::{FrameBuffer, Layer};

fn main() -> Result<(), Error> {
    init_tracing();
    let config = Config::parse();

    /* --- Picture + window setup ---
       Visual: window opens showing the full picture on the image layer. */
    let source = load_source(&config.image)?;
    let canvas_size = source.dimensions();
    let window_size = config.window_size(canvas_size);
    let mut drawer = Drawer::new(&config.title, window_size, canvas_size)?;

    /* --- Editing session ---
       Visual: nothing yet; the mask layer is empty until you paint. */
    let mut session = Session::new(SurfacePair::new(source), Brush::new(config.brush_size));
    session.start();

    /* --- Reusable screen buffer (window sized) --- */
    let mut screen = FrameBuffer::new(window_size.0, window_size.1);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs: paint, switch layers, resize the brush, undo/redo.
           A failed transfer is logged and skipped; the session stays consistent. */
        if let Err(e) = session.pump(&mut drawer) {
            warn!(error = %e, "input dropped");
        }

        /* 2) Show the layer being painted on. */
        let layer = session.current_layer();
        compose_view(session.surfaces().layer(layer), &mut screen);

        /* 3) Brush outline at the cursor, then the HUD. */
        if let Some(pos) = drawer.hover() {
            let footprint = session.footprint(pos);
            let corners = rect_to_window(footprint, drawer.window_size(), canvas_size);
            draw_brush_outline(&mut screen, corners, 0x00_FF_CC_33); // visual: yellow square
        }
        draw_text_5x7(&mut screen, 8, 8, &hud_text(&session), 0x00_FF_FF_FF);

        /* 4) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;
    }

    session.stop();
    info!("bye");
    Ok(())
}

/// RUST_LOG controls verbosity; defaults to info.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// "IMAGE | BRUSH 15 | STROKE 2/3 | UNDO REDO"; "| PAINTING" mid-gesture.
fn hud_text(session: &Session<SurfacePair>) -> String {
    let layer = match session.current_layer() {
        Layer::Image => "IMAGE",
        Layer::Mask => "MASK",
    };
    let history = session.history();
    let mut hud = format!(
        "{} | BRUSH {} | STROKE {}/{}",
        layer,
        session.brush_size(),
        history.current_id() + 1,
        history.len()
    );
    if session.is_painting() {
        hud.push_str(" | PAINTING");
    } else if history.can_undo() || history.can_redo() {
        hud.push_str(" |");
        if history.can_undo() {
            hud.push_str(" UNDO");
        }
        if history.can_redo() {
            hud.push_str(" REDO");
        }
    }
    hud
}
