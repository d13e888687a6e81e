// The raster surfaces a transfer reads from and writes into.
// Three buffers: the untouched `source`, plus the editable `image` and `mask` layers.
// Every copy reads from `source`, so painting the same spot twice changes nothing new.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, Layer, Rect, TRANSPARENT};

/// What the stroke history needs from the pixel side.
///
/// Calls must take effect in the order they are issued. Out-of-bounds parts of
/// a rect are clamped away; a rect fully off the buffer is a no-op.
pub trait RasterSurfaces {
    /// Copy `rect` from the source buffer into `destination` at the same coordinates.
    /// On error the destination must be left untouched.
    fn copy_region(&mut self, destination: Layer, rect: Rect) -> Result<()>;

    /// Make every pixel of `rect` on `destination` transparent.
    fn clear_region(&mut self, destination: Layer, rect: Rect);
}

/// Forward effect of a transfer: fill `destination` from the source, then clear the other layer.
/// If the copy fails the clear is skipped, so the buffers never half-apply a transfer.
pub fn transfer_region<S>(surfaces: &mut S, destination: Layer, rect: Rect) -> Result<()>
where
    S: RasterSurfaces + ?Sized,
{
    surfaces.copy_region(destination, rect)?;
    surfaces.clear_region(destination.other(), rect);
    Ok(())
}

/// In-memory surfaces backed by three equally sized frame buffers.
/// Writes are synchronous: each one is finished before the call returns.
#[derive(Clone, Debug)]
pub struct SurfacePair {
    source: FrameBuffer,
    image: FrameBuffer,
    mask: FrameBuffer,
}

impl SurfacePair {
    /// Image layer starts as the full picture, mask layer starts empty.
    pub fn new(source: FrameBuffer) -> Self {
        let image = source.clone();
        let mask = FrameBuffer::new(source.width, source.height);
        Self { source, image, mask }
    }

    /// Build from existing layers; they must all match the source size.
    pub fn from_layers(source: FrameBuffer, image: FrameBuffer, mask: FrameBuffer) -> Result<Self> {
        for (layer, fb) in [(Layer::Image, &image), (Layer::Mask, &mask)] {
            if fb.dimensions() != source.dimensions() {
                return Err(Error::SurfaceMismatch {
                    layer,
                    expected: source.dimensions(),
                    got: fb.dimensions(),
                });
            }
        }
        Ok(Self { source, image, mask })
    }

    pub fn source(&self) -> &FrameBuffer {
        &self.source
    }

    pub fn layer(&self, layer: Layer) -> &FrameBuffer {
        match layer {
            Layer::Image => &self.image,
            Layer::Mask => &self.mask,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut FrameBuffer {
        match layer {
            Layer::Image => &mut self.image,
            Layer::Mask => &mut self.mask,
        }
    }
}

impl RasterSurfaces for SurfacePair {
    fn copy_region(&mut self, destination: Layer, rect: Rect) -> Result<()> {
        // Borrow the source and the destination at the same time (disjoint fields).
        let Self { source, image, mask } = self;
        let dst = match destination {
            Layer::Image => image,
            Layer::Mask => mask,
        };

        if dst.dimensions() != source.dimensions() {
            return Err(Error::SurfaceMismatch {
                layer: destination,
                expected: source.dimensions(),
                got: dst.dimensions(),
            });
        }

        let Some((x0, y0, x1, y1)) = rect.clamp_to(source.width, source.height) else {
            return Ok(()); // brush entirely off the canvas
        };

        // Replace, not blend: the destination ends up holding exactly the source pixels.
        for y in y0..y1 {
            let row = y * source.width;
            dst.pixels[row + x0..row + x1].copy_from_slice(&source.pixels[row + x0..row + x1]);
        }
        Ok(())
    }

    fn clear_region(&mut self, destination: Layer, rect: Rect) {
        let dst = self.layer_mut(destination);
        let Some((x0, y0, x1, y1)) = rect.clamp_to(dst.width, dst.height) else {
            return;
        };
        for y in y0..y1 {
            let row = y * dst.width;
            dst.pixels[row + x0..row + x1].fill(TRANSPARENT);
        }
    }
}
