use image::{imageops, RgbaImage};

use crate::geometry::{BufferRect, BufferSize};

/// Produces an independent raster containing exactly the selected region of
/// `source`.
///
/// `selection` is expressed in the editing buffer's pixel space, which may
/// differ from the source's native resolution; the rectangle is rescaled by
/// the native/buffer ratio first so the crop is pixel-accurate against the
/// original asset even if the editing buffer is ever downscaled. The scaled
/// rectangle is then clamped to the image bounds, and selections that round
/// or clamp to zero area yield `None` rather than a degenerate asset.
pub fn extract(
    source: &RgbaImage,
    selection: BufferRect,
    buffer: BufferSize,
) -> Option<RgbaImage> {
    if selection.is_empty() || buffer.width == 0 || buffer.height == 0 {
        return None;
    }

    let scale_x = f64::from(source.width()) / f64::from(buffer.width);
    let scale_y = f64::from(source.height()) / f64::from(buffer.height);
    let native = BufferRect::new(
        selection.x * scale_x,
        selection.y * scale_y,
        selection.width * scale_x,
        selection.height * scale_y,
    );

    let region = native.to_pixel_region(BufferSize::new(source.width(), source.height()))?;
    Some(imageops::crop_imm(source, region.x, region.y, region.width, region.height).to_image())
}
