use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::geometry::{BufferRect, BufferSize, PixelRegion};

const BORDER_THICKNESS: u32 = 2;
const BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("overlay buffer is {buffer_width}x{buffer_height} but source is {source_width}x{source_height}")]
    SizeMismatch {
        buffer_width: u32,
        buffer_height: u32,
        source_width: u32,
        source_height: u32,
    },
}

/// Redraws the crop overlay from scratch: source image, 50% black dim over
/// everything, the selection fully revealed, a solid border around it and
/// rule-of-thirds guides inside it.
///
/// Always a full-surface redraw with no incremental patching, so the overlay
/// stays correct under arbitrarily fast pointer movement, and drawing the
/// same rectangle twice is pixel-identical. The only allocation-sized work
/// is the one source blit per call.
pub fn draw(
    buffer: &mut RgbaImage,
    source: &RgbaImage,
    selection: BufferRect,
) -> Result<(), OverlayError> {
    if buffer.dimensions() != source.dimensions() {
        return Err(OverlayError::SizeMismatch {
            buffer_width: buffer.width(),
            buffer_height: buffer.height(),
            source_width: source.width(),
            source_height: source.height(),
        });
    }

    for (dst, src) in buffer.pixels_mut().zip(source.pixels()) {
        *dst = dimmed(*src);
    }

    let bounds = BufferSize::new(buffer.width(), buffer.height());
    let Some(region) = selection.to_pixel_region(bounds) else {
        // Nothing to reveal; the fully dimmed frame is the correct overlay
        // for an empty or out-of-bounds selection.
        return Ok(());
    };

    for y in region.y..region.bottom() {
        for x in region.x..region.right() {
            buffer.put_pixel(x, y, *source.get_pixel(x, y));
        }
    }

    stroke_border(buffer, region);
    stroke_thirds_guides(buffer, region);
    Ok(())
}

/// Blits the bare source image into the buffer. Used for the initial frame
/// of a crop session, before any selection exists.
pub fn draw_source(buffer: &mut RgbaImage, source: &RgbaImage) -> Result<(), OverlayError> {
    if buffer.dimensions() != source.dimensions() {
        return Err(OverlayError::SizeMismatch {
            buffer_width: buffer.width(),
            buffer_height: buffer.height(),
            source_width: source.width(),
            source_height: source.height(),
        });
    }
    buffer.copy_from_slice(source.as_raw());
    Ok(())
}

/// 50% black mask composited over an opaque pixel.
fn dimmed(pixel: Rgba<u8>) -> Rgba<u8> {
    let Rgba([r, g, b, a]) = pixel;
    Rgba([r / 2, g / 2, b / 2, a])
}

/// Partially transparent white, lighter than the border stroke.
fn lightened(pixel: Rgba<u8>) -> Rgba<u8> {
    let Rgba([r, g, b, a]) = pixel;
    let lift = |c: u8| ((u16::from(c) * 3 + 255 * 2) / 5) as u8;
    Rgba([lift(r), lift(g), lift(b), a])
}

fn fill_rows(buffer: &mut RgbaImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Rgba<u8>) {
    let x1 = x1.min(buffer.width());
    let y1 = y1.min(buffer.height());
    for y in y0..y1 {
        for x in x0..x1 {
            buffer.put_pixel(x, y, color);
        }
    }
}

fn stroke_border(buffer: &mut RgbaImage, region: PixelRegion) {
    let t = BORDER_THICKNESS;
    // Top and bottom edges.
    fill_rows(buffer, region.x, region.right(), region.y, region.y + t, BORDER_COLOR);
    fill_rows(
        buffer,
        region.x,
        region.right(),
        region.bottom().saturating_sub(t),
        region.bottom(),
        BORDER_COLOR,
    );
    // Left and right edges.
    fill_rows(buffer, region.x, region.x + t, region.y, region.bottom(), BORDER_COLOR);
    fill_rows(
        buffer,
        region.right().saturating_sub(t),
        region.right(),
        region.y,
        region.bottom(),
        BORDER_COLOR,
    );
}

/// Two vertical and two horizontal guide lines at the 1/3 and 2/3 positions
/// of the revealed window, blended over the image rather than painted solid.
fn stroke_thirds_guides(buffer: &mut RgbaImage, region: PixelRegion) {
    for step in [1, 2] {
        let gx = region.x + region.width * step / 3;
        if gx > region.x && gx < region.right() {
            for y in region.y..region.bottom() {
                let lighter = lightened(*buffer.get_pixel(gx, y));
                buffer.put_pixel(gx, y, lighter);
            }
        }
        let gy = region.y + region.height * step / 3;
        if gy > region.y && gy < region.bottom() {
            for x in region.x..region.right() {
                let lighter = lightened(*buffer.get_pixel(x, gy));
                buffer.put_pixel(x, gy, lighter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_source(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn draw_dims_outside_and_reveals_inside_the_selection() {
        let source = flat_source(100, 80, 200);
        let mut buffer = RgbaImage::new(100, 80);
        draw(&mut buffer, &source, BufferRect::new(20.0, 20.0, 40.0, 30.0))
            .expect("matching sizes should draw");

        // Outside the selection: halved by the 50% mask.
        assert_eq!(*buffer.get_pixel(0, 0), Rgba([100, 100, 100, 255]));
        assert_eq!(*buffer.get_pixel(99, 79), Rgba([100, 100, 100, 255]));
        // Inside, away from border and guides: original pixels.
        assert_eq!(*buffer.get_pixel(25, 25), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn draw_strokes_a_solid_border_on_the_selection_edge() {
        let source = flat_source(100, 80, 200);
        let mut buffer = RgbaImage::new(100, 80);
        draw(&mut buffer, &source, BufferRect::new(20.0, 20.0, 40.0, 30.0))
            .expect("matching sizes should draw");

        assert_eq!(*buffer.get_pixel(20, 20), Rgba([255, 255, 255, 255]));
        assert_eq!(*buffer.get_pixel(59, 49), Rgba([255, 255, 255, 255]));
        assert_eq!(*buffer.get_pixel(20, 35), Rgba([255, 255, 255, 255]));
        // Just outside the border: dimmed.
        assert_eq!(*buffer.get_pixel(19, 20), Rgba([100, 100, 100, 255]));
    }

    #[test]
    fn draw_places_thirds_guides_inside_the_selection() {
        let source = flat_source(120, 120, 100);
        let mut buffer = RgbaImage::new(120, 120);
        // Selection 0..90 on both axes; guides at 30 and 60.
        draw(&mut buffer, &source, BufferRect::new(0.0, 0.0, 90.0, 90.0))
            .expect("matching sizes should draw");

        let guide = *buffer.get_pixel(30, 45);
        let plain = *buffer.get_pixel(40, 45);
        assert_eq!(plain, Rgba([100, 100, 100, 255]));
        assert!(guide.0[0] > plain.0[0], "guide should be lighter than the image");
        assert!(
            guide.0[0] < 255,
            "guide should stay lighter than the solid border"
        );
        assert_eq!(guide, *buffer.get_pixel(60, 45));
        assert_eq!(guide, *buffer.get_pixel(45, 30));
        assert_eq!(guide, *buffer.get_pixel(45, 60));
    }

    #[test]
    fn draw_is_idempotent_for_the_same_selection() {
        let mut source = RgbaImage::new(64, 48);
        for (x, y, pixel) in source.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 4) as u8, (y * 5) as u8, 33, 255]);
        }
        let selection = BufferRect::new(10.0, 8.0, 30.0, 20.0);

        let mut first = RgbaImage::new(64, 48);
        draw(&mut first, &source, selection).expect("first draw should work");
        let mut second = first.clone();
        draw(&mut second, &source, selection).expect("second draw should work");
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn empty_selection_produces_a_fully_dimmed_frame() {
        let source = flat_source(40, 40, 80);
        let mut buffer = RgbaImage::new(40, 40);
        draw(&mut buffer, &source, BufferRect::new(5.0, 5.0, 0.0, 0.0))
            .expect("matching sizes should draw");
        assert!(buffer
            .pixels()
            .all(|pixel| *pixel == Rgba([40, 40, 40, 255])));
    }

    #[test]
    fn selection_overhanging_the_buffer_is_clamped_not_rejected() {
        let source = flat_source(40, 40, 80);
        let mut buffer = RgbaImage::new(40, 40);
        draw(&mut buffer, &source, BufferRect::new(30.0, 30.0, 50.0, 50.0))
            .expect("matching sizes should draw");
        // Clamped region 30..40 is revealed (its corner is border).
        assert_eq!(*buffer.get_pixel(35, 35), Rgba([80, 80, 80, 255]));
        assert_eq!(*buffer.get_pixel(10, 10), Rgba([40, 40, 40, 255]));
    }

    #[test]
    fn size_mismatch_is_reported() {
        let source = flat_source(10, 10, 10);
        let mut buffer = RgbaImage::new(12, 10);
        let err = draw(&mut buffer, &source, BufferRect::new(0.0, 0.0, 5.0, 5.0))
            .expect_err("mismatched sizes should fail");
        assert!(matches!(err, OverlayError::SizeMismatch { .. }));
    }

    #[test]
    fn draw_source_blits_the_image_unchanged() {
        let source = flat_source(16, 16, 123);
        let mut buffer = RgbaImage::new(16, 16);
        draw_source(&mut buffer, &source).expect("matching sizes should blit");
        assert_eq!(buffer.as_raw(), source.as_raw());
    }
}
