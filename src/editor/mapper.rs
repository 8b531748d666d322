use crate::geometry::{BufferPoint, BufferSize, DisplayPoint, DisplayRect};

/// Converts a viewport pointer position into buffer-space pixel coordinates,
/// compensating for any CSS scaling between the displayed surface and its
/// backing buffer.
///
/// The result is intentionally unclamped: a pointer near the surface edge may
/// map slightly outside `[0, width] x [0, height]` and that is legal input to
/// downstream normalization and extraction, not an error.
pub fn to_buffer_space(
    pointer: DisplayPoint,
    display: DisplayRect,
    buffer: BufferSize,
) -> BufferPoint {
    // Collapsed display rects would divide by zero; treat them as unscaled.
    let scale_x = if display.width > 0.0 {
        f64::from(buffer.width) / display.width
    } else {
        1.0
    };
    let scale_y = if display.height > 0.0 {
        f64::from(buffer.height) / display.height
    } else {
        1.0
    };
    BufferPoint::new(
        (pointer.x - display.left) * scale_x,
        (pointer.y - display.top) * scale_y,
    )
}
