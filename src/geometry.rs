/// Coordinate primitives for the crop editor, tagged by coordinate space.
///
/// Three spaces exist: *display* (the on-screen surface, CSS/layout pixels),
/// *buffer* (the backing editing raster) and *native* (the original image
/// pixel grid). Values never change space implicitly; conversions happen in
/// `editor::mapper` (display -> buffer) and `editor::extract` (buffer ->
/// native) only.

/// Pointer position in viewport coordinates (display space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the display surface in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Position in the editing buffer's pixel grid. May lie outside the buffer
/// bounds; normalization and extraction clamp where it matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferPoint {
    pub x: f64,
    pub y: f64,
}

impl BufferPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the editing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

impl BufferSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// In-progress crop rectangle in buffer space, anchored at the pointer-down
/// corner. Width and height stay signed while the drag is live: negative
/// values mean the pointer moved left/up from the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DragRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size rectangle at the drag anchor.
    pub const fn at_point(point: BufferPoint) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Resolves the signed drag into a top-left anchored rectangle with
    /// non-negative dimensions. The single place drag direction is erased.
    pub fn normalized(&self) -> BufferRect {
        let x = if self.width < 0.0 {
            self.x + self.width
        } else {
            self.x
        };
        let y = if self.height < 0.0 {
            self.y + self.height
        } else {
            self.y
        };
        BufferRect::new(x, y, self.width.abs(), self.height.abs())
    }
}

/// Normalized crop window in buffer space: `width >= 0`, `height >= 0` and
/// `(x, y)` is the top-left corner regardless of the original drag direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BufferRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Rounds this rectangle to whole pixels and clamps it to a raster of
    /// the given size. Both the overlay reveal and the extractor sample
    /// through this single resolution step, so the visible crop window and
    /// the extracted pixels cannot drift apart.
    pub fn to_pixel_region(&self, bounds: BufferSize) -> Option<PixelRegion> {
        let max_x = f64::from(bounds.width);
        let max_y = f64::from(bounds.height);
        let left = self.x.round().clamp(0.0, max_x) as u32;
        let top = self.y.round().clamp(0.0, max_y) as u32;
        let right = (self.x + self.width).round().clamp(0.0, max_x) as u32;
        let bottom = (self.y + self.height).round().clamp(0.0, max_y) as u32;
        if right <= left || bottom <= top {
            return None;
        }
        Some(PixelRegion {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}

/// Whole-pixel region fully contained in some raster. Produced only by
/// `BufferRect::to_pixel_region`, so `x + width` and `y + height` never
/// exceed the raster it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }
}
