//! Interactive crop editor: pointer input in display space drives a crop
//! session over an owned editing buffer, with live overlay feedback and
//! pixel-exact extraction on apply.

pub mod extract;
pub mod mapper;
mod overlay;
mod preset;
mod session;

use image::RgbaImage;

use crate::asset::ImageAsset;
use crate::geometry::{BufferRect, BufferSize, DisplayPoint, DisplayRect};

pub use overlay::OverlayError;
pub use preset::AspectPreset;
pub use session::{CropSession, SessionError, SessionPhase, SessionResult};

/// The raster the user interacts with during a crop session. Owns its
/// backing buffer outright; overlay redraws receive it by reference, so
/// rendering never depends on any UI lifecycle.
#[derive(Debug)]
pub struct EditSurface {
    buffer: RgbaImage,
}

impl EditSurface {
    /// Allocates a buffer matching the source's natural pixel dimensions.
    /// The buffer/source ratio is fixed for the lifetime of the session.
    pub fn sized_to(source: &RgbaImage) -> Self {
        Self {
            buffer: RgbaImage::new(source.width(), source.height()),
        }
    }

    pub fn size(&self) -> BufferSize {
        BufferSize::new(self.buffer.width(), self.buffer.height())
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut RgbaImage {
        &mut self.buffer
    }
}

/// One crop attempt over a single source image. Created by `begin`, consumed
/// by `apply` or `cancel`; the composer discards it once terminal.
#[derive(Debug)]
pub struct CropEditor {
    asset_id: u64,
    source: RgbaImage,
    surface: EditSurface,
    session: CropSession,
}

impl CropEditor {
    /// Opens a crop session on `asset`: clones its pixels, sizes the editing
    /// buffer to the natural image dimensions and draws the initial frame.
    pub fn begin(asset: &ImageAsset, preset: AspectPreset) -> Self {
        let source = asset.pixels().clone();
        let mut surface = EditSurface::sized_to(&source);
        if let Err(err) = overlay::draw_source(surface.buffer_mut(), &source) {
            tracing::warn!(%err, "initial crop frame draw failed");
        }
        tracing::debug!(
            asset_id = asset.id(),
            preset = preset.label(),
            width = source.width(),
            height = source.height(),
            "crop session opened"
        );
        Self {
            asset_id: asset.id(),
            source,
            surface,
            session: CropSession::new(preset.ratio()),
        }
    }

    pub fn asset_id(&self) -> u64 {
        self.asset_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn selection(&self) -> Option<BufferRect> {
        self.session.selection()
    }

    pub fn surface(&self) -> &EditSurface {
        &self.surface
    }

    /// Anchors a drag at the given viewport position.
    pub fn pointer_down(
        &mut self,
        pointer: DisplayPoint,
        display: DisplayRect,
    ) -> SessionResult<()> {
        let point = mapper::to_buffer_space(pointer, display, self.surface.size());
        self.session.pointer_down(point)
    }

    /// Updates the drag and redraws the overlay. One full redraw per event,
    /// in arrival order, so the overlay never shows a stale rectangle.
    pub fn pointer_move(
        &mut self,
        pointer: DisplayPoint,
        display: DisplayRect,
    ) -> SessionResult<()> {
        let point = mapper::to_buffer_space(pointer, display, self.surface.size());
        let rect = self.session.pointer_move(point)?;
        if let Err(err) = overlay::draw(self.surface.buffer_mut(), &self.source, rect.normalized())
        {
            tracing::warn!(%err, "crop overlay redraw failed");
        }
        Ok(())
    }

    pub fn pointer_up(&mut self) -> SessionResult<()> {
        self.session.pointer_up()
    }

    /// Extracts the selected region. Only valid once the drag is frozen
    /// (`Ready`); a missing or degenerate selection cancels the session and
    /// produces nothing, matching the editor's degrade-gracefully policy.
    pub fn apply(&mut self) -> Option<RgbaImage> {
        if self.phase() != SessionPhase::Ready {
            tracing::debug!(phase = ?self.phase(), "crop apply ignored outside ready");
            return None;
        }

        let selection = match self.session.selection() {
            Some(selection) if !selection.is_empty() => selection,
            _ => {
                tracing::debug!("crop apply with empty selection; cancelling");
                self.session.cancel();
                return None;
            }
        };

        match extract::extract(&self.source, selection, self.surface.size()) {
            Some(raster) => {
                self.session.mark_applied().ok()?;
                tracing::debug!(
                    asset_id = self.asset_id,
                    width = raster.width(),
                    height = raster.height(),
                    "crop applied"
                );
                Some(raster)
            }
            None => {
                tracing::debug!("crop selection degenerate after clamping; cancelling");
                self.session.cancel();
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }
}
