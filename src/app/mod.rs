//! The composer facade: one gallery, one page book, at most one live crop
//! editor. This is the surface an interactive shell calls into; every
//! interactive precondition failure here is logged and swallowed so the user
//! can simply retry.

use image::RgbaImage;

use crate::asset::{self, EncodeOptions};
use crate::config;
use crate::editor::{AspectPreset, CropEditor, SessionPhase};
use crate::error::AppResult;
use crate::gallery::ImageGallery;
use crate::geometry::{DisplayPoint, DisplayRect};
use crate::layout::{PageBook, SheetLayout};

#[derive(Debug)]
pub struct Composer {
    gallery: ImageGallery,
    book: PageBook,
    editor: Option<CropEditor>,
    encode_options: EncodeOptions,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            gallery: ImageGallery::new(),
            book: PageBook::new(),
            editor: None,
            encode_options: EncodeOptions::default(),
        }
    }

    /// Builds a composer with export settings from the user's `config.json`.
    pub fn from_env() -> Self {
        let mut composer = Self::new();
        composer.encode_options = config::load_app_config().encode_options();
        composer
    }

    pub fn gallery(&self) -> &ImageGallery {
        &self.gallery
    }

    pub fn book(&self) -> &PageBook {
        &self.book
    }

    /// Decodes an uploaded file and adds it to the gallery as the active
    /// image.
    pub fn ingest(&mut self, bytes: &[u8]) -> AppResult<u64> {
        let pixels = asset::decode(bytes)?;
        Ok(self.gallery.add(pixels))
    }

    /// Adds already-decoded pixels to the gallery as the active image.
    pub fn add_image(&mut self, pixels: RgbaImage) -> u64 {
        self.gallery.add(pixels)
    }

    pub fn select_image(&mut self, id: u64) -> bool {
        self.gallery.select(id)
    }

    /// Opens a crop session on the active image. Any previous session is
    /// discarded; only one session may exist at a time. Returns false when
    /// there is no image to crop.
    pub fn start_crop(&mut self, preset: AspectPreset) -> bool {
        let Some(asset) = self.gallery.active_asset() else {
            tracing::debug!("crop requested with no active image");
            return false;
        };
        if let Some(previous) = self.editor.as_mut() {
            previous.cancel();
        }
        self.editor = Some(CropEditor::begin(asset, preset));
        true
    }

    pub fn crop_editor(&self) -> Option<&CropEditor> {
        self.editor.as_ref()
    }

    pub fn crop_phase(&self) -> Option<SessionPhase> {
        self.editor.as_ref().map(CropEditor::phase)
    }

    pub fn crop_pointer_down(&mut self, pointer: DisplayPoint, display: DisplayRect) {
        let Some(editor) = self.editor.as_mut() else {
            tracing::debug!("pointer-down with no crop session");
            return;
        };
        if let Err(err) = editor.pointer_down(pointer, display) {
            tracing::debug!(%err, "crop pointer-down ignored");
        }
    }

    pub fn crop_pointer_move(&mut self, pointer: DisplayPoint, display: DisplayRect) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if let Err(err) = editor.pointer_move(pointer, display) {
            tracing::debug!(%err, "crop pointer-move ignored");
        }
    }

    pub fn crop_pointer_up(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if let Err(err) = editor.pointer_up() {
            tracing::debug!(%err, "crop pointer-up ignored");
        }
    }

    /// Applies the pending crop. On success the cropped raster joins the
    /// gallery as a new active asset and its id is returned; the original
    /// image is untouched and stays selectable. A degenerate or missing
    /// selection quietly ends the session with no new asset. In both cases
    /// the terminal session is destroyed.
    pub fn apply_crop(&mut self) -> Option<u64> {
        let raster = self.editor.as_mut()?.apply();
        if self
            .editor
            .as_ref()
            .is_some_and(|editor| editor.phase().is_terminal())
        {
            self.editor = None;
        }
        raster.map(|pixels| self.gallery.add(pixels))
    }

    /// Abandons the crop session, if any, keeping the gallery unchanged.
    pub fn cancel_crop(&mut self) {
        if let Some(mut editor) = self.editor.take() {
            editor.cancel();
        }
    }

    /// Places a grid set filled with the active image on the current page.
    pub fn add_set_to_page(&mut self, layout: SheetLayout) -> bool {
        let Some(asset_id) = self.gallery.active_id() else {
            tracing::debug!("set placement requested with no active image");
            return false;
        };
        self.book.add_set(layout, asset_id);
        true
    }

    pub fn remove_set_from_page(&mut self, index: usize) -> bool {
        self.book.remove_set(index)
    }

    pub fn add_page(&mut self) -> usize {
        self.book.add_page()
    }

    pub fn switch_page(&mut self, index: usize) -> bool {
        self.book.switch_page(index)
    }

    /// Encodes the active image with the configured export settings.
    pub fn export_active(&self) -> Option<Vec<u8>> {
        let asset = self.gallery.active_asset()?;
        match asset.encode(self.encode_options) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(%err, asset_id = asset.id(), "active image export failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn coordinate_pixels(width: u32, height: u32) -> RgbaImage {
        let mut pixels = RgbaImage::new(width, height);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            *pixel = Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255]);
        }
        pixels
    }

    fn unscaled(width: f64, height: f64) -> DisplayRect {
        DisplayRect::new(0.0, 0.0, width, height)
    }

    fn drag(composer: &mut Composer, display: DisplayRect, from: (f64, f64), to: (f64, f64)) {
        composer.crop_pointer_down(DisplayPoint::new(from.0, from.1), display);
        composer.crop_pointer_move(DisplayPoint::new(to.0, to.1), display);
        composer.crop_pointer_up();
    }

    #[test]
    fn start_crop_requires_an_active_image() {
        let mut composer = Composer::new();
        assert!(!composer.start_crop(AspectPreset::Free));
        assert!(composer.crop_editor().is_none());

        composer.add_image(coordinate_pixels(50, 50));
        assert!(composer.start_crop(AspectPreset::Free));
        assert_eq!(composer.crop_phase(), Some(SessionPhase::Idle));
    }

    #[test]
    fn crop_flow_adds_a_new_active_asset_and_keeps_the_original() {
        let mut composer = Composer::new();
        let original = composer.add_image(coordinate_pixels(1000, 800));
        let display = unscaled(1000.0, 800.0);

        assert!(composer.start_crop(AspectPreset::Free));
        drag(&mut composer, display, (100.0, 100.0), (400.0, 300.0));
        let cropped = composer.apply_crop().expect("apply should produce an asset");

        assert_ne!(cropped, original);
        assert_eq!(composer.gallery().len(), 2);
        assert_eq!(composer.gallery().active_id(), Some(cropped));
        let asset = composer
            .gallery()
            .get(cropped)
            .expect("cropped asset should be stored");
        assert_eq!(asset.native_width(), 300);
        assert_eq!(asset.native_height(), 200);
        // Session is terminal and destroyed.
        assert!(composer.crop_editor().is_none());
        // The original can be reselected.
        assert!(composer.select_image(original));
    }

    #[test]
    fn zero_delta_crop_ends_cancelled_with_no_asset() {
        let mut composer = Composer::new();
        composer.add_image(coordinate_pixels(100, 100));
        let display = unscaled(100.0, 100.0);

        assert!(composer.start_crop(AspectPreset::Free));
        drag(&mut composer, display, (40.0, 40.0), (40.0, 40.0));
        assert!(composer.apply_crop().is_none());
        assert_eq!(composer.gallery().len(), 1);
        assert!(composer.crop_editor().is_none());
    }

    #[test]
    fn pointer_events_without_a_session_are_swallowed() {
        let mut composer = Composer::new();
        let display = unscaled(100.0, 100.0);
        composer.crop_pointer_down(DisplayPoint::new(1.0, 1.0), display);
        composer.crop_pointer_move(DisplayPoint::new(2.0, 2.0), display);
        composer.crop_pointer_up();
        assert!(composer.apply_crop().is_none());
    }

    #[test]
    fn starting_a_new_crop_discards_the_previous_session() {
        let mut composer = Composer::new();
        composer.add_image(coordinate_pixels(100, 100));
        let display = unscaled(100.0, 100.0);

        assert!(composer.start_crop(AspectPreset::Free));
        composer.crop_pointer_down(DisplayPoint::new(10.0, 10.0), display);
        assert_eq!(composer.crop_phase(), Some(SessionPhase::Dragging));

        assert!(composer.start_crop(AspectPreset::Square));
        assert_eq!(composer.crop_phase(), Some(SessionPhase::Idle));
    }

    #[test]
    fn cancel_crop_keeps_the_gallery_unchanged() {
        let mut composer = Composer::new();
        composer.add_image(coordinate_pixels(100, 100));
        let display = unscaled(100.0, 100.0);

        assert!(composer.start_crop(AspectPreset::Free));
        drag(&mut composer, display, (10.0, 10.0), (60.0, 60.0));
        composer.cancel_crop();

        assert!(composer.crop_editor().is_none());
        assert_eq!(composer.gallery().len(), 1);
        assert!(composer.apply_crop().is_none());
    }

    #[test]
    fn set_placement_uses_the_active_image() {
        let mut composer = Composer::new();
        assert!(!composer.add_set_to_page(SheetLayout::SetA));

        let id = composer.add_image(coordinate_pixels(10, 10));
        assert!(composer.add_set_to_page(SheetLayout::SetA));
        assert_eq!(composer.book().current_page()[0].asset_id, id);

        composer.add_page();
        assert!(composer.book().current_page().is_empty());
        assert!(composer.switch_page(0));
        assert!(composer.remove_set_from_page(0));
    }

    #[test]
    fn ingest_decodes_bytes_into_the_gallery() {
        let mut composer = Composer::new();
        let asset = crate::asset::ImageAsset::new(0, coordinate_pixels(12, 8));
        let bytes = asset
            .encode(EncodeOptions::default())
            .expect("png encode should work");

        let id = composer.ingest(&bytes).expect("png bytes should ingest");
        assert_eq!(composer.gallery().active_id(), Some(id));
        assert!(composer.ingest(b"garbage").is_err());
    }

    #[test]
    fn export_active_encodes_the_active_image() {
        let mut composer = Composer::new();
        assert!(composer.export_active().is_none());

        composer.add_image(coordinate_pixels(16, 16));
        let bytes = composer.export_active().expect("export should encode");
        let decoded = crate::asset::decode(&bytes).expect("export should round-trip");
        assert_eq!(decoded.dimensions(), (16, 16));
    }
}
