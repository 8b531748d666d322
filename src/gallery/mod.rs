//! The user's selectable image collection: every upload and every applied
//! crop becomes its own entry, and the most recently added entry becomes the
//! active selection.

use image::RgbaImage;

use crate::asset::ImageAsset;

#[derive(Debug, Default)]
pub struct ImageGallery {
    assets: Vec<ImageAsset>,
    active: Option<u64>,
    next_id: u64,
}

impl ImageGallery {
    pub fn new() -> Self {
        Self {
            assets: Vec::new(),
            active: None,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Adds a new asset and makes it the active selection. Existing assets
    /// are never replaced; a cropped image sits alongside its original.
    pub fn add(&mut self, pixels: RgbaImage) -> u64 {
        let id = self.allocate_id();
        self.assets.push(ImageAsset::new(id, pixels));
        self.active = Some(id);
        tracing::debug!(asset_id = id, "asset added to gallery");
        id
    }

    pub fn get(&self, id: u64) -> Option<&ImageAsset> {
        self.assets.iter().find(|asset| asset.id() == id)
    }

    /// Switches the active selection. Unknown ids leave it unchanged.
    pub fn select(&mut self, id: u64) -> bool {
        if self.get(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active
    }

    pub fn active_asset(&self) -> Option<&ImageAsset> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
