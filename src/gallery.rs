//! Gallery state: the image collection, the active filter and the lightbox.
//!
//! Everything here is presentation-free. The TUI holds one [`GalleryState`],
//! calls into it on every key event and redraws afterwards.

use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

mod filter;
mod image;

pub use filter::Filter;
pub use image::{resolve_source, Image, ImageId};

/// Recoverable failures of gallery operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// Position outside the filtered view (includes any access on an empty view)
    #[error("position {index} is out of range for {len} image(s)")]
    OutOfRange { index: usize, len: usize },
    #[error("no image with id {0}")]
    NotFound(ImageId),
    #[error("an image with id {0} already exists")]
    DuplicateId(ImageId),
    #[error("the lightbox is not open")]
    LightboxClosed,
}

pub type GalleryResult<T> = std::result::Result<T, GalleryError>;

/// Lightbox lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    /// Index into the filtered view at the time of the last open/step
    Open { index: usize },
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Open { index } => Some(*index),
            Lightbox::Closed => None,
        }
    }
}

/// Per-filter image totals, for filter button badges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub favorites: usize,
    pub uncategorized: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl FilterCounts {
    pub fn for_filter(&self, filter: &Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Favorites => self.favorites,
            Filter::Category(name) if name.is_empty() => self.uncategorized,
            Filter::Category(name) => self.by_category.get(name).copied().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    images: Vec<Image>,
    filter: Filter,
    lightbox: Lightbox,
}

impl GalleryState {
    /// Seed a gallery from an initial collection.
    ///
    /// Later duplicates of an id are dropped so the uniqueness invariant holds
    /// from the start.
    pub fn new(images: Vec<Image>) -> Self {
        let mut seen = HashSet::new();
        let images = images
            .into_iter()
            .filter(|img| seen.insert(img.id))
            .collect();

        Self {
            images,
            filter: Filter::All,
            lightbox: Lightbox::Closed,
        }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, id: ImageId) -> Option<&Image> {
        self.images.iter().find(|img| img.id == id)
    }

    /// Images matching the active filter, in collection order.
    ///
    /// Recomputed on every call so it can never go stale.
    pub fn filtered_view(&self) -> Vec<&Image> {
        self.images
            .iter()
            .filter(|img| self.filter.matches(img))
            .collect()
    }

    fn filtered_len(&self) -> usize {
        self.images
            .iter()
            .filter(|img| self.filter.matches(img))
            .count()
    }

    /// Change the active filter. The lightbox state is left as-is.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Open the lightbox at a position of the filtered view.
    pub fn open_at(&mut self, position: usize) -> GalleryResult<()> {
        let len = self.filtered_len();
        if position >= len {
            return Err(GalleryError::OutOfRange {
                index: position,
                len,
            });
        }
        self.lightbox = Lightbox::Open { index: position };
        Ok(())
    }

    pub fn close(&mut self) {
        self.lightbox = Lightbox::Closed;
    }

    /// Image under the lightbox.
    ///
    /// The stored index is not re-resolved after mutations: it yields whatever
    /// now occupies that slot, or `OutOfRange` once the view has shrunk past it.
    pub fn current_image(&self) -> GalleryResult<&Image> {
        let index = self.lightbox.index().ok_or(GalleryError::LightboxClosed)?;
        let view = self.filtered_view();
        let len = view.len();
        view.get(index)
            .copied()
            .ok_or(GalleryError::OutOfRange { index, len })
    }

    /// Step forward with wrap-around against the live filtered view.
    pub fn advance(&mut self) -> GalleryResult<usize> {
        self.step(1)
    }

    /// Step backward with wrap-around against the live filtered view.
    pub fn retreat(&mut self) -> GalleryResult<usize> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> GalleryResult<usize> {
        let index = self.lightbox.index().ok_or(GalleryError::LightboxClosed)?;
        let len = self.filtered_len();
        if len == 0 {
            return Err(GalleryError::OutOfRange { index, len });
        }

        // A stale index past the end is folded back before stepping.
        let current = (index % len) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.lightbox = Lightbox::Open { index: next };
        Ok(next)
    }

    /// Flip the favorite flag by id and return the new value.
    pub fn toggle_favorite(&mut self, id: ImageId) -> GalleryResult<bool> {
        let image = self
            .images
            .iter_mut()
            .find(|img| img.id == id)
            .ok_or(GalleryError::NotFound(id))?;
        image.favorite = !image.favorite;
        Ok(image.favorite)
    }

    /// Prepend a new image (newest first).
    pub fn add_image(&mut self, image: Image) -> GalleryResult<()> {
        if self.get(image.id).is_some() {
            return Err(GalleryError::DuplicateId(image.id));
        }
        self.images.insert(0, image);
        Ok(())
    }

    /// Remove an image by id, returning it. The lightbox index is not adjusted.
    pub fn remove_image(&mut self, id: ImageId) -> GalleryResult<Image> {
        let pos = self
            .images
            .iter()
            .position(|img| img.id == id)
            .ok_or(GalleryError::NotFound(id))?;
        Ok(self.images.remove(pos))
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut categories = Vec::new();
        for img in &self.images {
            if !img.is_uncategorized() && seen.insert(img.category.as_str()) {
                categories.push(img.category.clone());
            }
        }
        categories
    }

    /// One past the largest id in the collection.
    pub fn next_id(&self) -> ImageId {
        let max = self.images.iter().map(|img| img.id.0).max().unwrap_or(0);
        ImageId(max + 1)
    }

    /// Position of an id within the current filtered view.
    pub fn position_of(&self, id: ImageId) -> Option<usize> {
        self.filtered_view().iter().position(|img| img.id == id)
    }

    pub fn counts(&self) -> FilterCounts {
        let mut counts = FilterCounts {
            all: self.images.len(),
            ..FilterCounts::default()
        };
        for img in &self.images {
            if img.favorite {
                counts.favorites += 1;
            }
            if img.is_uncategorized() {
                counts.uncategorized += 1;
            } else {
                *counts.by_category.entry(img.category.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}
