//! State for the dog viewer.

use crate::model::{DogImage, SavedDog, PLACEHOLDER_IMAGE_URL};
use crate::ui::mvi::UiState;

/// What the main image slot holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSlot {
    #[default]
    Empty,
    Loaded(DogImage),
}

/// Whether the image on screen has already been added to favourites.
///
/// Resets to `NotFavourited` on every newly applied image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavouriteMark {
    #[default]
    NotFavourited,
    Favourited,
}

/// Coarse phase of the image slot, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePhase {
    Empty,
    Loading,
    Loaded,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerState {
    pub image: ImageSlot,
    /// True from dispatching a fetch until the newest one resolves.
    pub is_new_image_loading: bool,
    pub favourite: FavouriteMark,
    /// Note being typed for the current image.
    pub note: String,
    /// Set once the saved favourites have been read at launch.
    pub favourites_loaded: bool,
    /// Sequence of the newest dispatched fetch (0 before any).
    pub last_dispatched: u64,
    /// Sequence of the fetch whose image is displayed (0 before any).
    pub last_applied: u64,
}

impl UiState for ViewerState {}

impl ViewerState {
    pub fn phase(&self) -> ImagePhase {
        match (&self.image, self.is_new_image_loading) {
            (_, true) => ImagePhase::Loading,
            (ImageSlot::Empty, false) => ImagePhase::Empty,
            (ImageSlot::Loaded(_), false) => ImagePhase::Loaded,
        }
    }

    pub fn current_image(&self) -> Option<&DogImage> {
        match &self.image {
            ImageSlot::Loaded(image) => Some(image),
            ImageSlot::Empty => None,
        }
    }

    /// Address to hand to the image renderer.
    pub fn display_url(&self) -> &str {
        self.current_image()
            .and_then(DogImage::url)
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    pub fn is_favourited(&self) -> bool {
        self.favourite == FavouriteMark::Favourited
    }

    /// The entry a favourite tap would save, if it would save anything.
    ///
    /// `None` once the current image is favourited, and for images whose
    /// message is not an address (error envelopes).
    pub fn favourite_entry(&self) -> Option<SavedDog> {
        if self.is_favourited() {
            return None;
        }
        let url = self.current_image()?.url()?;
        Some(SavedDog::new(url, self.note.clone()))
    }
}
