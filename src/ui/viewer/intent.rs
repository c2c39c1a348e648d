//! Intents for the dog viewer.

use crate::model::DogImage;
use crate::ui::mvi::Intent;

/// Intents that can be dispatched to the viewer reducer.
///
/// `seq` values are allocated by the caller, strictly increasing per
/// dispatched fetch.
#[derive(Debug, Clone)]
pub enum ViewerIntent {
    /// App launched and the first fetch went out.
    Launched { seq: u64 },

    /// User asked for another dog; the note is cleared.
    NextTapped { seq: u64 },

    /// Fetch `seq` resolved with an image.
    FetchSucceeded { seq: u64, image: DogImage },

    /// Fetch `seq` failed. Displayed image stays as it was.
    FetchFailed { seq: u64 },

    /// User edited the note for the current image.
    NoteChanged(String),

    /// User tapped the favourite button. The caller has already stored
    /// [`super::ViewerState::favourite_entry`] when there was one.
    FavouriteTapped,

    /// Saved favourites finished loading at launch.
    FavouritesLoaded,
}

impl Intent for ViewerIntent {}
