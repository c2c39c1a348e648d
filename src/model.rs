//! Data carried between the fetcher, the favourites store and the UI state.

use serde::{Deserialize, Serialize};

/// Address shown while no dog has been fetched yet.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://www.russellgordon.ca/lcs/miscellaneous/transparent-pixel.png";

/// File name of the persisted favourites list inside the data directory.
pub const SAVED_FAVOURITES_LABEL: &str = "savedFavourites";

/// Envelope returned by the random image endpoint.
///
/// `message` holds the image address on success and a human-readable
/// reason otherwise; `status` is `"success"` or `"error"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DogImage {
    pub message: String,
    pub status: String,
}

impl DogImage {
    pub fn new(message: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The message as an image address, if it is one.
    pub fn url(&self) -> Option<&str> {
        let message = self.message.trim();
        if message.starts_with("https://") || message.starts_with("http://") {
            Some(message)
        } else {
            None
        }
    }
}

/// A favourited image together with the note the user typed for it.
///
/// The on-disk key is `imageAdress` (sic). Files written by earlier
/// releases use that spelling, so it is kept for writing; the corrected
/// spelling is accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedDog {
    #[serde(rename = "imageAdress", alias = "imageAddress")]
    pub image_address: String,
    pub comment: String,
}

impl SavedDog {
    pub fn new(image_address: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            image_address: image_address.into(),
            comment: comment.into(),
        }
    }
}

/// Ordered favourites, insertion order preserved, duplicates allowed.
pub type FavouritesList = Vec<SavedDog>;
