//! Random dog viewer with persisted favourites.
//!
//! [`app::App`] owns the viewer state and reacts to launch, next,
//! favourite and backgrounding triggers. Images come from an
//! [`fetcher::ImageSource`]; favourites are snapshotted to a JSON file by
//! the [`favourites`] module.

pub mod app;
pub mod cli;
pub mod config;
pub mod favourites;
pub mod fetcher;
pub mod logging;
pub mod model;
pub mod ui;

pub use app::{App, AppEvent};
pub use config::{Config, ConfigError};
pub use favourites::{FavouritesStore, StoreError};
pub use fetcher::{FetchError, ImageSource, RemoteImageFetcher};
pub use model::{DogImage, FavouritesList, SavedDog};
