//! Controller tying the viewer state to the network and the favourites file.
//!
//! All state mutation happens on the task that owns [`App`]. Fetches and
//! file reads run elsewhere and report back as [`AppEvent`]s.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::favourites::{self, FavouritesStore};
use crate::fetcher::{FetchError, ImageSource, RemoteImageFetcher};
use crate::model::{DogImage, FavouritesList, SavedDog};
use crate::ui::mvi::Reducer;
use crate::ui::viewer::{ViewerIntent, ViewerReducer, ViewerState};

const EVENT_CAPACITY: usize = 64;

/// Results of background work, applied by [`App::handle_event`].
#[derive(Debug)]
pub enum AppEvent {
    FetchCompleted {
        seq: u64,
        result: Result<DogImage, FetchError>,
    },
    /// The fetch task panicked or was cancelled before reporting.
    FetchAborted { seq: u64 },
    FavouritesLoaded(FavouritesList),
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App<S> {
    state: ViewerState,
    source: Arc<S>,
    store: FavouritesStore,
    load_requested: bool,
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
    /// Spawned jobs whose event has not been handled yet.
    in_flight: usize,
}

impl App<RemoteImageFetcher> {
    /// App wired to the HTTP endpoint and favourites path from `config`.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = RemoteImageFetcher::new(&config.api)?;
        Ok(Self::new(fetcher, config.storage.favourites_path()))
    }
}

impl<S: ImageSource> App<S> {
    pub fn new(source: S, favourites_path: PathBuf) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CAPACITY);
        Self {
            state: ViewerState::default(),
            source: Arc::new(source),
            store: FavouritesStore::new(favourites_path),
            load_requested: false,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Saved favourites followed by the ones added this session.
    pub fn favourites(&self) -> &[SavedDog] {
        self.store.entries()
    }

    pub fn favourites_path(&self) -> &Path {
        self.store.path()
    }

    /// True while a fetch or the favourites load has not been applied.
    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Kick off the first fetch and the favourites load. Both run
    /// independently; their results may arrive in either order.
    ///
    /// The file is only read on the first launch.
    pub fn on_launch(&mut self) {
        let seq = self.next_seq();
        tracing::debug!(seq, path = %self.store.path().display(), "launching");
        dispatch_mvi!(self, state, ViewerReducer, ViewerIntent::Launched { seq });
        self.spawn_fetch(seq);
        if !self.load_requested {
            self.load_requested = true;
            self.spawn_load();
        }
    }

    pub fn on_next_tapped(&mut self) {
        let seq = self.next_seq();
        dispatch_mvi!(self, state, ViewerReducer, ViewerIntent::NextTapped { seq });
        self.spawn_fetch(seq);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        dispatch_mvi!(
            self,
            state,
            ViewerReducer,
            ViewerIntent::NoteChanged(note.into())
        );
    }

    pub fn on_favourite_tapped(&mut self) {
        match self.state.favourite_entry() {
            Some(entry) => self.store.append(entry),
            None => {
                tracing::debug!("favourite ignored: nothing new to save");
                return;
            }
        }
        dispatch_mvi!(self, state, ViewerReducer, ViewerIntent::FavouriteTapped);
    }

    /// Write the in-memory favourites to disk.
    ///
    /// A launch load still in flight is applied first so the saved entries
    /// are part of what gets written. Without a completed load nothing is
    /// written, leaving the file as it was. Write failures are logged; the
    /// list in memory is kept and the next backgrounding writes it again.
    pub async fn on_app_backgrounded(&mut self) {
        while !self.state.favourites_loaded {
            match self.next_event().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        if !self.state.favourites_loaded {
            tracing::warn!(
                path = %self.store.path().display(),
                "favourites were never loaded, leaving the file untouched"
            );
            return;
        }

        let store = self.store.clone();
        let count = store.entries().len();

        match tokio::task::spawn_blocking(move || store.persist()).await {
            Ok(Ok(())) => tracing::debug!(count, "favourites saved on backgrounding"),
            Ok(Err(e)) => tracing::error!(error = %e, "failed to save favourites"),
            Err(e) => tracing::error!(error = %e, "favourites writer task failed"),
        }
    }

    /// Wait for the next background result. `None` when nothing is pending.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        if self.in_flight == 0 {
            return None;
        }
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let intent = match event {
            AppEvent::FetchCompleted {
                seq,
                result: Ok(image),
            } => ViewerIntent::FetchSucceeded { seq, image },
            AppEvent::FetchCompleted {
                seq,
                result: Err(e),
            } => {
                tracing::warn!(seq, kind = e.kind(), error = %e, "fetch failed, keeping current image");
                ViewerIntent::FetchFailed { seq }
            }
            AppEvent::FetchAborted { seq } => ViewerIntent::FetchFailed { seq },
            AppEvent::FavouritesLoaded(list) => {
                tracing::debug!(count = list.len(), "favourites loaded");
                self.store.merge_loaded(list);
                ViewerIntent::FavouritesLoaded
            }
        };
        dispatch_mvi!(self, state, ViewerReducer, intent);
    }

    /// Apply background results until none are pending.
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_event().await {
            self.handle_event(event);
        }
    }

    fn next_seq(&self) -> u64 {
        self.state.last_dispatched + 1
    }

    fn spawn_fetch(&mut self, seq: u64) {
        self.in_flight += 1;
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let job = tokio::spawn(async move { source.fetch().await });
            let event = match job.await {
                Ok(result) => AppEvent::FetchCompleted { seq, result },
                Err(e) => {
                    tracing::error!(seq, error = %e, "image fetch task failed");
                    AppEvent::FetchAborted { seq }
                }
            };
            let _ = tx.send(event).await;
        });
    }

    fn spawn_load(&mut self) {
        self.in_flight += 1;
        let path = self.store.path().to_path_buf();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let list = match tokio::task::spawn_blocking(move || favourites::load(&path)).await {
                Ok(list) => list,
                Err(e) => {
                    tracing::error!(error = %e, "favourites reader task failed");
                    Vec::new()
                }
            };
            let _ = tx.send(AppEvent::FavouritesLoaded(list)).await;
        });
    }
}
