//! Shared test utilities.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::collections::VecDeque;
use std::future::Future;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use furryfriends::fetcher::{FetchError, ImageSource};
use furryfriends::favourites::persist;
use furryfriends::{App, DogImage, SavedDog};
use tempfile::TempDir;

/// One scripted fetch outcome.
#[derive(Debug, Clone)]
pub enum Step {
    Image { image: DogImage, delay_ms: u64 },
    Fail { delay_ms: u64 },
}

impl Step {
    pub fn dog(url: &str) -> Self {
        Step::Image {
            image: DogImage::new(url, "success"),
            delay_ms: 0,
        }
    }

    pub fn fail() -> Self {
        Step::Fail { delay_ms: 0 }
    }

    pub fn after(self, ms: u64) -> Self {
        match self {
            Step::Image { image, .. } => Step::Image {
                image,
                delay_ms: ms,
            },
            Step::Fail { .. } => Step::Fail { delay_ms: ms },
        }
    }

    fn delay(&self) -> u64 {
        match self {
            Step::Image { delay_ms, .. } | Step::Fail { delay_ms } => *delay_ms,
        }
    }

    fn into_result(self) -> Result<DogImage, FetchError> {
        match self {
            Step::Image { image, .. } => Ok(image),
            Step::Fail { .. } => Err(FetchError::Decode {
                source: serde_json::from_str::<DogImage>("<html>").unwrap_err(),
            }),
        }
    }
}

/// [`ImageSource`] replaying a fixed script. Runs out into failures.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    script: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(steps.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageSource for ScriptedSource {
    fn fetch(&self) -> impl Future<Output = Result<DogImage, FetchError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front().unwrap_or_else(Step::fail);
        async move {
            let delay = step.delay();
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            step.into_result()
        }
    }
}

/// Temp dir plus the favourites path inside it.
pub fn temp_favourites() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("savedFavourites");
    (temp_dir, path)
}

/// Like [`temp_favourites`] with `entries` already written to the file.
pub fn seeded_favourites(entries: &[SavedDog]) -> (TempDir, PathBuf) {
    let (temp_dir, path) = temp_favourites();
    persist(entries, &path).expect("Failed to seed favourites");
    (temp_dir, path)
}

/// [`ImageSource`] whose fetch panics when polled.
#[derive(Clone, Copy, Default)]
pub struct PanickingSource;

fn explode() -> Result<DogImage, FetchError> {
    panic!("image source exploded")
}

impl ImageSource for PanickingSource {
    fn fetch(&self) -> impl Future<Output = Result<DogImage, FetchError>> + Send {
        async { explode() }
    }
}

/// App over a scripted source, plus a handle to inspect the source.
pub fn make_app(steps: impl IntoIterator<Item = Step>) -> (App<ScriptedSource>, ScriptedSource, TempDir) {
    let (dir, path) = temp_favourites();
    let source = ScriptedSource::new(steps);
    let app = App::new(source.clone(), path);
    (app, source, dir)
}

/// Find a port nothing listens on.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}
