//! Reducer for the dog viewer.

use crate::ui::mvi::Reducer;

use super::intent::ViewerIntent;
use super::state::{FavouriteMark, ImageSlot, ViewerState};

/// Reducer for viewer state transitions.
///
/// Pure function. Spawning fetches, logging failures and appending to or
/// writing the favourites store are handled by the caller around the
/// dispatch call.
pub struct ViewerReducer;

impl Reducer for ViewerReducer {
    type State = ViewerState;
    type Intent = ViewerIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ViewerIntent::Launched { seq } => dispatched(state, seq),

            ViewerIntent::NextTapped { seq } => {
                let mut state = dispatched(state, seq);
                state.note.clear();
                state
            }

            ViewerIntent::FetchSucceeded { seq, image } => {
                // Results older than the displayed one arrive out of order.
                if seq < state.last_applied {
                    return state;
                }
                ViewerState {
                    image: ImageSlot::Loaded(image),
                    is_new_image_loading: state.is_new_image_loading
                        && seq < state.last_dispatched,
                    favourite: FavouriteMark::NotFavourited,
                    last_applied: seq,
                    ..state
                }
            }

            ViewerIntent::FetchFailed { seq } => ViewerState {
                is_new_image_loading: state.is_new_image_loading && seq < state.last_dispatched,
                ..state
            },

            ViewerIntent::NoteChanged(note) => ViewerState { note, ..state },

            ViewerIntent::FavouriteTapped => {
                if state.favourite_entry().is_none() {
                    return state;
                }
                ViewerState {
                    favourite: FavouriteMark::Favourited,
                    ..state
                }
            }

            ViewerIntent::FavouritesLoaded => ViewerState {
                favourites_loaded: true,
                ..state
            },
        }
    }
}

fn dispatched(state: ViewerState, seq: u64) -> ViewerState {
    ViewerState {
        is_new_image_loading: true,
        last_dispatched: state.last_dispatched.max(seq),
        ..state
    }
}
