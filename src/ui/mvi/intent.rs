//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent user gestures (tapping next, typing a note) and
/// results of background work (a fetch resolving, favourites loaded).
pub trait Intent: Send + 'static {}
