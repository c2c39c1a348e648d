//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are cloned to produce new states, compared to detect changes,
/// and start from `Default` at launch.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
