//! Model-View-Intent (MVI) primitives.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: everything the presentation layer needs to render
//! - **Intent**: user gestures and completed background work
//! - **Reducer**: pure function applying an intent to a state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
