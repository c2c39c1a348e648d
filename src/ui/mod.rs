//! State the presentation layer renders, and the reducers that evolve it.

pub mod mvi;
pub mod viewer;
