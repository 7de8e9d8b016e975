//! Interactive app core.
//!
//! [`state::AppState`] is mutated only by [`reducer::reduce`], which maps an
//! [`event::AppEvent`] to an [`event::Effect`] for the terminal loop to carry
//! out. [`render`] reads the state and never changes it.

pub mod event;
pub mod fetch;
pub mod reducer;
pub mod render;
pub mod state;
