//! UI modules for Hackflow
//!
//! Rendering is a function of `HackflowApp` state; the only mutations made
//! here are edits to the query text and starting a fetch.

mod card;
mod components;
mod search_view;
pub mod theme;

pub use search_view::render_search_view;
