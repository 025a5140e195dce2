//! timeline-rs: headless engine for the thesis timeline view.
//!
//! The crate derives the visible window, axis ticks and percentage layout of
//! grouped rows of dated segments and events, and turns gestures (modified
//! wheel, pinch, range slider) into range updates. Rendering goes through the
//! backend-agnostic [`render::Renderer`] trait.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
