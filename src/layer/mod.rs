//! Layers synchronized with a map engine.
//!
//! A [`Layer`] owns one engine layer and the GeoJSON source behind it. Its
//! features are rebuilt from the current [`Children`] on every update and
//! pushed to the engine wholesale.

mod child;
mod config;
mod lifecycle;

pub use child::{Callback, ChildDescriptor, Children};
pub use config::{LayerConfig, LayerIds, ShapeKind};
pub use lifecycle::{Layer, LayerState};
