//! Map feature layers driven by a declarative list of children.
//!
//! A [`Layer`] mirrors an ordered list of [`ChildDescriptor`]s into a map
//! engine: each child becomes one GeoJSON feature in the layer's source, and
//! clicks and pointer moves over those features are routed back to the child
//! that declared them.
//!
//! ## Data flow
//!
//! 1. The caller hands the layer a [`Children`] list.
//! 2. Each child's coordinates are turned into a geometry according to the
//!    layer's [`ShapeKind`] and tagged with the child's position as its
//!    [`FeatureId`].
//! 3. The resulting [`FeatureCollection`] replaces the source data.
//! 4. On a pointer event the engine hit-tests the layer; the ids in the hit
//!    features select the children whose callbacks run.
//!
//! The engine itself (rendering, tiles, styling, hit-testing) sits behind the
//! [`MapEngine`] trait.
//!
//! ## Identity
//!
//! Feature identities are list positions. They are only meaningful for the
//! collection they were built with: after reordering or removing children,
//! hits on features still rendered from the old list resolve to whatever
//! child now sits at that position, or to nothing.

pub mod engine;
pub mod error;
pub mod events;
pub mod geo;
pub mod layer;

#[cfg(test)]
mod mock;

pub use engine::{EngineError, LayerSpec, MapEngine, PointerListener, SourceSpec};
pub use error::{LayerError, LayerResult};
pub use events::{FeatureEvent, HoverTracker, PointerEvent, PointerEventKind, ScreenPoint};
pub use geo::{CoordinateTree, Feature, FeatureCollection, FeatureId, Geometry, GeometryKind};
pub use layer::{ChildDescriptor, Children, Layer, LayerConfig, LayerIds, LayerState, ShapeKind};
