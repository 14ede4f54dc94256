//! Geometry and feature derivation for child features.
//!
//! This module turns the coordinates each child declares into GeoJSON-shaped
//! geometries and assembles them into the feature collection a layer pushes
//! into its map engine source.

mod coords;
mod feature;
mod geometry;

pub use coords::CoordinateTree;
pub use feature::{build_collection, Feature, FeatureCollection, FeatureId, ID_PROPERTY};
pub use geometry::{build_geometry, Geometry, GeometryKind};
