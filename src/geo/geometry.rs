//! Geometry derivation from a layer's shape kind.

use super::CoordinateTree;
use crate::error::LayerError;
use crate::layer::ShapeKind;
use geojson::Value;
use serde::{Deserialize, Serialize};

/// GeoJSON geometry type produced for a child feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    /// Coordinate nesting depth GeoJSON requires for this geometry type.
    pub fn expected_depth(&self) -> usize {
        match self {
            GeometryKind::Point => 1,
            GeometryKind::LineString => 2,
            GeometryKind::Polygon => 3,
            GeometryKind::MultiPolygon => 4,
        }
    }

    /// Polygon for a single entry, MultiPolygon for more than one.
    fn areal(coordinates: &CoordinateTree) -> Self {
        if coordinates.len() > 1 {
            GeometryKind::MultiPolygon
        } else {
            GeometryKind::Polygon
        }
    }
}

/// A GeoJSON-shaped geometry record.
///
/// Serializes as `{"type": "...", "coordinates": [...]}`. The coordinates are
/// carried through from the child as declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: CoordinateTree,
}

/// Builds the geometry for one child of a layer with the given shape kind.
///
/// Returns `None` for shape kinds that carry no feature geometry; callers
/// drop such children from the feature collection.
pub fn build_geometry(
    shape: &ShapeKind,
    coordinates: &CoordinateTree,
    outline: bool,
) -> Option<Geometry> {
    let kind = match shape {
        ShapeKind::Symbol | ShapeKind::Circle => GeometryKind::Point,
        ShapeKind::Fill => GeometryKind::areal(coordinates),
        ShapeKind::Line if outline => GeometryKind::areal(coordinates),
        ShapeKind::Line => GeometryKind::LineString,
        ShapeKind::Other(_) => return None,
    };

    Some(Geometry {
        kind,
        coordinates: coordinates.clone(),
    })
}

impl TryFrom<&Geometry> for geojson::Geometry {
    type Error = LayerError;

    fn try_from(geometry: &Geometry) -> Result<Self, Self::Error> {
        let coords = &geometry.coordinates;
        let value = match geometry.kind {
            GeometryKind::Point => coords.to_position().map(Value::Point),
            GeometryKind::LineString => coords.to_positions().map(Value::LineString),
            GeometryKind::Polygon => coords.to_rings().map(Value::Polygon),
            GeometryKind::MultiPolygon => coords.to_polygons().map(Value::MultiPolygon),
        };

        value
            .map(geojson::Geometry::new)
            .ok_or_else(|| LayerError::CoordinateDepth {
                kind: geometry.kind,
                expected: geometry.kind.expected_depth(),
                found: coords.depth(),
            })
    }
}
