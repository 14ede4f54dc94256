//! Feature collections pushed into the map engine's data source.

use super::{build_geometry, Geometry};
use crate::error::LayerResult;
use crate::layer::{Children, ShapeKind};
use geojson::JsonObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property key carrying a feature's [`FeatureId`].
pub const ID_PROPERTY: &str = "id";

/// Identity of a feature: the position of its child in the list the
/// collection was built from.
///
/// Identities are only stable for one collection. Reordering, inserting or
/// removing children reassigns them on the next build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub usize);

impl FeatureId {
    /// Reads the identity stored in a rendered feature's properties.
    ///
    /// Returns `None` if the property is missing or not a non-negative
    /// integer.
    pub fn from_properties(properties: Option<&JsonObject>) -> Option<Self> {
        properties?
            .get(ID_PROPERTY)?
            .as_u64()
            .and_then(|id| usize::try_from(id).ok())
            .map(FeatureId)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single feature derived from a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: JsonObject,
}

impl Feature {
    /// The identity assigned when the feature was built.
    pub fn id(&self) -> Option<FeatureId> {
        FeatureId::from_properties(Some(&self.properties))
    }

    /// Converts to a typed `geojson` feature.
    pub fn to_geojson(&self) -> LayerResult<geojson::Feature> {
        Ok(geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::try_from(&self.geometry)?),
            id: None,
            properties: Some(self.properties.clone()),
            foreign_members: None,
        })
    }
}

/// Ordered features for one layer, replaced wholesale on every sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Looks up the feature built for the child at `id`.
    ///
    /// Features sit at their child's position unless earlier children were
    /// dropped, in which case they sit before it.
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        let end = id.index().saturating_add(1).min(self.features.len());
        self.features[..end].iter().rev().find(|f| f.id() == Some(id))
    }

    /// Converts to a typed `geojson` collection.
    ///
    /// Fails if any feature's coordinates do not have the nesting its
    /// geometry type requires.
    pub fn to_geojson(&self) -> LayerResult<geojson::FeatureCollection> {
        let features = self
            .features
            .iter()
            .map(Feature::to_geojson)
            .collect::<LayerResult<Vec<_>>>()?;

        Ok(geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

/// Builds the feature collection for a layer's children.
///
/// Every child is visited in order and its position becomes its identity.
/// Children without geometry are skipped without shifting the identities of
/// the children after them.
pub fn build_collection(shape: &ShapeKind, children: &Children) -> FeatureCollection {
    let features = children
        .iter()
        .enumerate()
        .filter_map(|(position, child)| {
            let geometry = build_geometry(shape, &child.coordinates, child.outline)?;

            let mut properties = child.properties.clone();
            properties.insert(ID_PROPERTY.to_string(), position.into());

            Some(Feature {
                geometry,
                properties,
            })
        })
        .collect();

    FeatureCollection { features }
}
