//! Layer configuration and identifier generation.

use crate::error::LayerResult;
use geojson::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Declared shape of a layer's features.
///
/// Serialized as the map engine's layer type string. Layer types without
/// per-feature geometry (raster, heatmap...) are kept as [`ShapeKind::Other`]
/// and produce no features.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    Symbol,
    Line,
    Fill,
    Circle,
    Other(String),
}

impl ShapeKind {
    /// Layer type string understood by the map engine.
    pub fn as_str(&self) -> &str {
        match self {
            ShapeKind::Symbol => "symbol",
            ShapeKind::Line => "line",
            ShapeKind::Fill => "fill",
            ShapeKind::Circle => "circle",
            ShapeKind::Other(other) => other,
        }
    }

    /// Returns true if children of this kind get a geometry.
    pub fn has_geometry(&self) -> bool {
        !matches!(self, ShapeKind::Other(_))
    }
}

impl From<&str> for ShapeKind {
    fn from(s: &str) -> Self {
        match s {
            "symbol" => ShapeKind::Symbol,
            "line" => ShapeKind::Line,
            "fill" => ShapeKind::Fill,
            "circle" => ShapeKind::Circle,
            other => ShapeKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ShapeKind {
    fn from(s: String) -> Self {
        ShapeKind::from(s.as_str())
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a synchronized layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerConfig {
    /// Identifier suffix; a sequential one is generated when absent
    pub id: Option<String>,
    /// Shape of the layer's features
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Layout properties passed through to the engine
    pub layout: JsonObject,
    /// Paint properties passed through to the engine
    pub paint: JsonObject,
    /// Optional filter expression
    pub filter: Option<Vec<Value>>,
    /// Extra options merged into the data source definition
    pub source_options: JsonObject,
}

impl LayerConfig {
    /// Creates a configuration for the given shape with all other values
    /// defaulted.
    pub fn new(kind: impl Into<ShapeKind>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> LayerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_layout(mut self, key: impl Into<String>, value: Value) -> Self {
        self.layout.insert(key.into(), value);
        self
    }

    pub fn with_paint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.paint.insert(key.into(), value);
        self
    }

    pub fn with_filter(mut self, filter: Vec<Value>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_source_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.source_options.insert(key.into(), value);
        self
    }
}

/// Sequential identifier factory for layers without an explicit id.
///
/// Use [`LayerIds::global`] for identifiers unique across the process, or a
/// local instance where a predictable sequence is needed.
#[derive(Debug, Default)]
pub struct LayerIds {
    next: AtomicU64,
}

impl LayerIds {
    /// Creates a factory starting at 0.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// The process-wide factory.
    pub fn global() -> &'static LayerIds {
        static GLOBAL: LayerIds = LayerIds::new();
        &GLOBAL
    }

    /// Returns the next identifier.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Resolves the engine identifier for a layer: `layer-<id>`.
    pub fn layer_id(&self, config: &LayerConfig) -> String {
        match &config.id {
            Some(id) => format!("layer-{}", id),
            None => format!("layer-{}", self.next_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_kind_strings() {
        for name in ["symbol", "line", "fill", "circle"] {
            let kind = ShapeKind::from(name);
            assert!(kind.has_geometry());
            assert_eq!(kind.as_str(), name);
        }

        let raster = ShapeKind::from("raster");
        assert_eq!(raster, ShapeKind::Other("raster".to_string()));
        assert!(!raster.has_geometry());
        assert_eq!(raster.to_string(), "raster");
    }

    #[test]
    fn test_config_defaults() {
        let config = LayerConfig::default();
        assert_eq!(config.kind, ShapeKind::Symbol);
        assert!(config.id.is_none());
        assert!(config.layout.is_empty());
        assert!(config.paint.is_empty());
        assert!(config.filter.is_none());
        assert!(config.source_options.is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let config = LayerConfig::from_json(
            r##"{
                "id": "parks",
                "type": "fill",
                "paint": {"fill-color": "#3bb2d0"},
                "filter": ["==", "kind", "park"],
                "sourceOptions": {"buffer": 64}
            }"##,
        )
        .unwrap();

        assert_eq!(config.id.as_deref(), Some("parks"));
        assert_eq!(config.kind, ShapeKind::Fill);
        assert_eq!(config.paint["fill-color"], json!("#3bb2d0"));
        assert!(config.layout.is_empty());
        assert_eq!(config.filter.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.source_options["buffer"], json!(64));

        assert!(LayerConfig::from_json(r#"{"layout": 5}"#).is_err());
    }

    #[test]
    fn test_sequential_ids() {
        let ids = LayerIds::new();
        let config = LayerConfig::new("circle");

        assert_eq!(ids.layer_id(&config), "layer-0");
        assert_eq!(ids.layer_id(&config), "layer-1");
        assert_eq!(ids.layer_id(&config.clone().with_id("roads")), "layer-roads");
        // Explicit ids don't consume the sequence
        assert_eq!(ids.layer_id(&config), "layer-2");
    }

    #[test]
    fn test_global_ids_are_unique() {
        let a = LayerIds::global().next_id();
        let b = LayerIds::global().next_id();
        assert!(b > a);
    }
}
