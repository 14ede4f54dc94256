//! Map engine interface.
//!
//! The engine owns rendering, tiling and hit-testing. A layer only talks to
//! it through this trait: it registers a source and a layer, pushes feature
//! collections into the source, subscribes a listener for pointer events and
//! asks which rendered features lie under the pointer.

use crate::events::{PointerEvent, PointerEventKind, ScreenPoint};
use crate::geo::FeatureCollection;
use crate::layer::ShapeKind;
use geojson::JsonObject;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures reported by a map engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("map engine unavailable")]
    Unavailable,
    #[error("source already exists: {0}")]
    DuplicateSource(String),
    #[error("source not found: {0}")]
    MissingSource(String),
    #[error("layer already exists: {0}")]
    DuplicateLayer(String),
    #[error("layer not found: {0}")]
    MissingLayer(String),
    #[error("engine rejected request: {0}")]
    Rejected(String),
}

/// GeoJSON data source definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec {
    /// Caller options (cluster, buffer, tolerance...) merged at the top level
    #[serde(flatten)]
    pub options: JsonObject,
    pub data: FeatureCollection,
}

/// Style layer definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub layout: JsonObject,
    pub paint: JsonObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<Value>>,
}

/// Handler object an engine invokes for pointer events.
pub trait PointerListener {
    fn on_pointer(&self, map: &dyn MapEngine, event: &PointerEvent);
}

/// The rendering engine a layer synchronizes with.
pub trait MapEngine {
    fn add_source(&mut self, id: &str, source: &SourceSpec) -> EngineResult<()>;

    fn remove_source(&mut self, id: &str) -> EngineResult<()>;

    /// Replaces the source's data wholesale.
    fn set_data(&mut self, source_id: &str, data: &FeatureCollection) -> EngineResult<()>;

    fn add_layer(&mut self, layer: &LayerSpec) -> EngineResult<()>;

    fn remove_layer(&mut self, id: &str) -> EngineResult<()>;

    /// Subscribes a listener to every event of `kind`.
    fn on(&mut self, kind: PointerEventKind, listener: Rc<dyn PointerListener>) -> EngineResult<()>;

    /// Unsubscribes a listener previously passed to [`MapEngine::on`],
    /// matched by pointer identity.
    fn off(&mut self, kind: PointerEventKind, listener: &Rc<dyn PointerListener>) -> EngineResult<()>;

    /// Rendered features under `point` in the given layers, topmost first.
    ///
    /// Features carry the properties of the last `set_data` call, including
    /// their identity under [`ID_PROPERTY`](crate::geo::ID_PROPERTY).
    fn query_rendered_features(&self, point: ScreenPoint, layers: &[&str]) -> Vec<geojson::Feature>;
}
