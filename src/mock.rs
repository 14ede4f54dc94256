//! In-memory map engine for tests.
//!
//! Records every call as a short string, keeps registered sources, layers
//! and listeners, answers hit-tests from a scripted list and can be told to
//! fail specific operations.

use crate::engine::{EngineError, EngineResult, LayerSpec, MapEngine, PointerListener, SourceSpec};
use crate::events::{PointerEvent, PointerEventKind, ScreenPoint};
use crate::geo::{FeatureCollection, FeatureId, ID_PROPERTY};
use geojson::JsonObject;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A rendered feature carrying only its identity.
pub fn rendered(id: usize) -> geojson::Feature {
    let mut properties = JsonObject::new();
    properties.insert(ID_PROPERTY.to_string(), id.into());
    geojson::Feature {
        bbox: None,
        geometry: None,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub struct RecordingEngine {
    pub calls: Vec<String>,
    pub sources: HashMap<String, SourceSpec>,
    pub data: HashMap<String, FeatureCollection>,
    pub layers: Vec<LayerSpec>,
    pub listeners: Vec<(PointerEventKind, Rc<dyn PointerListener>)>,
    /// Mutating calls fail with `Unavailable` when false
    pub available: bool,
    failing: HashSet<String>,
    hits: RefCell<Vec<geojson::Feature>>,
    queries: RefCell<Vec<String>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            sources: HashMap::new(),
            data: HashMap::new(),
            layers: Vec::new(),
            listeners: Vec::new(),
            available: true,
            failing: HashSet::new(),
            hits: RefCell::new(Vec::new()),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Fails every call whose name (`"remove_layer"`) or full record
    /// (`"on mousemove"`) matches.
    pub fn fail_on(&mut self, call: &str) {
        self.failing.insert(call.to_string());
    }

    pub fn clear_failures(&mut self) {
        self.failing.clear();
    }

    /// Sets the features returned by the following hit-tests.
    pub fn script_hits(&self, hits: Vec<geojson::Feature>) {
        *self.hits.borrow_mut() = hits;
    }

    /// Rendered features for `ids` with the properties last pushed to
    /// `source_id`, or bare identities if the source is gone.
    pub fn render(&self, source_id: &str, ids: &[usize]) -> Vec<geojson::Feature> {
        ids.iter()
            .map(|&id| {
                let stored = self
                    .data
                    .get(source_id)
                    .and_then(|fc| fc.get(FeatureId(id)));
                match stored {
                    Some(feature) => geojson::Feature {
                        properties: Some(feature.properties.clone()),
                        ..rendered(id)
                    },
                    None => rendered(id),
                }
            })
            .collect()
    }

    /// Layers named in each hit-test so far.
    pub fn queried_layers(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    /// Delivers an event to every listener subscribed to its kind.
    pub fn fire(&self, event: &PointerEvent) {
        let listeners: Vec<_> = self
            .listeners
            .iter()
            .filter(|(kind, _)| *kind == event.kind)
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener.on_pointer(self, event);
        }
    }

    fn record(&mut self, name: &str, arg: &str) -> EngineResult<()> {
        let call = format!("{} {}", name, arg);
        self.calls.push(call.clone());

        if !self.available {
            return Err(EngineError::Unavailable);
        }
        if self.failing.contains(name) || self.failing.contains(&call) {
            return Err(EngineError::Rejected(call));
        }
        Ok(())
    }
}

impl MapEngine for RecordingEngine {
    fn add_source(&mut self, id: &str, source: &SourceSpec) -> EngineResult<()> {
        self.record("add_source", id)?;
        if self.sources.contains_key(id) {
            return Err(EngineError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), source.clone());
        self.data.insert(id.to_string(), source.data.clone());
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> EngineResult<()> {
        self.record("remove_source", id)?;
        self.data.remove(id);
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::MissingSource(id.to_string()))
    }

    fn set_data(&mut self, source_id: &str, data: &FeatureCollection) -> EngineResult<()> {
        self.record("set_data", source_id)?;
        if !self.sources.contains_key(source_id) {
            return Err(EngineError::MissingSource(source_id.to_string()));
        }
        self.data.insert(source_id.to_string(), data.clone());
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> EngineResult<()> {
        self.record("add_layer", &layer.id)?;
        if self.layers.iter().any(|l| l.id == layer.id) {
            return Err(EngineError::DuplicateLayer(layer.id.clone()));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(EngineError::MissingSource(layer.source.clone()));
        }
        self.layers.push(layer.clone());
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> EngineResult<()> {
        self.record("remove_layer", id)?;
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() == before {
            return Err(EngineError::MissingLayer(id.to_string()));
        }
        Ok(())
    }

    fn on(&mut self, kind: PointerEventKind, listener: Rc<dyn PointerListener>) -> EngineResult<()> {
        self.record("on", kind.name())?;
        self.listeners.push((kind, listener));
        Ok(())
    }

    fn off(&mut self, kind: PointerEventKind, listener: &Rc<dyn PointerListener>) -> EngineResult<()> {
        self.record("off", kind.name())?;
        self.listeners
            .retain(|(k, l)| !(*k == kind && Rc::ptr_eq(l, listener)));
        Ok(())
    }

    fn query_rendered_features(&self, _point: ScreenPoint, layers: &[&str]) -> Vec<geojson::Feature> {
        self.queries
            .borrow_mut()
            .extend(layers.iter().map(|l| l.to_string()));
        self.hits.borrow().clone()
    }
}
