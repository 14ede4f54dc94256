//! Mounting a layer on a map engine and keeping its data in sync.

use super::{Children, LayerConfig, LayerIds};
use crate::engine::{EngineResult, LayerSpec, MapEngine, PointerListener, SourceSpec};
use crate::error::{LayerError, LayerResult};
use crate::events::{LayerListener, PointerEventKind};
use crate::geo::{build_collection, FeatureCollection};
use std::rc::Rc;

/// Lifecycle of a [`Layer`]. A layer is mounted at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Created, not yet registered with an engine
    Pending,
    /// Source, layer and listeners registered
    Mounted,
    /// Torn down; create a new layer to mount again
    Unmounted,
}

impl LayerState {
    fn name(&self) -> &'static str {
        match self {
            LayerState::Pending => "pending",
            LayerState::Mounted => "mounted",
            LayerState::Unmounted => "unmounted",
        }
    }
}

/// Something a mounted layer holds in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Registration {
    Source,
    Layer,
    Listener(PointerEventKind),
}

/// Registration order. Teardown walks it backwards.
const REGISTRATIONS: [Registration; 4] = [
    Registration::Source,
    Registration::Layer,
    Registration::Listener(PointerEventKind::Click),
    Registration::Listener(PointerEventKind::MouseMove),
];

/// A map engine layer whose features mirror a list of children.
#[derive(Debug)]
pub struct Layer {
    /// Engine identifier shared by the layer and its source
    id: String,
    config: LayerConfig,
    state: LayerState,
    listener: Rc<LayerListener>,
    /// List of the last accepted update
    children: Option<Children>,
    /// Collection of the last push into the engine
    data: FeatureCollection,
}

impl Layer {
    /// Creates a layer, drawing a default identifier from the process-wide
    /// sequence.
    pub fn new(config: LayerConfig) -> Self {
        Self::with_ids(config, LayerIds::global())
    }

    /// Creates a layer, drawing a default identifier from `ids`.
    pub fn with_ids(config: LayerConfig, ids: &LayerIds) -> Self {
        let id = ids.layer_id(&config);
        if !config.kind.has_geometry() {
            log::warn!(
                "Layer {} has type '{}', its children will not produce features",
                id,
                config.kind
            );
        }

        Self {
            listener: Rc::new(LayerListener::new(id.clone())),
            id,
            config,
            state: LayerState::Pending,
            children: None,
            data: FeatureCollection::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier of the data source; the same as the layer's.
    pub fn source_id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    /// The collection most recently pushed into the engine.
    pub fn feature_collection(&self) -> &FeatureCollection {
        &self.data
    }

    /// The handler registered for pointer events while mounted.
    pub fn listener(&self) -> &Rc<LayerListener> {
        &self.listener
    }

    /// Layer definition handed to the engine on mount.
    pub fn layer_spec(&self) -> LayerSpec {
        LayerSpec {
            id: self.id.clone(),
            source: self.source_id().to_string(),
            kind: self.config.kind.clone(),
            layout: self.config.layout.clone(),
            paint: self.config.paint.clone(),
            filter: self.config.filter.clone(),
        }
    }

    /// Source definition handed to the engine on mount, with no features.
    pub fn source_spec(&self) -> SourceSpec {
        SourceSpec {
            options: self.config.source_options.clone(),
            data: FeatureCollection::new(),
        }
    }

    fn invalid_state(&self, operation: &'static str) -> LayerError {
        LayerError::InvalidState {
            id: self.id.clone(),
            state: self.state.name(),
            operation,
        }
    }

    fn expect_state(&self, expected: LayerState, operation: &'static str) -> LayerResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn listener_handle(&self) -> Rc<dyn PointerListener> {
        self.listener.clone()
    }

    fn register(&self, map: &mut dyn MapEngine, registration: Registration) -> EngineResult<()> {
        match registration {
            Registration::Source => map.add_source(self.source_id(), &self.source_spec()),
            Registration::Layer => map.add_layer(&self.layer_spec()),
            Registration::Listener(kind) => map.on(kind, self.listener_handle()),
        }
    }

    fn release(&self, map: &mut dyn MapEngine, registration: Registration) -> EngineResult<()> {
        match registration {
            Registration::Source => map.remove_source(self.source_id()),
            Registration::Layer => map.remove_layer(&self.id),
            Registration::Listener(kind) => map.off(kind, &self.listener_handle()),
        }
    }

    /// Releases registrations newest first, continuing past failures.
    ///
    /// Returns the first failure.
    fn release_all(&self, map: &mut dyn MapEngine, registrations: &[Registration]) -> EngineResult<()> {
        let mut first_error = None;
        for registration in registrations.iter().rev() {
            if let Err(e) = self.release(map, *registration) {
                log::warn!("Failed to release {:?} of {}: {}", registration, self.id, e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Registers the source, the layer and the pointer listeners.
    ///
    /// Children set before mounting are pushed once everything is
    /// registered. If a registration or that first push fails, the
    /// registrations already made are released and the error is returned;
    /// the layer stays pending.
    pub fn mount(&mut self, map: &mut dyn MapEngine) -> LayerResult<()> {
        self.expect_state(LayerState::Pending, "mount")?;

        for (done, registration) in REGISTRATIONS.iter().enumerate() {
            if let Err(e) = self.register(map, *registration) {
                log::warn!("Failed to mount {} at {:?}: {}", self.id, registration, e);
                self.roll_back(map, &REGISTRATIONS[..done]);
                return Err(e.into());
            }
        }

        if let Some(children) = self.children.clone() {
            if let Err(e) = self.push(map, &children) {
                log::warn!("Failed to push initial data of {}: {}", self.id, e);
                self.roll_back(map, &REGISTRATIONS);
                return Err(e);
            }
        }

        self.state = LayerState::Mounted;
        log::debug!("Mounted {} ({})", self.id, self.config.kind);
        Ok(())
    }

    /// Undoes a partial mount. The error that caused it is what the caller
    /// sees, so release failures are only logged.
    fn roll_back(&self, map: &mut dyn MapEngine, registrations: &[Registration]) {
        if let Err(e) = self.release_all(map, registrations) {
            log::debug!("Rollback of {} incomplete: {}", self.id, e);
        }
    }

    /// Accepts a new children list.
    ///
    /// Nothing happens if `children` is the list already accepted. Otherwise,
    /// once mounted, a freshly built collection replaces the source data and
    /// routing switches to the new list. A list whose push fails is not
    /// accepted, so handing it over again retries the push. Returns whether
    /// data was pushed.
    pub fn set_children(&mut self, map: &mut dyn MapEngine, children: Children) -> LayerResult<bool> {
        if self.state == LayerState::Unmounted {
            return Err(self.invalid_state("update"));
        }

        if let Some(current) = &self.children {
            if current.same_list(&children) {
                log::trace!("Children of {} unchanged, skipping sync", self.id);
                return Ok(false);
            }
        }

        let pushed = self.state == LayerState::Mounted;
        if pushed {
            self.push(map, &children)?;
        }

        self.listener.set_children(children.clone());
        self.children = Some(children);
        Ok(pushed)
    }

    fn push(&mut self, map: &mut dyn MapEngine, children: &Children) -> LayerResult<()> {
        let data = build_collection(&self.config.kind, children);
        map.set_data(self.source_id(), &data)?;
        log::debug!(
            "Synced {}: {} features from {} children",
            self.id,
            data.len(),
            children.len()
        );
        self.data = data;
        Ok(())
    }

    /// Unsubscribes the listeners, then removes the layer and its source.
    ///
    /// Every step runs even if an earlier one fails; the first failure is
    /// returned. The layer is unmounted either way.
    pub fn unmount(&mut self, map: &mut dyn MapEngine) -> LayerResult<()> {
        self.expect_state(LayerState::Mounted, "unmount")?;
        self.state = LayerState::Unmounted;

        let result = self.release_all(map, &REGISTRATIONS);
        log::debug!("Unmounted {}", self.id);
        result.map_err(LayerError::from)
    }
}
