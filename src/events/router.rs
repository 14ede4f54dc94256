//! Routing hit-test results back to the children that produced them.
//!
//! Hits are resolved through the identity stored in each rendered feature's
//! properties. Identities that no longer resolve to a child (the list changed
//! since the engine last rendered), identities that are not integers and
//! children without a handler for the event are all skipped.

use super::{FeatureEvent, HoverTracker, HoverTransition, PointerEvent, PointerEventKind};
use crate::engine::{MapEngine, PointerListener};
use crate::geo::FeatureId;
use crate::layer::{Callback, ChildDescriptor, Children};
use std::cell::RefCell;

/// Identity of a rendered feature, read from its properties.
pub fn feature_id(feature: &geojson::Feature) -> Option<FeatureId> {
    FeatureId::from_properties(feature.properties.as_ref())
}

/// Identities of all hits that carry one, in hit order.
pub fn hit_ids(hits: &[geojson::Feature]) -> impl Iterator<Item = FeatureId> + '_ {
    hits.iter().filter_map(feature_id)
}

fn resolve<'c>(children: &'c Children, id: Option<FeatureId>) -> Option<&'c ChildDescriptor> {
    let id = id?;
    let child = children.get(id);
    if child.is_none() {
        log::trace!("No child for feature {} ({} children)", id, children.len());
    }
    child
}

fn invoke(callback: Option<&Callback>, event: &FeatureEvent<'_>) -> bool {
    match callback {
        Some(callback) => {
            callback(event);
            true
        }
        None => false,
    }
}

/// Invokes `on_click` for every hit, in hit order.
///
/// The same child hit twice is called twice. Returns the number of
/// callbacks invoked.
pub fn route_click(
    children: &Children,
    hits: &[geojson::Feature],
    event: &PointerEvent,
    map: &dyn MapEngine,
) -> usize {
    let mut invoked = 0;
    for feature in hits {
        let Some(child) = resolve(children, feature_id(feature)) else {
            continue;
        };
        let payload = FeatureEvent {
            event,
            feature: Some(feature),
            map,
        };
        if invoke(child.on_click.as_ref(), &payload) {
            invoked += 1;
        }
    }
    invoked
}

/// Invokes `on_hover` for every hit and `on_end_hover` for every identity
/// the pointer left.
///
/// `transition` must come from feeding the same hits to a
/// [`HoverTracker`]. Returns the number of callbacks invoked.
pub fn route_hover(
    children: &Children,
    hits: &[geojson::Feature],
    transition: &HoverTransition,
    event: &PointerEvent,
    map: &dyn MapEngine,
) -> usize {
    let mut invoked = 0;
    for feature in hits {
        let Some(child) = resolve(children, feature_id(feature)) else {
            continue;
        };
        let payload = FeatureEvent {
            event,
            feature: Some(feature),
            map,
        };
        if invoke(child.on_hover.as_ref(), &payload) {
            invoked += 1;
        }
    }

    for id in &transition.exited {
        let Some(child) = resolve(children, Some(*id)) else {
            continue;
        };
        let payload = FeatureEvent {
            event,
            feature: None,
            map,
        };
        if invoke(child.on_end_hover.as_ref(), &payload) {
            invoked += 1;
        }
    }
    invoked
}

#[derive(Debug, Default)]
struct ListenerState {
    children: Children,
    hover: HoverTracker,
}

/// The handler a mounted layer registers with its map engine.
///
/// Holds the children of the last sync and the hover set. Internal state is
/// never borrowed while child callbacks run.
#[derive(Debug)]
pub struct LayerListener {
    layer_id: String,
    state: RefCell<ListenerState>,
}

impl LayerListener {
    pub fn new(layer_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            state: RefCell::new(ListenerState::default()),
        }
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// Points routing at a new children list.
    pub fn set_children(&self, children: Children) {
        self.state.borrow_mut().children = children;
    }

    pub fn children(&self) -> Children {
        self.state.borrow().children.clone()
    }

    /// Snapshot of the identities currently hovered.
    pub fn hovered(&self) -> Vec<FeatureId> {
        self.state.borrow().hover.hovered().iter().copied().collect()
    }

    /// Handles one pointer event, returning the number of callbacks invoked.
    pub fn dispatch(&self, map: &dyn MapEngine, event: &PointerEvent) -> usize {
        let hits = map.query_rendered_features(event.point, &[self.layer_id.as_str()]);

        match event.kind {
            PointerEventKind::Click => {
                let children = self.children();
                route_click(&children, &hits, event, map)
            }
            PointerEventKind::MouseMove => {
                let (children, transition) = {
                    let mut state = self.state.borrow_mut();
                    let transition = state.hover.update(hit_ids(&hits));
                    (state.children.clone(), transition)
                };
                route_hover(&children, &hits, &transition, event, map)
            }
        }
    }
}

impl PointerListener for LayerListener {
    fn on_pointer(&self, map: &dyn MapEngine, event: &PointerEvent) {
        let invoked = self.dispatch(map, event);
        log::trace!(
            "{} on {}: {} callbacks",
            event.kind.name(),
            self.layer_id,
            invoked
        );
    }
}
