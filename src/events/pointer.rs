//! Pointer events and the payload handed to child callbacks.

use crate::engine::MapEngine;
use geo_types::Coord;
use std::fmt;

/// Kinds of pointer event a layer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Click,
    MouseMove,
}

impl PointerEventKind {
    /// Event name as map engines spell it.
    pub fn name(&self) -> &'static str {
        match self {
            PointerEventKind::Click => "click",
            PointerEventKind::MouseMove => "mousemove",
        }
    }
}

/// Position on the map canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A pointer event as delivered by the map engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Pointer position on the canvas
    pub point: ScreenPoint,
    /// Geographic position under the pointer, if the engine resolved one
    pub lng_lat: Option<Coord<f64>>,
}

impl PointerEvent {
    pub fn click(point: ScreenPoint) -> Self {
        Self {
            kind: PointerEventKind::Click,
            point,
            lng_lat: None,
        }
    }

    pub fn mouse_move(point: ScreenPoint) -> Self {
        Self {
            kind: PointerEventKind::MouseMove,
            point,
            lng_lat: None,
        }
    }

    pub fn with_lng_lat(mut self, lng_lat: Coord<f64>) -> Self {
        self.lng_lat = Some(lng_lat);
        self
    }
}

/// Payload passed to a child's callbacks.
///
/// Carries the original pointer event, the rendered feature that matched the
/// child (absent for end-of-hover) and the map engine.
pub struct FeatureEvent<'a> {
    pub event: &'a PointerEvent,
    pub feature: Option<&'a geojson::Feature>,
    pub map: &'a dyn MapEngine,
}

impl fmt::Debug for FeatureEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureEvent")
            .field("event", self.event)
            .field("feature", &self.feature)
            .finish_non_exhaustive()
    }
}
