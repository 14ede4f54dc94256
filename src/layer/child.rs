//! Child feature descriptors and the ordered list a layer renders.

use crate::error::LayerResult;
use crate::events::FeatureEvent;
use crate::geo::{CoordinateTree, FeatureId};
use geojson::JsonObject;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Handler invoked with the event routed to a child.
pub type Callback = Box<dyn Fn(&FeatureEvent<'_>)>;

/// One declared feature of a layer.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ChildDescriptor {
    /// Coordinates as declared, nested GeoJSON style
    pub coordinates: CoordinateTree,
    /// Draw a line layer's child as a closed outline
    pub outline: bool,
    /// Properties copied onto the feature
    pub properties: JsonObject,
    #[serde(skip)]
    pub(crate) on_click: Option<Callback>,
    #[serde(skip)]
    pub(crate) on_hover: Option<Callback>,
    #[serde(skip)]
    pub(crate) on_end_hover: Option<Callback>,
}

impl ChildDescriptor {
    /// Creates a child at the given coordinates.
    pub fn new(coordinates: impl Into<CoordinateTree>) -> Self {
        Self {
            coordinates: coordinates.into(),
            ..Default::default()
        }
    }

    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_properties(mut self, properties: JsonObject) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Called for every hit feature of this child on click.
    pub fn on_click(mut self, f: impl Fn(&FeatureEvent<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Called on every pointer move while the pointer is over this child.
    pub fn on_hover(mut self, f: impl Fn(&FeatureEvent<'_>) + 'static) -> Self {
        self.on_hover = Some(Box::new(f));
        self
    }

    /// Called once when the pointer leaves this child.
    pub fn on_end_hover(mut self, f: impl Fn(&FeatureEvent<'_>) + 'static) -> Self {
        self.on_end_hover = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ChildDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildDescriptor")
            .field("coordinates", &self.coordinates)
            .field("outline", &self.outline)
            .field("properties", &self.properties)
            .field("on_click", &self.on_click.is_some())
            .field("on_hover", &self.on_hover.is_some())
            .field("on_end_hover", &self.on_end_hover.is_some())
            .finish()
    }
}

/// Ordered children of a layer.
///
/// Cloning shares the list. A layer only re-syncs when handed a list that
/// is not the one it last saw (see [`Children::same_list`]).
#[derive(Debug, Clone)]
pub struct Children(Rc<[ChildDescriptor]>);

impl Children {
    /// Parses callback-free children from a JSON array.
    pub fn from_json(json: &str) -> LayerResult<Self> {
        let children: Vec<ChildDescriptor> = serde_json::from_str(json)?;
        Ok(children.into())
    }

    /// Returns true if both handles point at the same list.
    pub fn same_list(&self, other: &Children) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Resolves the child a feature identity was assigned to.
    pub fn get(&self, id: FeatureId) -> Option<&ChildDescriptor> {
        self.0.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildDescriptor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Children {
    fn default() -> Self {
        Children(Rc::from(Vec::new()))
    }
}

impl From<Vec<ChildDescriptor>> for Children {
    fn from(children: Vec<ChildDescriptor>) -> Self {
        Children(children.into())
    }
}

impl FromIterator<ChildDescriptor> for Children {
    fn from_iter<I: IntoIterator<Item = ChildDescriptor>>(iter: I) -> Self {
        Children(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a ChildDescriptor;
    type IntoIter = std::slice::Iter<'a, ChildDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
