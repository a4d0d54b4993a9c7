use crate::domain::{Feature, Geometry, Record};
use tracing::debug;

pub const NO_PROPERTIES: &str = "No properties available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

/// A feature as rendered: the feature plus what was bound to it when it was added.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub feature: Feature,
    pub tooltip: String,
    /// Only features with properties get a click handler.
    pub clickable: bool,
}

/// Tooltip text for a record: id, name and one address line.
pub fn popup_from_properties(record: &Record) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    format!(
        "{}\n{}\n{}, {}, {} {}",
        record.id,
        text(&record.name),
        text(&record.street1),
        text(&record.city),
        text(&record.state),
        text(&record.zip),
    )
}

fn attach(id: LayerId, feature: Feature) -> Layer {
    let (tooltip, clickable) = feature
        .properties
        .as_ref()
        .map_or_else(|| (NO_PROPERTIES.to_string(), false), |record| {
            (popup_from_properties(record), true)
        });

    Layer {
        id,
        feature,
        tooltip,
        clickable,
    }
}

/// Layer group holding the current search or lookup results.
#[derive(Debug, Default)]
pub struct GeometryStore {
    layers: Vec<Layer>,
    next_id: u64,
}

impl GeometryStore {
    pub fn clear(&mut self) {
        debug!(count = self.layers.len(), "cleared result layers");
        self.layers.clear();
    }

    pub fn add_feature(&mut self, feature: Feature) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.push(attach(id, feature));
        id
    }

    pub fn add_features(&mut self, features: impl IntoIterator<Item = Feature>) -> Vec<LayerId> {
        features
            .into_iter()
            .map(|feature| self.add_feature(feature))
            .collect()
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.layers.iter().map(|layer| &layer.feature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnShape {
    pub id: ShapeId,
    pub geometry: Geometry,
}

/// Shapes produced by the drawing tool, pending submission.
#[derive(Debug)]
pub struct DrawnItems {
    shapes: Vec<DrawnShape>,
    next_id: u64,
    visible: bool,
}

impl Default for DrawnItems {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            next_id: 0,
            visible: true,
        }
    }
}

impl DrawnItems {
    pub fn add(&mut self, geometry: Geometry) -> ShapeId {
        self.next_id += 1;
        let id = ShapeId(self.next_id);
        self.shapes.push(DrawnShape { id, geometry });
        id
    }

    /// Replaces the geometry of a shape after an edit. Returns false for unknown shapes.
    pub fn replace(&mut self, id: ShapeId, geometry: Geometry) -> bool {
        self.shapes
            .iter_mut()
            .find(|shape| shape.id == id)
            .map(|shape| shape.geometry = geometry)
            .is_some()
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<DrawnShape> {
        let index = self.shapes.iter().position(|shape| shape.id == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn get(&self, id: ShapeId) -> Option<&DrawnShape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn shapes(&self) -> &[DrawnShape] {
        &self.shapes
    }

    pub const fn visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}
