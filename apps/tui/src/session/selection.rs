use crate::domain::{Geometry, LatLng, Record};
use tracing::info;

/// The record the user last navigated to or clicked, kept by id.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentRecord {
    pub id: i64,
    pub name: String,
    pub position: LatLng,
}

impl From<&Record> for CurrentRecord {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone().unwrap_or_default(),
            position: record.position(),
        }
    }
}

/// Selection state of one editing session.
///
/// `current` follows navigation and clicks, `selected_geom` follows the drawing
/// tool only, and at most one fly-to marker exists. Each slot is overwritten,
/// never merged.
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<CurrentRecord>,
    selected_geom: Option<Geometry>,
    marker: Option<LatLng>,
}

impl Selection {
    pub const fn current(&self) -> Option<&CurrentRecord> {
        self.current.as_ref()
    }

    pub const fn selected_geometry(&self) -> Option<&Geometry> {
        self.selected_geom.as_ref()
    }

    pub const fn marker(&self) -> Option<LatLng> {
        self.marker
    }

    pub(crate) fn select(&mut self, record: &Record) {
        info!(id = record.id, "selected record");
        self.current = Some(CurrentRecord::from(record));
    }

    pub(crate) fn capture(&mut self, geometry: Geometry) {
        self.selected_geom = Some(geometry);
    }

    /// Places the fly-to marker and returns the one it replaced.
    pub(crate) fn place_marker(&mut self, at: LatLng) -> Option<LatLng> {
        self.marker.replace(at)
    }

    /// Id `next` asks for: one past the current record, or the first record.
    pub fn next_target(&self) -> i64 {
        self.current
            .as_ref()
            .map_or(1, |current| current.id.saturating_add(1))
    }

    /// Id `prev` asks for. Never goes below 1.
    pub fn prev_target(&self) -> i64 {
        match &self.current {
            Some(current) if current.id > 1 => current.id - 1,
            _ => 1,
        }
    }
}
