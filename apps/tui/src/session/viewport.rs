use crate::domain::LatLng;
use tracing::debug;

pub const DEFAULT_CENTER: LatLng = LatLng::new(37.1, -90.4);
pub const DEFAULT_ZOOM: u8 = 5;
pub const RECORD_ZOOM: u8 = 16;
pub const FLY_TO_ZOOM: u8 = 17;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;

/// Fraction of the visible span moved by one pan step.
const PAN_STEP: f64 = 0.1;

/// The visible part of the map: a center and a slippy-map style zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    center: LatLng,
    zoom: u8,
    recenters: u64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            recenters: 0,
        }
    }
}

impl Viewport {
    pub const fn center(&self) -> LatLng {
        self.center
    }

    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Number of fly-to transitions so far.
    pub const fn recenters(&self) -> u64 {
        self.recenters
    }

    pub fn recenter(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.recenters += 1;
        debug!(lat = center.lat, lng = center.lng, zoom = self.zoom, "recentered viewport");
    }

    /// Degrees of (latitude, longitude) visible at the current zoom.
    pub fn span(&self) -> (f64, f64) {
        let lng_span = 360.0 / 2_f64.powi(i32::from(self.zoom) - 1);
        (lng_span / 2.0, lng_span)
    }

    /// Canvas bounds as `([west, east], [south, north])`.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let (lat_span, lng_span) = self.span();
        (
            [
                self.center.lng - lng_span / 2.0,
                self.center.lng + lng_span / 2.0,
            ],
            [
                self.center.lat - lat_span / 2.0,
                self.center.lat + lat_span / 2.0,
            ],
        )
    }

    pub fn pan(&mut self, north_steps: i8, east_steps: i8) {
        let (lat_span, lng_span) = self.span();
        let lat = self.center.lat + f64::from(north_steps) * lat_span * PAN_STEP;
        let mut lng = self.center.lng + f64::from(east_steps) * lng_span * PAN_STEP;
        if lng > 180.0 {
            lng -= 360.0;
        } else if lng < -180.0 {
            lng += 360.0;
        }
        self.center = LatLng::new(lat.clamp(-90.0, 90.0), lng);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }
}
