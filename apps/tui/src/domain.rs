use crate::error::{EditorError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// GeoJSON position, `[longitude, latitude]`.
pub type Position = [f64; 2];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses the fly-to input, `"lat,lng"`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || EditorError::InvalidCoordinates(input.to_string());
        let (lat, lng) = input.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

        if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(invalid());
        }

        Ok(Self { lat, lng })
    }

    pub const fn to_position(self) -> Position {
        [self.lng, self.lat]
    }
}

/// A store location as the backend serializes it. Key names are fixed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "Street1", default, deserialize_with = "lenient_text")]
    pub street1: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(rename = "Zip", default, deserialize_with = "lenient_text")]
    pub zip: Option<String>,
    #[serde(rename = "Latitude", default)]
    pub latitude: f64,
    #[serde(rename = "Longitude", default)]
    pub longitude: f64,
    /// GeoJSON geometry serialized into a string, empty when no polygon is stored.
    #[serde(
        rename = "Polygon",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub polygon: Option<String>,
    /// Server-defined properties the editor does not interpret (MetroID, ZoneID, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Decodes the polygon embedded in the record, if there is one.
    pub fn embedded_polygon(&self) -> Result<Option<Geometry>> {
        match self.polygon.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(encoded) => serde_json::from_str(encoded)
                .map(Some)
                .map_err(|source| EditorError::EmbeddedPolygon {
                    id: self.id,
                    source,
                }),
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    #[default]
    Feature,
}

/// The rendering unit: a geometry plus the record it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: FeatureKind,
    #[serde(default)]
    pub properties: Option<Record>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub const fn new(properties: Option<Record>, geometry: Option<Geometry>) -> Self {
        Self {
            kind: FeatureKind::Feature,
            properties,
            geometry,
        }
    }

    pub fn record_id(&self) -> Option<i64> {
        self.properties.as_ref().map(|record| record.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Builds a closed single-ring polygon from drawn vertices.
    pub fn polygon_from_vertices(vertices: &[LatLng]) -> Self {
        let mut ring: Vec<Position> = vertices.iter().map(|v| v.to_position()).collect();
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        Self::Polygon(vec![ring])
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::MultiPoint(_) => "MultiPoint",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Every path that should be stroked when drawing the geometry.
    pub fn paths(&self) -> Vec<&[Position]> {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => Vec::new(),
            Self::LineString(line) => vec![line.as_slice()],
            Self::MultiLineString(lines) | Self::Polygon(lines) => {
                lines.iter().map(Vec::as_slice).collect()
            }
            Self::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter().map(Vec::as_slice))
                .collect(),
        }
    }

    pub fn positions(&self) -> Vec<Position> {
        match self {
            Self::Point(point) => vec![*point],
            Self::MultiPoint(points) => points.clone(),
            _ => self.paths().into_iter().flatten().copied().collect(),
        }
    }

    /// Mean of all vertices, where the map labels a drawn shape.
    pub fn centroid(&self) -> Option<LatLng> {
        let positions = self.positions();
        if positions.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = positions.len() as f64;
        let (lng, lat) = positions
            .iter()
            .fold((0.0, 0.0), |(lng, lat), p| (lng + p[0], lat + p[1]));
        Some(LatLng::new(lat / count, lng / count))
    }

    pub fn translate(&mut self, d_lat: f64, d_lng: f64) {
        let shift = |p: &mut Position| {
            p[0] += d_lng;
            p[1] += d_lat;
        };
        match self {
            Self::Point(point) => shift(point),
            Self::MultiPoint(points) | Self::LineString(points) => points.iter_mut().for_each(shift),
            Self::MultiLineString(lines) | Self::Polygon(lines) => {
                lines.iter_mut().flatten().for_each(shift);
            }
            Self::MultiPolygon(polygons) => {
                polygons.iter_mut().flatten().flatten().for_each(shift);
            }
        }
    }

    /// Approximate area in square kilometres, zero for non-areal geometries.
    pub fn area_km2(&self) -> f64 {
        match self {
            Self::Polygon(rings) => area_polygon(rings),
            Self::MultiPolygon(polygons) => polygons.iter().map(|p| area_polygon(p)).sum(),
            _ => 0.0,
        }
    }
}

const KM_PER_DEGREE: f64 = 111.32;

fn area_ring(ring: &[Position]) -> f64 {
    let Some(mut previous) = ring.last() else {
        return 0.0;
    };
    #[allow(clippy::cast_precision_loss)]
    let mean_lat = ring.iter().map(|p| p[1]).sum::<f64>() / ring.len() as f64;
    let lng_scale = mean_lat.to_radians().cos() * KM_PER_DEGREE;

    let mut sum = 0.0;
    for current in ring {
        sum += (previous[0] - current[0]) * lng_scale * (current[1] + previous[1]) * KM_PER_DEGREE;
        previous = current;
    }
    (sum / 2.0).abs()
}

fn area_polygon(rings: &[Vec<Position>]) -> f64 {
    let mut rings = rings.iter();
    let outer = rings.next().map_or(0.0, |ring| area_ring(ring));
    rings.fold(outer, |area, hole| area - area_ring(hole)).max(0.0)
}

/// Sparse search filters. Zero and empty mean "not filtered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub store_id: i64,
    pub metro_id: i64,
    pub zone_id: i64,
    pub city: String,
    pub state: String,
}

impl SearchFilters {
    pub fn from_form(
        store_id: &str,
        metro_id: &str,
        zone_id: &str,
        city: &str,
        state: &str,
    ) -> Result<Self> {
        Ok(Self {
            store_id: parse_form_int("store_id", store_id)?,
            metro_id: parse_form_int("metro_id", metro_id)?,
            zone_id: parse_form_int("zone_id", zone_id)?,
            city: city.trim().to_string(),
            state: state.trim().to_string(),
        })
    }
}

/// Blank numeric form fields mean 0.
pub fn parse_form_int(field: &'static str, value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| EditorError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Accepts either a bare array of features or a `FeatureCollection` object.
///
/// Features are decoded one by one. A feature whose properties cannot be read
/// is kept without them, so it renders with the placeholder tooltip.
pub fn parse_features(body: &[u8]) -> Result<Vec<Feature>> {
    let items = match serde_json::from_slice(body)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(mut collection) => match collection.remove("features") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => return Ok(Vec::new()),
            _ => return Err(unexpected_body("got an object without a features array")),
        },
        other => return Err(unexpected_body(&format!("got a bare {}", json_kind(&other)))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_feature(index, item))
        .collect()
}

fn decode_feature(index: usize, item: Value) -> Result<Feature> {
    let mut fields = match item {
        Value::Object(fields) => fields,
        other => {
            return Err(unexpected_body(&format!(
                "feature {index} is not an object but {}",
                json_kind(&other)
            )))
        }
    };

    let geometry = match fields.remove("geometry") {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value(value)?),
    };
    let properties = match fields.remove("properties") {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value::<Record>(value) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(index, %error, "unreadable feature properties, rendering without them");
                None
            }
        },
    };

    Ok(Feature::new(properties, geometry))
}

fn unexpected_body(detail: &str) -> EditorError {
    EditorError::Decode(serde_json::Error::custom(format!(
        "expected an array of features or a FeatureCollection, {detail}"
    )))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
