//! GeoJSON country dataset loader.
//!
//! Accepts a `FeatureCollection` whose features carry Natural Earth style
//! properties (`NAME`, `ADMIN`, `CONTINENT`, `SUBREGION`, `POP_EST`) and a
//! `Polygon` or `MultiPolygon` geometry. Other geometry types are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use foundation::bounds::GeoBounds;
use scene::{Country, CountryCollection, CountryGeometry, CountryProperties, Ring};
use serde_json::{Map, Value};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

pub fn load_countries(path: impl AsRef<Path>) -> Result<CountryCollection, DatasetError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let countries = countries_from_geojson_str(&payload)?;
    info!(
        path = %path.display(),
        countries = countries.len(),
        "loaded country dataset"
    );
    Ok(countries)
}

pub fn countries_from_geojson_str(payload: &str) -> Result<CountryCollection, DatasetError> {
    let value: Value = serde_json::from_str(payload)?;
    countries_from_geojson_value(&value)
}

pub fn countries_from_geojson_value(value: &Value) -> Result<CountryCollection, DatasetError> {
    let obj = value
        .as_object()
        .ok_or(DatasetError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(DatasetError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(DatasetError::NotAFeatureCollection);
    }

    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(DatasetError::NotAFeatureCollection)?;

    let mut countries = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let invalid = |reason: String| DatasetError::InvalidFeature { index, reason };

        let feat_obj = feat_val
            .as_object()
            .ok_or_else(|| invalid("feature must be an object".to_string()))?;

        let properties = parse_properties(
            feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .unwrap_or(&Map::new()),
        );

        let geometry_val = feat_obj
            .get("geometry")
            .ok_or_else(|| invalid("feature missing geometry".to_string()))?;
        let Some(geometry) = parse_geometry(geometry_val).map_err(invalid)? else {
            warn!(
                index,
                name = properties.display_name().unwrap_or("<unnamed>"),
                "skipping feature without area geometry"
            );
            continue;
        };

        let bbox = match feat_obj.get("bbox") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_bbox(v).map_err(invalid)?),
        };

        let country = Country::new(properties, geometry, bbox)
            .ok_or_else(|| invalid("feature has neither NAME nor ADMIN".to_string()))?;
        countries.push(country);
    }

    Ok(CountryCollection::new(countries))
}

fn parse_properties(props: &Map<String, Value>) -> CountryProperties {
    let text = |key: &str| props.get(key).and_then(|v| v.as_str()).map(str::to_string);
    let pop_est = match props.get("POP_EST") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    CountryProperties {
        name: text("NAME"),
        admin: text("ADMIN"),
        continent: text("CONTINENT"),
        subregion: text("SUBREGION"),
        pop_est,
    }
}

/// `Ok(None)` for valid geometries that are not areas.
fn parse_geometry(value: &Value) -> Result<Option<CountryGeometry>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" | "MultiPolygon" => {
            let coords = obj
                .get("coordinates")
                .ok_or("geometry missing coordinates".to_string())?;
            if ty == "Polygon" {
                Ok(Some(CountryGeometry::Polygon(parse_polygon(coords)?)))
            } else {
                Ok(Some(CountryGeometry::MultiPolygon(parse_multi_polygon(
                    coords,
                )?)))
            }
        }
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "GeometryCollection" => {
            Ok(None)
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<[f64; 2], String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lng, lat]".to_string());
    }
    let lng = arr[0]
        .as_f64()
        .ok_or("position lng must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("position lat must be a number".to_string())?;
    Ok([lng, lat])
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Ring>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Ring>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}

fn parse_bbox(value: &Value) -> Result<GeoBounds, String> {
    let arr = value
        .as_array()
        .ok_or("bbox must be an array".to_string())?;
    if arr.len() != 4 {
        return Err(format!("bbox must have 4 numbers, got {}", arr.len()));
    }
    let mut out = [0.0f64; 4];
    for (slot, v) in out.iter_mut().zip(arr) {
        *slot = v.as_f64().ok_or("bbox entries must be numbers".to_string())?;
    }
    Ok(GeoBounds::from_bbox(out))
}
