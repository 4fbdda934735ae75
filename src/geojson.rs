//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! RFC 7946 GeoJSON / JSON-FG adapter (spec.md §6).
//!
//! Geometries round-trip through the `geojson` crate's `Value`; the
//! `coordRefSys` extension and the JSON-FG feature envelope are handled
//! here directly since neither is part of plain GeoJSON.

use crate::common::Crs;
use crate::errors::ValidationError;
use crate::geometry::{Geometry, LinearRing, Position};
use geojson::Value as GeoJsonValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

fn position_to_coords(p: &Position) -> Vec<f64> {
    vec![p.east, p.north]
}

fn coords_to_position(coords: &[f64]) -> Result<Position, ValidationError> {
    let east = coords.first().copied().unwrap_or(f64::NAN);
    let north = coords.get(1).copied().unwrap_or(f64::NAN);
    Position::new(east, north)
}

fn ring_to_coords(ring: &LinearRing) -> Vec<Vec<f64>> {
    ring.positions().iter().map(position_to_coords).collect()
}

fn coords_to_ring(coords: &[Vec<f64>]) -> Result<LinearRing, ValidationError> {
    let positions = coords
        .iter()
        .map(|c| coords_to_position(c))
        .collect::<Result<Vec<_>, _>>()?;
    LinearRing::new(positions)
}

/// `Geometry` -> plain GeoJSON geometry value (no CRS attached; see
/// `to_json_fg` for the CRS-carrying envelope).
pub fn to_geojson_geometry(geometry: &Geometry) -> geojson::Geometry {
    let value = match geometry {
        Geometry::Point { position, .. } => GeoJsonValue::Point(position_to_coords(position)),
        Geometry::LineString { points, .. } => {
            GeoJsonValue::LineString(points.iter().map(position_to_coords).collect())
        }
        Geometry::Polygon { rings, .. } => GeoJsonValue::Polygon(rings.iter().map(ring_to_coords).collect()),
        Geometry::BoundingBox { bbox, .. } => GeoJsonValue::Polygon(vec![bbox
            .as_rectangular_ring()
            .iter()
            .map(position_to_coords)
            .collect()]),
        Geometry::GeometryCollection { geometries, .. } => {
            GeoJsonValue::GeometryCollection(geometries.iter().map(to_geojson_geometry).collect())
        }
    };
    geojson::Geometry::new(value)
}

fn geojson_type_name(v: &GeoJsonValue) -> &'static str {
    match v {
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        _ => "unrecognized geometry value",
    }
}

/// Plain GeoJSON geometry value + an already-resolved CRS -> `Geometry`.
pub fn from_geojson_geometry(g: &geojson::Geometry, crs: Crs) -> Result<Geometry, ValidationError> {
    match &g.value {
        GeoJsonValue::Point(coords) => Ok(Geometry::point(coords_to_position(coords)?, crs)),
        GeoJsonValue::LineString(coords) => {
            let points = coords
                .iter()
                .map(|c| coords_to_position(c))
                .collect::<Result<Vec<_>, _>>()?;
            Geometry::line_string(points, crs)
        }
        GeoJsonValue::Polygon(rings) => {
            let rings = rings
                .iter()
                .map(|r| coords_to_ring(r))
                .collect::<Result<Vec<_>, _>>()?;
            Geometry::polygon(rings, crs)
        }
        GeoJsonValue::GeometryCollection(geometries) => {
            let geometries = geometries
                .iter()
                .map(|gm| from_geojson_geometry(gm, crs.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::geometry_collection(geometries, crs))
        }
        other => Err(ValidationError::UnsupportedGeometryType(geojson_type_name(other))),
    }
}

fn crs_to_coord_ref_sys(crs: &Crs) -> Option<Json> {
    if crs.is_default() {
        None
    } else {
        Some(Json::String(crs.to_string()))
    }
}

fn parse_crs_uri(s: &str) -> Option<Crs> {
    if s.eq_ignore_ascii_case("OGC:CRS84") || s.ends_with("CRS84") {
        return Some(Crs::crs84());
    }
    let (authority, code) = s.rsplit_once(':')?;
    let code: u32 = code.parse().ok()?;
    Some(Crs::new(authority.to_string(), code))
}

fn coord_ref_sys_to_crs(value: Option<&Json>) -> Crs {
    match value {
        None => Crs::default(),
        Some(Json::String(s)) => parse_crs_uri(s).unwrap_or_default(),
        Some(Json::Object(map)) => map
            .get("properties")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .and_then(parse_crs_uri)
            .unwrap_or_default(),
        _ => Crs::default(),
    }
}

/// The `{type:"Feature", time, place, geometry, properties, coordRefSys?}`
/// envelope of spec.md §6. When the geometry's CRS is the default
/// (`OGC:CRS84`), it is carried in `geometry` and `place` is `null`;
/// otherwise it is carried in `place` and `geometry` is `null`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFgFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub time: Option<Json>,
    pub place: Option<geojson::Geometry>,
    pub geometry: Option<geojson::Geometry>,
    pub properties: Option<Json>,
    #[serde(rename = "coordRefSys")]
    pub coord_ref_sys: Option<Json>,
}

pub fn to_json_fg(geometry: &Geometry) -> JsonFgFeature {
    let crs = geometry.crs();
    let gj = to_geojson_geometry(geometry);
    let (geometry_field, place_field) = if crs.is_default() {
        (Some(gj), None)
    } else {
        (None, Some(gj))
    };
    JsonFgFeature {
        feature_type: "Feature".to_string(),
        time: None,
        place: place_field,
        geometry: geometry_field,
        properties: None,
        coord_ref_sys: crs_to_coord_ref_sys(crs),
    }
}

pub fn from_json_fg(feature: &JsonFgFeature) -> Result<Geometry, ValidationError> {
    let crs = coord_ref_sys_to_crs(feature.coord_ref_sys.as_ref());
    let gj = feature
        .geometry
        .as_ref()
        .or(feature.place.as_ref())
        .ok_or(ValidationError::UnsupportedGeometryType("JSON-FG feature has neither geometry nor place"))?;
    from_geojson_geometry(gj, crs)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::Crs;

    #[test]
    fn round_trips_point_through_geojson() {
        let geometry = Geometry::point(Position::from_axes(30.0, 10.0), Crs::crs84());
        let gj = to_geojson_geometry(&geometry);
        let back = from_geojson_geometry(&gj, Crs::crs84()).unwrap();
        assert_eq!(back.bbox(), geometry.bbox());
    }

    #[test]
    fn default_crs_feature_uses_geometry_field() {
        let geometry = Geometry::point(Position::from_axes(1.0, 2.0), Crs::crs84());
        let feature = to_json_fg(&geometry);
        assert!(feature.geometry.is_some());
        assert!(feature.place.is_none());
        assert!(feature.coord_ref_sys.is_none());
    }

    #[test]
    fn non_default_crs_feature_uses_place_field() {
        let geometry = Geometry::point(Position::from_axes(1.0, 2.0), Crs::web_mercator());
        let feature = to_json_fg(&geometry);
        assert!(feature.geometry.is_none());
        assert!(feature.place.is_some());
        assert_eq!(feature.coord_ref_sys, Some(Json::String("EPSG:3857".to_string())));
    }

    #[test]
    fn json_fg_round_trip_preserves_crs() {
        let geometry = Geometry::point(Position::from_axes(1.0, 2.0), Crs::web_mercator());
        let feature = to_json_fg(&geometry);
        let back = from_json_fg(&feature).unwrap();
        assert_eq!(*back.crs(), Crs::web_mercator());
    }
}
