//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Coordinate reference system tag and other small shared value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized coordinate reference system, identified by authority + code.
///
/// The engine never reprojects between CRSs (see the crate's Non-goals); it
/// only ever compares two `Crs` values for identity (`==`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    pub authority: String,
    pub code: u32,
}

impl Crs {
    pub fn new(authority: impl Into<String>, code: u32) -> Self {
        Self {
            authority: authority.into(),
            code,
        }
    }

    /// `EPSG:4326`, geographic WGS 84 (lat, lon order per EPSG, but this
    /// crate follows the GeoJSON/`OGC:CRS84` convention of (lon, lat)).
    pub fn epsg(code: u32) -> Self {
        Self::new("EPSG", code)
    }

    /// `OGC:CRS84`, the default CRS for GeoJSON and JSON-FG `geometry`.
    pub fn crs84() -> Self {
        Self::new("OGC", 84)
    }

    pub fn web_mercator() -> Self {
        Self::epsg(3857)
    }

    pub fn wgs84() -> Self {
        Self::epsg(4326)
    }

    /// Whether this CRS is the JSON-FG default (`OGC:CRS84`).
    pub fn is_default(&self) -> bool {
        *self == Self::crs84()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::crs84()
    }
}

/// Which corner of a tile matrix corresponds to tile (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerOfOrigin {
    /// Tile row increases southward from the matrix's north-west corner.
    TopLeft,
    /// Tile row increases northward from the matrix's south-west corner.
    BottomLeft,
}

/// The axis a coordinate or index belongs to, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    East,
    North,
}

/// Optional human-facing metadata, shared by `TileMatrixSet` and `TileMatrix`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleDescriptionKeywords {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
}
