//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Immutable geometry value objects: `Position`, `BoundingBox`, `LinearRing`
//! and the `Geometry` sum type.

use crate::common::Crs;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// An ordered pair (east, north) of finite real numbers in some CRS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub east: f64,
    pub north: f64,
}

impl Position {
    pub fn new(east: f64, north: f64) -> Result<Self, ValidationError> {
        if !east.is_finite() || !north.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(east, north));
        }
        Ok(Self { east, north })
    }

    /// Coordinate on the given axis index: 0 = east, 1 = north.
    pub(crate) fn on_axis(&self, axis: usize) -> f64 {
        if axis == 0 {
            self.east
        } else {
            self.north
        }
    }

    pub(crate) fn from_axes(axis0: f64, axis1: f64) -> Self {
        Self {
            east: axis0,
            north: axis1,
        }
    }
}

/// Four reals [minEast, minNorth, maxEast, maxNorth].
///
/// Empty geometry collections carry the sentinel `(+inf, +inf, -inf, -inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_east: f64,
    pub min_north: f64,
    pub max_east: f64,
    pub max_north: f64,
}

impl BoundingBox {
    pub fn new(min_east: f64, min_north: f64, max_east: f64, max_north: f64) -> Self {
        Self {
            min_east,
            min_north,
            max_east,
            max_north,
        }
    }

    /// Sentinel bbox for an empty geometry collection.
    pub fn empty() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    pub fn is_empty(&self) -> bool {
        self.min_east > self.max_east || self.min_north > self.max_north
    }

    pub(crate) fn from_positions<'a>(positions: impl Iterator<Item = &'a Position>) -> Self {
        let mut bbox = Self::empty();
        for p in positions {
            bbox.min_east = bbox.min_east.min(p.east);
            bbox.min_north = bbox.min_north.min(p.north);
            bbox.max_east = bbox.max_east.max(p.east);
            bbox.max_north = bbox.max_north.max(p.north);
        }
        bbox
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_east.min(other.min_east),
            self.min_north.min(other.min_north),
            self.max_east.max(other.max_east),
            self.max_north.max(other.max_north),
        )
    }

    /// Clip this bbox against `other`, producing the (possibly empty) intersection.
    pub fn clamp_to_bounding_box(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_east.max(other.min_east),
            self.min_north.max(other.min_north),
            self.max_east.min(other.max_east),
            self.max_north.min(other.max_north),
        )
    }

    /// The bbox as a closed rectangular ring, traversed counter-clockwise
    /// starting at the south-west corner.
    pub(crate) fn as_rectangular_ring(&self) -> Vec<Position> {
        vec![
            Position::from_axes(self.min_east, self.min_north),
            Position::from_axes(self.max_east, self.min_north),
            Position::from_axes(self.max_east, self.max_north),
            Position::from_axes(self.min_east, self.max_north),
            Position::from_axes(self.min_east, self.min_north),
        ]
    }
}

/// A closed sequence of positions where the first equals the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRing(Vec<Position>);

impl LinearRing {
    pub fn new(positions: Vec<Position>) -> Result<Self, ValidationError> {
        if positions.len() < 4 {
            return Err(ValidationError::RingTooShort);
        }
        if positions.first() != positions.last() {
            return Err(ValidationError::UnclosedRing);
        }
        Ok(Self(positions))
    }

    pub fn positions(&self) -> &[Position] {
        &self.0
    }
}

/// The geometry variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    BoundingBox,
    GeometryCollection,
}

/// Sum type over the geometries the engine understands.
///
/// Every variant carries a CRS tag and an eagerly computed bbox.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point {
        position: Position,
        crs: Crs,
    },
    LineString {
        points: Vec<Position>,
        crs: Crs,
        bbox: BoundingBox,
    },
    Polygon {
        /// Ring 0 is the outer ring; rings 1.. are holes.
        rings: Vec<LinearRing>,
        crs: Crs,
        bbox: BoundingBox,
    },
    BoundingBox {
        bbox: BoundingBox,
        crs: Crs,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
        crs: Crs,
        bbox: BoundingBox,
    },
}

impl Geometry {
    pub fn point(position: Position, crs: Crs) -> Self {
        Geometry::Point { position, crs }
    }

    pub fn line_string(points: Vec<Position>, crs: Crs) -> Result<Self, ValidationError> {
        if points.len() < 2 {
            return Err(ValidationError::LineStringTooShort);
        }
        let bbox = BoundingBox::from_positions(points.iter());
        Ok(Geometry::LineString { points, crs, bbox })
    }

    pub fn polygon(rings: Vec<LinearRing>, crs: Crs) -> Result<Self, ValidationError> {
        if rings.is_empty() {
            return Err(ValidationError::EmptyPolygon);
        }
        let bbox = BoundingBox::from_positions(rings.iter().flat_map(|r| r.positions().iter()));
        Ok(Geometry::Polygon { rings, crs, bbox })
    }

    pub fn bounding_box(bbox: BoundingBox, crs: Crs) -> Self {
        Geometry::BoundingBox { bbox, crs }
    }

    pub fn geometry_collection(geometries: Vec<Geometry>, crs: Crs) -> Self {
        let bbox = geometries
            .iter()
            .map(Geometry::bbox)
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b));
        Geometry::GeometryCollection {
            geometries,
            crs,
            bbox,
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::BoundingBox { .. } => GeometryType::BoundingBox,
            Geometry::GeometryCollection { .. } => GeometryType::GeometryCollection,
        }
    }

    pub fn crs(&self) -> &Crs {
        match self {
            Geometry::Point { crs, .. }
            | Geometry::LineString { crs, .. }
            | Geometry::Polygon { crs, .. }
            | Geometry::BoundingBox { crs, .. }
            | Geometry::GeometryCollection { crs, .. } => crs,
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        match self {
            Geometry::Point { position, .. } => {
                BoundingBox::new(position.east, position.north, position.east, position.north)
            }
            Geometry::LineString { bbox, .. }
            | Geometry::Polygon { bbox, .. }
            | Geometry::GeometryCollection { bbox, .. } => *bbox,
            Geometry::BoundingBox { bbox, .. } => *bbox,
        }
    }

    /// Every position in traversal order; collections flatten their members.
    pub fn flatten_positions(&self) -> Vec<Position> {
        match self {
            Geometry::Point { position, .. } => vec![*position],
            Geometry::LineString { points, .. } => points.clone(),
            Geometry::Polygon { rings, .. } => {
                rings.iter().flat_map(|r| r.positions().iter().copied()).collect()
            }
            Geometry::BoundingBox { bbox, .. } => bbox.as_rectangular_ring(),
            Geometry::GeometryCollection { geometries, .. } => {
                geometries.iter().flat_map(Geometry::flatten_positions).collect()
            }
        }
    }
}
