//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geometry → linear rings of segments (spec.md §4.4 step 4).

use crate::errors::ValidationError;
use crate::geometry::{Geometry, Position};

/// One edge of a ring, oriented in traversal order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
}

impl Segment {
    fn is_zero_length(&self) -> bool {
        self.start == self.end
    }
}

/// A ring of segments plus whether it closes on itself (polygon rings do;
/// a line string's single ring does not).
pub struct Ring {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

fn segments_from_points(points: &[Position], closed: bool) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment {
            start: w[0],
            end: w[1],
        })
        .filter(|s| !s.is_zero_length())
        .collect()
}

/// Build the rings the sweep engine walks for `geometry`.
///
/// Only `LineString` and `Polygon` are supported; every other variant is a
/// fatal `ValidationError::UnsupportedGeometryType`, reported before any
/// iteration begins (spec.md §4.4 failure semantics).
pub fn rings_of(geometry: &Geometry) -> Result<Vec<Ring>, ValidationError> {
    match geometry {
        Geometry::LineString { points, .. } => Ok(vec![Ring {
            segments: segments_from_points(points, false),
            closed: false,
        }]),
        Geometry::Polygon { rings, .. } => Ok(rings
            .iter()
            .map(|r| Ring {
                segments: segments_from_points(r.positions(), true),
                closed: true,
            })
            .collect()),
        Geometry::BoundingBox { bbox, .. } => Ok(vec![Ring {
            segments: segments_from_points(&bbox.as_rectangular_ring(), true),
            closed: true,
        }]),
        Geometry::Point { .. } => Err(ValidationError::UnsupportedGeometryType("Point")),
        Geometry::GeometryCollection { .. } => {
            Err(ValidationError::UnsupportedGeometryType("GeometryCollection"))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::Crs;

    #[test]
    fn drops_zero_length_segments() {
        let points = vec![
            Position::from_axes(0.0, 0.0),
            Position::from_axes(0.0, 0.0),
            Position::from_axes(1.0, 1.0),
        ];
        let geometry = Geometry::line_string(points, Crs::crs84()).unwrap();
        let rings = rings_of(&geometry).unwrap();
        assert_eq!(rings[0].segments.len(), 1);
    }

    #[test]
    fn point_is_unsupported() {
        let geometry = Geometry::point(Position::from_axes(0.0, 0.0), Crs::crs84());
        assert!(rings_of(&geometry).is_err());
    }
}
