//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! End-to-end scenarios S1-S6, plus a few property-style checks spanning
//! the public API.

use tile_matrix_limits::{
    tile_matrix_limits, BoundingBox, Crs, Geometry, LinearRing, Position, TileMatrixLimitsError,
    TileRange, Tms,
};

fn position(east: f64, north: f64) -> Position {
    Position::new(east, north).unwrap()
}

fn ring(points: &[(f64, f64)]) -> LinearRing {
    LinearRing::new(points.iter().map(|(e, n)| position(*e, *n)).collect()).unwrap()
}

#[test]
fn s1_point_yields_single_tile() {
    let tms = Tms::world_crs84_quad();
    let geometry = Geometry::point(position(30.0, 30.0), Crs::crs84());
    let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();
    assert_eq!(limits.len(), 1);
    let l = &limits[0];
    assert_eq!(l.tile_matrix_id, "2");
    assert_eq!((l.min_tile_col, l.max_tile_col), (4, 4));
    assert_eq!((l.min_tile_row, l.max_tile_row), (1, 1));
}

#[test]
fn s2_axis_bbox_yields_dense_range() {
    let tms = Tms::world_crs84_quad();
    let geometry = Geometry::bounding_box(BoundingBox::new(-135.0, -45.0, -45.0, 45.0), Crs::crs84());
    let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();
    assert_eq!(limits.len(), 1);
    let l = &limits[0];
    assert_eq!((l.min_tile_col, l.max_tile_col), (1, 2));
    assert_eq!((l.min_tile_row, l.max_tile_row), (1, 2));
}

#[test]
fn s3_triangle_polygon_covers_expected_tiles() {
    let tms = Tms::world_crs84_quad();
    let outer = ring(&[(-45.0, 0.0), (0.0, 45.0), (45.0, 0.0), (-45.0, 0.0)]);
    let geometry = Geometry::polygon(vec![outer], Crs::crs84()).unwrap();
    let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();

    let mut covered = std::collections::HashSet::new();
    for l in &limits {
        for col in l.min_tile_col..=l.max_tile_col {
            for row in l.min_tile_row..=l.max_tile_row {
                covered.insert((col, row));
            }
        }
    }
    assert!(covered.contains(&(3, 1)));
    assert!(covered.contains(&(4, 1)));
}

#[test]
fn s4_house_polygon_covers_twelve_tile_block() {
    let tms = Tms::world_crs84_quad();
    let outer = ring(&[
        (-90.0, -90.0),
        (90.0, -90.0),
        (90.0, 0.0),
        (0.0, 45.0),
        (-90.0, 0.0),
        (-90.0, -90.0),
    ]);
    let geometry = Geometry::polygon(vec![outer], Crs::crs84()).unwrap();
    let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();

    let mut covered = std::collections::HashSet::new();
    for l in &limits {
        for col in l.min_tile_col..=l.max_tile_col {
            for row in l.min_tile_row..=l.max_tile_row {
                covered.insert((col, row));
            }
        }
    }
    for col in 2..=5 {
        for row in 1..=3 {
            assert!(covered.contains(&(col, row)), "missing tile ({col},{row})");
        }
    }
    assert_eq!(covered.len(), 12);
}

#[test]
fn s5_polygon_with_hole_excludes_inner_block() {
    let tms = Tms::world_crs84_quad();
    let outer = ring(&[(0.0, -90.0), (180.0, -90.0), (180.0, 90.0), (0.0, 90.0), (0.0, -90.0)]);
    let inner = ring(&[(10.0, -80.0), (170.0, -80.0), (170.0, 80.0), (10.0, 80.0), (10.0, -80.0)]);
    let geometry = Geometry::polygon(vec![outer, inner], Crs::crs84()).unwrap();
    let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();

    let mut covered = std::collections::HashSet::new();
    for l in &limits {
        for col in l.min_tile_col..=l.max_tile_col {
            for row in l.min_tile_row..=l.max_tile_row {
                covered.insert((col, row));
            }
        }
    }

    let mut expected = std::collections::HashSet::new();
    for col in 4..=7 {
        for row in 0..=3 {
            if (5..=6).contains(&col) && (1..=2).contains(&row) {
                continue;
            }
            expected.insert((col, row));
        }
    }
    assert_eq!(covered, expected);
}

#[test]
fn s6_out_of_range_bbox_fails_with_range_error() {
    let tms = Tms::world_crs84_quad();
    let tm = tms.matrix("2").unwrap();
    let bbox = BoundingBox::new(-190.0, -30.0, 40.0, 30.0);
    let err = TileRange::from_bbox(&bbox, tm, 1).unwrap_err();
    match err {
        TileMatrixLimitsError::Range(range_error) => {
            assert!(format!("{range_error}").contains("-190"));
        }
        other => panic!("expected a RangeError naming -190, got {other:?}"),
    }
}

#[test]
fn merging_is_idempotent_across_metatiles() {
    let tms = Tms::world_crs84_quad();
    let geometry = Geometry::bounding_box(BoundingBox::new(-135.0, -45.0, -45.0, 45.0), Crs::crs84());
    let once: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();
    let twice: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();
    assert_eq!(once, twice);
}

#[test]
fn bbox_to_tile_range_round_trips_through_bounding_box() {
    let tms = Tms::world_crs84_quad();
    let tm = tms.matrix("2").unwrap();
    let bbox = BoundingBox::new(-135.0, -45.0, -45.0, 45.0);
    let range = TileRange::from_bbox(&bbox, tm, 1).unwrap();
    let back = range.to_bounding_box(tm, 1);
    assert_eq!(back, bbox);
}
