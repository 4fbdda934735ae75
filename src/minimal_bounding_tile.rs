//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Smallest single tile, across all matrices in a tile matrix set, that
//! fully contains a geometry's bbox.

use crate::geometry::BoundingBox;
use crate::tile::TileMatrixLimits;
use crate::tile_matrix_set::{bbox_corner_tile_indices, tile_matrix_to_bbox, Tms};

/// Scan every matrix in `tms`, from the finest (largest scale denominator
/// means coarser grid -- this picks the matrix with the *smallest* scale
/// denominator, i.e. the finest resolution, whose tile fully contains
/// `bbox`) and return the smallest single tile that fully contains `bbox`.
///
/// `None` if no matrix in the set has a tile large enough, or `bbox` is
/// empty.
pub fn minimal_bounding_tile(bbox: &BoundingBox, tms: &Tms) -> Option<TileMatrixLimits> {
    if bbox.is_empty() {
        return None;
    }

    let mut best: Option<(f64, TileMatrixLimits)> = None;
    for tm in tms.matrices() {
        let world = tile_matrix_to_bbox(tm);
        if bbox.min_east < world.min_east
            || bbox.min_north < world.min_north
            || bbox.max_east > world.max_east
            || bbox.max_north > world.max_north
        {
            continue;
        }

        let (nw, se) = match bbox_corner_tile_indices(bbox, tm, 1) {
            Ok(corners) => corners,
            Err(_) => continue,
        };

        if nw.col != se.col || nw.row != se.row {
            // bbox spans more than one tile at this resolution.
            continue;
        }

        match &best {
            Some((best_denom, _)) if tm.scale_denominator >= *best_denom => {}
            _ => {
                best = Some((
                    tm.scale_denominator,
                    TileMatrixLimits::new(tm.id.clone(), nw, se),
                ));
            }
        }
    }
    best.map(|(_, limits)| limits)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_single_tile_covering_small_bbox() {
        let tms = Tms::world_crs84_quad();
        let bbox = BoundingBox::new(10.0, 10.0, 11.0, 11.0);
        let limits = minimal_bounding_tile(&bbox, &tms).unwrap();
        assert_eq!(limits.min_tile_col, limits.max_tile_col);
        assert_eq!(limits.min_tile_row, limits.max_tile_row);
    }

    #[test]
    fn empty_bbox_yields_none() {
        let tms = Tms::world_crs84_quad();
        assert!(minimal_bounding_tile(&BoundingBox::empty(), &tms).is_none());
    }

    #[test]
    fn bbox_outside_world_yields_none() {
        let tms = Tms::world_crs84_quad();
        let bbox = BoundingBox::new(170.0, 80.0, 190.0, 95.0);
        assert!(minimal_bounding_tile(&bbox, &tms).is_none());
    }
}
