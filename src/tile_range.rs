//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Bounding-box → dense tile range, and its inverse (spec.md §4.5).

use crate::common::CornerOfOrigin;
use crate::errors::TileMatrixLimitsError;
use crate::geometry::BoundingBox;
use crate::tile::{Metatile, TileIndex};
use crate::tile_matrix_set::{bbox_corner_tile_indices, tile_matrix_to_bbox, TileMatrix};

/// A dense rectangle of tile indices, snapped to the tile grid of one
/// tile matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min_col: i64,
    pub max_col: i64,
    pub min_row: i64,
    pub max_row: i64,
}

impl TileRange {
    /// Snap `bbox` onto `tm`'s tile grid and produce the dense rectangle
    /// of tiles covering it. Unlike `tile_matrix_limits`, this requires
    /// exact containment: a `bbox` extending past the matrix's world bbox
    /// fails with a `RangeError` rather than clamping.
    pub fn from_bbox(bbox: &BoundingBox, tm: &TileMatrix, metatile: Metatile) -> Result<Self, TileMatrixLimitsError> {
        let (nw, se) = bbox_corner_tile_indices(bbox, tm, metatile)?;
        Ok(TileRange {
            min_col: nw.col.min(se.col),
            max_col: nw.col.max(se.col),
            min_row: nw.row.min(se.row),
            max_row: nw.row.max(se.row),
        })
    }

    /// The inverse mapping: the world bbox spanned by this range of tiles.
    pub fn to_bounding_box(&self, tm: &TileMatrix, metatile: Metatile) -> BoundingBox {
        let world = tile_matrix_to_bbox(tm);
        let metatile = f64::from(metatile.max(1));
        let tile_w = tm.tile_effective_width * metatile;
        let tile_h = tm.tile_effective_height * metatile;

        let min_east = tm.point_of_origin.east + self.min_col as f64 * tile_w;
        let max_east = tm.point_of_origin.east + (self.max_col + 1) as f64 * tile_w;
        let (min_north, max_north) = match tm.corner_of_origin {
            CornerOfOrigin::TopLeft => (
                tm.point_of_origin.north - (self.max_row + 1) as f64 * tile_h,
                tm.point_of_origin.north - self.min_row as f64 * tile_h,
            ),
            CornerOfOrigin::BottomLeft => (
                tm.point_of_origin.north + self.min_row as f64 * tile_h,
                tm.point_of_origin.north + (self.max_row + 1) as f64 * tile_h,
            ),
        };
        BoundingBox::new(min_east, min_north, max_east, max_north).clamp_to_bounding_box(&world)
    }

    pub fn len(&self) -> usize {
        ((self.max_col - self.min_col + 1) * (self.max_row - self.min_row + 1)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row-major iteration over every `(col, row)` in a `TileRange`.
pub struct TileRangeIter {
    range: TileRange,
    col: i64,
    row: i64,
    done: bool,
}

impl IntoIterator for TileRange {
    type Item = TileIndex;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        TileRangeIter {
            range: self,
            col: self.min_col,
            row: self.min_row,
            done: self.is_empty(),
        }
    }
}

impl Iterator for TileRangeIter {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = TileIndex::new(self.col, self.row);
        if self.col == self.range.max_col {
            if self.row == self.range.max_row {
                self.done = true;
            } else {
                self.col = self.range.min_col;
                self.row += 1;
            }
        } else {
            self.col += 1;
        }
        Some(item)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tile_matrix_set::Tms;

    #[test]
    fn from_bbox_matches_scenario_s2() {
        let tms = Tms::world_crs84_quad();
        let tm = tms.matrix("2").unwrap();
        let bbox = BoundingBox::new(-135.0, -45.0, -45.0, 45.0);
        let range = TileRange::from_bbox(&bbox, tm, 1).unwrap();
        assert_eq!(range, TileRange { min_col: 1, max_col: 2, min_row: 1, max_row: 2 });
    }

    #[test]
    fn iterates_row_major() {
        let range = TileRange { min_col: 0, max_col: 1, min_row: 0, max_row: 1 };
        let indices: Vec<TileIndex> = range.into_iter().collect();
        assert_eq!(
            indices,
            vec![
                TileIndex::new(0, 0),
                TileIndex::new(1, 0),
                TileIndex::new(0, 1),
                TileIndex::new(1, 1),
            ]
        );
    }

    #[test]
    fn out_of_range_bbox_fails_with_range_error() {
        let tms = Tms::world_crs84_quad();
        let tm = tms.matrix("2").unwrap();
        let bbox = BoundingBox::new(-190.0, -30.0, 40.0, 30.0);
        let err = TileRange::from_bbox(&bbox, tm, 1).unwrap_err();
        match err {
            crate::errors::TileMatrixLimitsError::Range(
                crate::errors::RangeError::PositionOutsideMatrixBounds { value, .. },
            ) => assert_eq!(value, -190.0),
            other => panic!("expected a RangeError naming -190, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_through_bounding_box() {
        let tms = Tms::world_crs84_quad();
        let tm = tms.matrix("2").unwrap();
        let bbox = BoundingBox::new(-135.0, -45.0, -45.0, 45.0);
        let range = TileRange::from_bbox(&bbox, tm, 1).unwrap();
        let back = range.to_bounding_box(tm, 1);
        approx::assert_abs_diff_eq!(back.min_east, -135.0, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(back.max_east, -45.0, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(back.min_north, -45.0, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(back.max_north, 45.0, epsilon = 1e-9);
    }
}
