//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Perpendicular ranges → tile limits, merged within a strip
//! (spec.md §4.4 steps 9–10).

use crate::common::CornerOfOrigin;
use crate::errors::TileMatrixLimitsError;
use crate::geometry::Position;
use crate::tile::{Metatile, ReverseIntersectionPolicy, TileIndex, TileMatrixLimits};
use crate::tile_matrix_set::{position_to_tile_index, tile_matrix_to_bbox, TileMatrix};

const BOUNDARY_EPS: f64 = 1e-9;

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < BOUNDARY_EPS
}

/// Whether `value` should reverse on its axis per spec.md §4.4 step 9's
/// bulleted rules: the matrix's min-side bound never reverses; the
/// max-side bound always reverses (so the last tile stays inclusive); a
/// degenerate zero-width range reverses only its start endpoint; otherwise
/// only the end endpoint reverses.
///
/// `inverted` swaps the two world-bound branches: on a tall sweep's north
/// axis under `topLeft`, tile row grows opposite to increasing world
/// coordinate, so the tile touching the matrix's numeric `world_min` is
/// the matrix's *last* row, not its first, and vice versa.
fn reverse_flag(value: f64, is_start: bool, degenerate: bool, inverted: bool, world_min: f64, world_max: f64) -> bool {
    if near(value, world_min) {
        inverted
    } else if near(value, world_max) {
        !inverted
    } else if degenerate {
        is_start
    } else {
        !is_start
    }
}

/// Convert one merged dim2 range, combined with the strip's dim1 interval,
/// into a `TileMatrixLimits`. `is_wide` selects which axis dim1/dim2 map to.
pub fn range_to_limits(
    tile_matrix_id: &str,
    tm: &TileMatrix,
    is_wide: bool,
    metatile: Metatile,
    strip_dim1_mid: f64,
    dim2_range: (f64, f64),
) -> Result<TileMatrixLimits, TileMatrixLimitsError> {
    let world = tile_matrix_to_bbox(tm);
    let (world_dim2_min, world_dim2_max) = if is_wide {
        (world.min_east, world.max_east)
    } else {
        (world.min_north, world.max_north)
    };

    let (start, end) = dim2_range;
    let degenerate = near(start, end);

    // A tall sweep's dim2 axis is the north axis, whose tile-row direction
    // runs opposite to increasing north under a `topLeft` origin (row grows
    // southward). In that one case the numerically smaller range endpoint
    // is the one further from the origin, so the "start endpoint"/"end
    // endpoint" roles in the bulleted rules above swap.
    let inverted = !is_wide && matches!(tm.corner_of_origin, CornerOfOrigin::TopLeft);
    let reverse_start = reverse_flag(start, !inverted, degenerate, inverted, world_dim2_min, world_dim2_max);
    let reverse_end = reverse_flag(end, inverted, degenerate, inverted, world_dim2_min, world_dim2_max);

    let policy_for = |reverse: bool| -> ReverseIntersectionPolicy {
        if !reverse {
            ReverseIntersectionPolicy::None
        } else if is_wide {
            ReverseIntersectionPolicy::Col
        } else {
            ReverseIntersectionPolicy::Row
        }
    };

    let corner_start = if is_wide {
        Position::from_axes(start, strip_dim1_mid)
    } else {
        Position::from_axes(strip_dim1_mid, start)
    };
    let corner_end = if is_wide {
        Position::from_axes(end, strip_dim1_mid)
    } else {
        Position::from_axes(strip_dim1_mid, end)
    };

    let a = position_to_tile_index(corner_start, tm, policy_for(reverse_start), metatile)?;
    let b = position_to_tile_index(corner_end, tm, policy_for(reverse_end), metatile)?;
    Ok(TileMatrixLimits::new(tile_matrix_id.to_string(), a, b))
}

/// Merge limits within one strip (step 10): sort by the non-sweep tile
/// axis, then absorb any limit whose min on that axis is adjacent to (or
/// overlaps) the running chain's max.
pub fn merge_limits_within_strip(mut limits: Vec<TileMatrixLimits>, is_wide: bool) -> Vec<TileMatrixLimits> {
    if limits.is_empty() {
        return limits;
    }
    if is_wide {
        limits.sort_by_key(|l| l.min_tile_col);
    } else {
        limits.sort_by_key(|l| l.min_tile_row);
    }

    let mut merged: Vec<TileMatrixLimits> = Vec::with_capacity(limits.len());
    let mut current = limits[0];
    for next in &limits[1..] {
        let (next_min, current_max) = if is_wide {
            (next.min_tile_col, current.max_tile_col)
        } else {
            (next.min_tile_row, current.max_tile_row)
        };
        if next_min <= current_max + 1 {
            if is_wide {
                current.max_tile_col = current.max_tile_col.max(next.max_tile_col);
                current.min_tile_row = current.min_tile_row.min(next.min_tile_row);
                current.max_tile_row = current.max_tile_row.max(next.max_tile_row);
            } else {
                current.max_tile_row = current.max_tile_row.max(next.max_tile_row);
                current.min_tile_col = current.min_tile_col.min(next.min_tile_col);
                current.max_tile_col = current.max_tile_col.max(next.max_tile_col);
            }
        } else {
            merged.push(current);
            current = *next;
        }
    }
    merged.push(current);
    merged
}

/// Tile index of a single point (spec.md §4.4 "Point shortcut").
pub fn point_to_tile_index(position: Position, tm: &TileMatrix, metatile: Metatile) -> Result<TileIndex, TileMatrixLimitsError> {
    Ok(position_to_tile_index(position, tm, ReverseIntersectionPolicy::None, metatile)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_limits_absorbs_adjacent_columns() {
        let a = TileMatrixLimits::new("2", TileIndex::new(0, 1), TileIndex::new(1, 1));
        let b = TileMatrixLimits::new("2", TileIndex::new(2, 1), TileIndex::new(3, 1));
        let merged = merge_limits_within_strip(vec![a, b], true);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].min_tile_col, 0);
        assert_eq!(merged[0].max_tile_col, 3);
    }

    #[test]
    fn merge_limits_keeps_disjoint_columns_separate() {
        let a = TileMatrixLimits::new("2", TileIndex::new(0, 1), TileIndex::new(1, 1));
        let b = TileMatrixLimits::new("2", TileIndex::new(5, 1), TileIndex::new(6, 1));
        let merged = merge_limits_within_strip(vec![a, b], true);
        assert_eq!(merged.len(), 2);
    }
}
