//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! The strip-sweep engine: public entry point plus eager validation.
//!
//! `tile_matrix_limits` is the core operation of this crate -- everything
//! else (tile-matrix math, the geometry model, validation) exists to
//! support it. See `rings`, `strip` and `limits` for the steps of the
//! algorithm itself.

pub mod limits;
pub mod rings;
pub mod strip;

use crate::common::CornerOfOrigin;
use crate::errors::TileMatrixLimitsError;
use crate::geometry::{BoundingBox, Geometry};
use crate::tile::{Metatile, TileMatrixLimits};
use crate::tile_matrix_set::{bbox_corner_tile_indices, clamp_bbox_to_tile_matrix, TileMatrix, Tms};
use crate::validation::{validate_crs_match, validate_known_crs, validate_metatile, validate_tile_matrix_id};
use rings::rings_of;
use strip::{fold_crossing_spans, line_string_ranges, merge_ranges, non_crossing_ring_ranges, spans_in_strip, Span, Strip};

/// A finite, re-iterable, order-preserving sequence of `TileMatrixLimits`.
///
/// The whole sequence is computed eagerly at construction time; iterating
/// (and re-iterating a clone) reproduces it bit-for-bit, matching the
/// determinism spec.md §5 requires without needing a suspendable coroutine.
#[derive(Debug, Clone)]
pub struct TileMatrixLimitsIter {
    items: std::vec::IntoIter<TileMatrixLimits>,
}

impl TileMatrixLimitsIter {
    fn new(items: Vec<TileMatrixLimits>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl Iterator for TileMatrixLimitsIter {
    type Item = TileMatrixLimits;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

/// Sweep `geometry` against `tms`'s matrix `tile_matrix_id`, yielding
/// merged tile matrix limits. Validates eagerly; every error is reported
/// before the returned iterator yields anything.
pub fn tile_matrix_limits(
    geometry: &Geometry,
    tms: &Tms,
    tile_matrix_id: &str,
    metatile: Metatile,
) -> Result<TileMatrixLimitsIter, TileMatrixLimitsError> {
    validate_metatile(metatile)?;
    validate_known_crs(geometry.crs())?;
    validate_crs_match(geometry.crs(), tms)?;
    let tm = validate_tile_matrix_id(tms, tile_matrix_id)?;

    if let Geometry::Point { position, .. } = geometry {
        let idx = limits::point_to_tile_index(*position, tm, metatile)?;
        return Ok(TileMatrixLimitsIter::new(vec![TileMatrixLimits::new(
            tile_matrix_id.to_string(),
            idx,
            idx,
        )]));
    }

    let bbox = clamp_bbox_to_tile_matrix(&geometry.bbox(), tm);
    if bbox.is_empty() {
        return Ok(TileMatrixLimitsIter::new(Vec::new()));
    }

    if let Geometry::BoundingBox { .. } = geometry {
        let (nw, se) = bbox_corner_tile_indices(&bbox, tm, metatile)?;
        return Ok(TileMatrixLimitsIter::new(vec![TileMatrixLimits::new(
            tile_matrix_id.to_string(),
            nw,
            se,
        )]));
    }

    let is_polygon = matches!(geometry, Geometry::Polygon { .. });
    let rings = rings_of(geometry)?;

    let width = bbox.max_east - bbox.min_east;
    let height = bbox.max_north - bbox.min_north;
    let is_wide = width > height;
    let dim1_axis = if is_wide { 1 } else { 0 };

    let tile_w = tm.tile_effective_width * f64::from(metatile);
    let tile_h = tm.tile_effective_height * f64::from(metatile);

    let mut all_limits = Vec::new();
    for (lo, hi) in strip_bounds(&bbox, tm, is_wide, tile_w, tile_h) {
        let strip = Strip { lo, hi, dim1_axis };

        let mut ranges = Vec::new();
        if is_polygon {
            // Crossing spans are pooled across every ring of the strip before
            // folding: a hole's crossing spans must be sorted and paired
            // together with the outer ring's, not folded per-ring and unioned,
            // or the hole's exclusion is lost (even-odd fill rule).
            let mut crossing_spans: Vec<Span> = Vec::new();
            for (ring_index, ring) in rings.iter().enumerate() {
                let spans = spans_in_strip(ring, &strip);
                ranges.extend(non_crossing_ring_ranges(&spans, ring_index == 0));
                crossing_spans.extend(spans.into_iter().filter(|s| s.is_crossing));
            }
            let crossing_refs: Vec<&Span> = crossing_spans.iter().collect();
            ranges.extend(fold_crossing_spans(&crossing_refs));
        } else {
            for ring in rings.iter() {
                ranges.extend(line_string_ranges(ring, &strip));
            }
        }
        if ranges.is_empty() {
            continue;
        }

        let merged_ranges = merge_ranges(ranges);
        let strip_mid = (lo + hi) / 2.0;
        let mut strip_limits = Vec::with_capacity(merged_ranges.len());
        for range in merged_ranges {
            strip_limits.push(limits::range_to_limits(
                tile_matrix_id,
                tm,
                is_wide,
                metatile,
                strip_mid,
                range,
            )?);
        }
        all_limits.extend(limits::merge_limits_within_strip(strip_limits, is_wide));
    }

    Ok(TileMatrixLimitsIter::new(all_limits))
}

/// Tile-aligned strip boundaries covering `bbox`, in sweep order
/// (spec.md §4.4 steps 2–3).
fn strip_bounds(bbox: &BoundingBox, tm: &TileMatrix, is_wide: bool, tile_w: f64, tile_h: f64) -> Vec<(f64, f64)> {
    let mut strips = Vec::new();
    if is_wide {
        match tm.corner_of_origin {
            CornerOfOrigin::TopLeft => {
                let k_top = (((tm.point_of_origin.north - bbox.max_north) / tile_h).floor()).max(0.0) as i64;
                let k_bottom = (((tm.point_of_origin.north - bbox.min_north) / tile_h).ceil() as i64 - 1).max(k_top);
                let mut k = k_top;
                while k <= k_bottom {
                    let hi = tm.point_of_origin.north - k as f64 * tile_h;
                    strips.push((hi - tile_h, hi));
                    k += 1;
                }
            }
            CornerOfOrigin::BottomLeft => {
                let k_bottom = (((bbox.min_north - tm.point_of_origin.north) / tile_h).floor()).max(0.0) as i64;
                let k_top = (((bbox.max_north - tm.point_of_origin.north) / tile_h).ceil() as i64 - 1).max(k_bottom);
                let mut k = k_bottom;
                while k <= k_top {
                    let lo = tm.point_of_origin.north + k as f64 * tile_h;
                    strips.push((lo, lo + tile_h));
                    k += 1;
                }
            }
        }
    } else {
        let k_left = (((bbox.min_east - tm.point_of_origin.east) / tile_w).floor()).max(0.0) as i64;
        let k_right = (((bbox.max_east - tm.point_of_origin.east) / tile_w).ceil() as i64 - 1).max(k_left);
        let mut k = k_left;
        while k <= k_right {
            let lo = tm.point_of_origin.east + k as f64 * tile_w;
            strips.push((lo, lo + tile_w));
            k += 1;
        }
    }
    strips
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::Crs;
    use crate::geometry::{BoundingBox, Position};
    use crate::tile_matrix_set::Tms;

    #[test]
    fn point_shortcut_yields_single_degenerate_limit() {
        let tms = Tms::world_crs84_quad();
        let geometry = Geometry::point(Position::from_axes(30.0, 30.0), Crs::crs84());
        let mut iter = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap();
        let limit = iter.next().unwrap();
        assert!(iter.next().is_none());
        assert_eq!(limit.min_tile_col, limit.max_tile_col);
        assert_eq!(limit.min_tile_row, limit.max_tile_row);
        assert_eq!(limit.min_tile_col, 4);
        assert_eq!(limit.min_tile_row, 1);
    }

    #[test]
    fn bbox_scenario_s2_matches_expected_tile_range() {
        let tms = Tms::world_crs84_quad();
        let geometry = Geometry::bounding_box(BoundingBox::new(-135.0, -45.0, -45.0, 45.0), Crs::crs84());
        let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();
        assert_eq!(limits.len(), 1);
        let l = &limits[0];
        assert_eq!(l.min_tile_col, 1);
        assert_eq!(l.max_tile_col, 2);
        assert_eq!(l.min_tile_row, 1);
        assert_eq!(l.max_tile_row, 2);
    }

    #[test]
    fn iterator_is_re_iterable() {
        let tms = Tms::world_crs84_quad();
        let geometry = Geometry::point(Position::from_axes(30.0, 30.0), Crs::crs84());
        let iter = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn crs_mismatch_is_rejected_before_iteration() {
        let tms = Tms::world_crs84_quad();
        let geometry = Geometry::point(Position::from_axes(30.0, 30.0), Crs::web_mercator());
        assert!(tile_matrix_limits(&geometry, &tms, "2", 1).is_err());
    }
}
