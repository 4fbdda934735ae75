//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile matrix math: the collaborator contract of spec §4.1.
//!
//! A `TileMatrix` is one level of an OGC Tile Matrix Set; a `TileMatrixSet`
//! is the pyramid of levels sharing one CRS; `Tms` is the long-lived handle
//! applications hold (mirrors the teacher's `Tms` in `tms.rs`).

use crate::common::{Axis, CornerOfOrigin, Crs, TitleDescriptionKeywords};
use crate::errors::{RangeError, ValidationError};
use crate::geometry::{BoundingBox, Position};
use crate::tile::{Metatile, ReverseIntersectionPolicy, TileIndex};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One level of a tile matrix set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMatrix {
    #[serde(flatten)]
    pub title_description_keywords: TitleDescriptionKeywords,
    pub id: String,
    pub scale_denominator: f64,
    pub point_of_origin: Position,
    pub corner_of_origin: CornerOfOrigin,
    pub tile_width: u16,
    pub tile_height: u16,
    pub matrix_width: u64,
    pub matrix_height: u64,
    /// CRS units covered by one (unscaled, metatile=1) tile along the east axis.
    pub tile_effective_width: f64,
    /// CRS units covered by one (unscaled, metatile=1) tile along the north axis.
    pub tile_effective_height: f64,
}

/// Optional informative extent carried alongside a `TileMatrixSet`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox2D {
    pub lower_left: [f64; 2],
    pub upper_right: [f64; 2],
    pub crs: Option<Crs>,
}

/// The pyramid of tile matrices sharing one CRS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMatrixSet {
    #[serde(flatten)]
    pub title_description_keywords: TitleDescriptionKeywords,
    pub id: String,
    pub crs: Crs,
    pub tile_matrices: Vec<TileMatrix>,
    pub bounding_box: Option<BoundingBox2D>,
}

/// Tile Matrix Set API: the long-lived handle applications hold.
#[derive(Debug, Clone)]
pub struct Tms {
    tms: TileMatrixSet,
}

impl Tms {
    /// Wrap a `TileMatrixSet`, sorting levels by numeric id and rejecting
    /// degenerate (zero-sized) matrices.
    pub fn new(mut data: TileMatrixSet) -> Result<Self, ValidationError> {
        for m in &data.tile_matrices {
            if m.matrix_width == 0 || m.matrix_height == 0 || m.tile_width == 0 || m.tile_height == 0
            {
                return Err(ValidationError::NonPositiveMetatile(0));
            }
        }
        data.tile_matrices
            .sort_by_key(|m| m.id.parse::<u32>().unwrap_or(u32::MAX));
        Ok(Self { tms: data })
    }

    pub fn matrices(&self) -> &[TileMatrix] {
        &self.tms.tile_matrices
    }

    pub fn matrix(&self, tile_matrix_id: &str) -> Option<&TileMatrix> {
        self.tms.tile_matrices.iter().find(|m| m.id == tile_matrix_id)
    }

    pub fn crs(&self) -> &Crs {
        &self.tms.crs
    }

    pub fn id(&self) -> &str {
        &self.tms.id
    }

    /// The world bbox of the matrix named `tile_matrix_id`, if it exists.
    pub fn world_bbox(&self, tile_matrix_id: &str) -> Option<BoundingBox> {
        self.matrix(tile_matrix_id).map(tile_matrix_to_bbox)
    }

    /// Build a custom `Tms` from an extent, tile size and a zoom range, in
    /// the style of the teacher's `Tms::custom`/`custom_resolutions`,
    /// simplified to a single shared CRS (no reprojection).
    pub fn custom(
        id: impl Into<String>,
        title: impl Into<String>,
        crs: Crs,
        extent: BoundingBox,
        tile_width: u16,
        tile_height: u16,
        minzoom: u8,
        maxzoom: u8,
    ) -> Result<Self, ValidationError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(ValidationError::NonPositiveMetatile(0));
        }
        let width = (extent.max_east - extent.min_east).abs();
        let height = (extent.max_north - extent.min_north).abs();
        let mut tile_matrices = Vec::with_capacity(usize::from(maxzoom.saturating_sub(minzoom)) + 1);
        for zoom in minzoom..=maxzoom {
            let scale = 2f64.powi(i32::from(zoom));
            let res = f64::max(
                width / f64::from(tile_width) / scale,
                height / f64::from(tile_height) / scale,
            );
            let unit_width = f64::from(tile_width) * res;
            let unit_height = f64::from(tile_height) * res;
            let matrix_width = (((width - 0.01 * unit_width) / unit_width).ceil()).max(1.0) as u64;
            let matrix_height = (((height - 0.01 * unit_height) / unit_height).ceil()).max(1.0) as u64;
            tile_matrices.push(TileMatrix {
                title_description_keywords: TitleDescriptionKeywords::default(),
                id: zoom.to_string(),
                scale_denominator: res * meters_per_unit(&crs) / 0.00028,
                point_of_origin: Position::from_axes(extent.min_east, extent.max_north),
                corner_of_origin: CornerOfOrigin::TopLeft,
                tile_width,
                tile_height,
                matrix_width,
                matrix_height,
                tile_effective_width: unit_width,
                tile_effective_height: unit_height,
            });
        }
        Tms::new(TileMatrixSet {
            title_description_keywords: TitleDescriptionKeywords {
                title: Some(title.into()),
                ..Default::default()
            },
            id: id.into(),
            crs,
            tile_matrices,
            bounding_box: Some(BoundingBox2D {
                lower_left: [extent.min_east, extent.min_north],
                upper_right: [extent.max_east, extent.max_north],
                crs: None,
            }),
        })
    }

    /// The predefined `WorldCRS84Quad` grid: 2×1 root matrices, `topLeft`
    /// origin, degrees. Mirrors the teacher's `lib.rs` doc example
    /// `Grid::wgs84()`.
    pub fn world_crs84_quad() -> Self {
        let crs = Crs::crs84();
        let tile_matrices = (0..=24u8)
            .map(|zoom| {
                let matrix_height = 1u64 << zoom;
                let matrix_width = 2 * matrix_height;
                let eff = 180.0 / matrix_height as f64;
                TileMatrix {
                    title_description_keywords: TitleDescriptionKeywords::default(),
                    id: zoom.to_string(),
                    scale_denominator: scale_denominator(eff, 256, &crs),
                    point_of_origin: Position::from_axes(-180.0, 90.0),
                    corner_of_origin: CornerOfOrigin::TopLeft,
                    tile_width: 256,
                    tile_height: 256,
                    matrix_width,
                    matrix_height,
                    tile_effective_width: eff,
                    tile_effective_height: eff,
                }
            })
            .collect();
        Tms::new(TileMatrixSet {
            title_description_keywords: TitleDescriptionKeywords {
                title: Some("World CRS84 Quad".to_string()),
                ..Default::default()
            },
            id: "WorldCRS84Quad".to_string(),
            crs,
            tile_matrices,
            bounding_box: None,
        })
        .expect("predefined grid is well-formed")
    }

    /// The predefined `WebMercatorQuad` grid: 1×1 root matrix, `topLeft`
    /// origin, metres. Mirrors the teacher's `Grid::web_mercator()`.
    pub fn web_mercator_quad() -> Self {
        let crs = Crs::web_mercator();
        const ORIGIN: f64 = 20_037_508.342_789_244;
        let tile_matrices = (0..=24u8)
            .map(|zoom| {
                let matrix_dim = 1u64 << zoom;
                let eff = (2.0 * ORIGIN) / matrix_dim as f64;
                TileMatrix {
                    title_description_keywords: TitleDescriptionKeywords::default(),
                    id: zoom.to_string(),
                    scale_denominator: scale_denominator(eff, 256, &crs),
                    point_of_origin: Position::from_axes(-ORIGIN, ORIGIN),
                    corner_of_origin: CornerOfOrigin::TopLeft,
                    tile_width: 256,
                    tile_height: 256,
                    matrix_width: matrix_dim,
                    matrix_height: matrix_dim,
                    tile_effective_width: eff,
                    tile_effective_height: eff,
                }
            })
            .collect();
        Tms::new(TileMatrixSet {
            title_description_keywords: TitleDescriptionKeywords {
                title: Some("Web Mercator Quad".to_string()),
                ..Default::default()
            },
            id: "WebMercatorQuad".to_string(),
            crs,
            tile_matrices,
            bounding_box: None,
        })
        .expect("predefined grid is well-formed")
    }
}

/// Coefficient to convert CRS units into metres, used only to derive the
/// informative `scaleDenominator` of predefined/custom grids.
///
/// See note g in <http://docs.opengeospatial.org/is/17-083r2/17-083r2.html#table_2>.
pub fn meters_per_unit(crs: &Crs) -> f64 {
    const SEMI_MAJOR_METRE: f64 = 6_378_137.0;
    if crs.code == 4326 || crs.is_default() {
        2.0 * PI * SEMI_MAJOR_METRE / 360.0
    } else {
        1.0
    }
}

fn scale_denominator(tile_effective_size: f64, tile_pixels: u16, crs: &Crs) -> f64 {
    let res = tile_effective_size / f64::from(tile_pixels);
    res * meters_per_unit(crs) / 0.00028
}

/// CRS units per tile along the east axis, at metatile=1.
pub fn tile_effective_width(tm: &TileMatrix) -> f64 {
    tm.tile_effective_width
}

/// CRS units per tile along the north axis, at metatile=1.
pub fn tile_effective_height(tm: &TileMatrix) -> f64 {
    tm.tile_effective_height
}

/// The world bbox covered by a tile matrix, derived from its origin, matrix
/// dimensions, effective tile size and corner-of-origin.
pub fn tile_matrix_to_bbox(tm: &TileMatrix) -> BoundingBox {
    let width = tm.matrix_width as f64 * tm.tile_effective_width;
    let height = tm.matrix_height as f64 * tm.tile_effective_height;
    match tm.corner_of_origin {
        CornerOfOrigin::TopLeft => BoundingBox::new(
            tm.point_of_origin.east,
            tm.point_of_origin.north - height,
            tm.point_of_origin.east + width,
            tm.point_of_origin.north,
        ),
        CornerOfOrigin::BottomLeft => BoundingBox::new(
            tm.point_of_origin.east,
            tm.point_of_origin.north,
            tm.point_of_origin.east + width,
            tm.point_of_origin.north + height,
        ),
    }
}

/// Clip `bbox` to the matrix's world bbox.
pub fn clamp_bbox_to_tile_matrix(bbox: &BoundingBox, tm: &TileMatrix) -> BoundingBox {
    bbox.clamp_to_bounding_box(&tile_matrix_to_bbox(tm))
}

/// Normalize `-0.0` to `0.0` so bit-exact equality tests stay deterministic.
pub fn avoid_negative_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

const BOUNDARY_EPS: f64 = 1e-9;
const CONTAINMENT_EPS: f64 = 1e-7;

fn snap_tile_coordinate(coord: f64, reverse: bool) -> i64 {
    let nearest = coord.round();
    if (coord - nearest).abs() < BOUNDARY_EPS {
        if reverse {
            nearest as i64 - 1
        } else {
            nearest as i64
        }
    } else {
        coord.floor() as i64
    }
}

fn check_in_bounds(value: f64, min: f64, max: f64, axis: Axis) -> Result<(), RangeError> {
    if value < min - CONTAINMENT_EPS || value > max + CONTAINMENT_EPS {
        Err(RangeError::PositionOutsideMatrixBounds { axis, value, min, max })
    } else {
        Ok(())
    }
}

/// Convert a position in the matrix's CRS into a tile index, applying the
/// given tie-breaking policy at tile boundaries and scaling for `metatile`.
///
/// Positions outside the matrix's world bbox fail with a `RangeError`.
pub fn position_to_tile_index(
    pos: Position,
    tm: &TileMatrix,
    policy: ReverseIntersectionPolicy,
    metatile: Metatile,
) -> Result<TileIndex, RangeError> {
    let world = tile_matrix_to_bbox(tm);
    check_in_bounds(pos.east, world.min_east, world.max_east, Axis::East)?;
    check_in_bounds(pos.north, world.min_north, world.max_north, Axis::North)?;

    let metatile = metatile.max(1) as f64;
    let tile_w = tm.tile_effective_width * metatile;
    let tile_h = tm.tile_effective_height * metatile;

    let col_f = avoid_negative_zero((pos.east - tm.point_of_origin.east) / tile_w);
    let row_f = match tm.corner_of_origin {
        CornerOfOrigin::TopLeft => {
            avoid_negative_zero((tm.point_of_origin.north - pos.north) / tile_h)
        }
        CornerOfOrigin::BottomLeft => {
            avoid_negative_zero((pos.north - tm.point_of_origin.north) / tile_h)
        }
    };

    let col = snap_tile_coordinate(col_f, policy.reverses_col());
    let row = snap_tile_coordinate(row_f, policy.reverses_row());
    Ok(TileIndex::new(col, row))
}

/// Tile indices of a bbox's NW and SE corners, with policy `none` at NW and
/// `both` at SE -- the bounding-box "shortcut" of spec.md §4.4/§4.5, which
/// snaps a bbox directly onto the tile grid without running the general
/// strip sweep.
///
/// `bbox` is used as given; callers that want out-of-bbox geometry to clamp
/// rather than fail (as `tile_matrix_limits` does) must clamp it themselves
/// first with `clamp_bbox_to_tile_matrix`. Callers that want exact
/// containment (as `TileRange::from_bbox` does) should pass `bbox` raw, so
/// that a corner outside the matrix's world bbox surfaces as a `RangeError`.
pub fn bbox_corner_tile_indices(
    bbox: &BoundingBox,
    tm: &TileMatrix,
    metatile: Metatile,
) -> Result<(TileIndex, TileIndex), RangeError> {
    let nw = Position::from_axes(bbox.min_east, bbox.max_north);
    let se = Position::from_axes(bbox.max_east, bbox.min_north);
    let nw_idx = position_to_tile_index(nw, tm, ReverseIntersectionPolicy::None, metatile)?;
    let se_idx = position_to_tile_index(se, tm, ReverseIntersectionPolicy::Both, metatile)?;
    Ok((nw_idx, se_idx))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn world_crs84_quad_zoom2_tile_size_is_45_degrees() {
        let tms = Tms::world_crs84_quad();
        let m = tms.matrix("2").unwrap();
        assert_eq!(m.matrix_width, 8);
        assert_eq!(m.matrix_height, 4);
        approx::assert_abs_diff_eq!(tile_effective_width(m), 45.0);
        approx::assert_abs_diff_eq!(tile_effective_height(m), 45.0);
    }

    #[test]
    fn position_to_tile_index_point_s1() {
        let tms = Tms::world_crs84_quad();
        let m = tms.matrix("2").unwrap();
        let idx = position_to_tile_index(
            Position::from_axes(30.0, 30.0),
            m,
            ReverseIntersectionPolicy::None,
            1,
        )
        .unwrap();
        assert_eq!(idx, TileIndex::new(4, 1));
    }

    #[test]
    fn bbox_corner_tile_indices_scenario_s2() {
        let tms = Tms::world_crs84_quad();
        let m = tms.matrix("2").unwrap();
        let bbox = BoundingBox::new(-135.0, -45.0, -45.0, 45.0);
        let (nw, se) = bbox_corner_tile_indices(&bbox, m, 1).unwrap();
        assert_eq!(nw, TileIndex::new(1, 1));
        assert_eq!(se, TileIndex::new(2, 2));
    }

    #[test]
    fn position_outside_matrix_is_range_error() {
        let tms = Tms::world_crs84_quad();
        let m = tms.matrix("2").unwrap();
        let err = position_to_tile_index(
            Position::from_axes(-190.0, 0.0),
            m,
            ReverseIntersectionPolicy::None,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, RangeError::PositionOutsideMatrixBounds { .. }));
    }

    #[test]
    fn avoid_negative_zero_normalizes_sign() {
        assert_eq!(avoid_negative_zero(-0.0).to_bits(), 0.0_f64.to_bits());
        assert_eq!(avoid_negative_zero(0.0).to_bits(), 0.0_f64.to_bits());
    }
}
