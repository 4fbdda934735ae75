//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Eager validators run at the top of every public entry point, before any
//! iterator or limits record is constructed.

use crate::common::Crs;
use crate::errors::ValidationError;
use crate::geometry::BoundingBox;
use crate::tile::Metatile;
use crate::tile_matrix_set::{tile_matrix_to_bbox, Tms};

/// A CRS recognized by this crate: currently `OGC:CRS84`, `EPSG:4326` and
/// `EPSG:3857`. The engine has no reprojection logic, so anything else is
/// rejected rather than silently mishandled.
pub fn validate_known_crs(crs: &Crs) -> Result<(), ValidationError> {
    let known = [Crs::crs84(), Crs::wgs84(), Crs::web_mercator()];
    if known.contains(crs) {
        Ok(())
    } else {
        log::warn!("rejecting unrecognized CRS `{crs}`");
        Err(ValidationError::UnknownCrs(crs.to_string()))
    }
}

/// The geometry and the tile matrix set must share a CRS; this crate never
/// reprojects.
pub fn validate_crs_match(geometry_crs: &Crs, tms: &Tms) -> Result<(), ValidationError> {
    if geometry_crs == tms.crs() {
        Ok(())
    } else {
        log::warn!(
            "CRS mismatch: geometry is `{geometry_crs}`, tile matrix set `{}` is `{}`",
            tms.id(),
            tms.crs()
        );
        Err(ValidationError::CrsMismatch(
            geometry_crs.to_string(),
            tms.crs().to_string(),
        ))
    }
}

/// `tile_matrix_id` must name a matrix in `tms`.
pub fn validate_tile_matrix_id<'a>(
    tms: &'a Tms,
    tile_matrix_id: &str,
) -> Result<&'a crate::tile_matrix_set::TileMatrix, ValidationError> {
    tms.matrix(tile_matrix_id).ok_or_else(|| {
        log::warn!("unknown tile matrix id `{tile_matrix_id}` in set `{}`", tms.id());
        ValidationError::UnknownTileMatrixId(tile_matrix_id.to_string())
    })
}

/// `metatile` must be a positive integer.
pub fn validate_metatile(metatile: Metatile) -> Result<(), ValidationError> {
    if metatile >= 1 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveMetatile(i64::from(metatile)))
    }
}

/// `bbox` must be fully contained in the matrix's world bbox. Used only by
/// operations that require full containment (per spec.md §4.6).
pub fn validate_bbox_contained(
    bbox: &BoundingBox,
    tm: &crate::tile_matrix_set::TileMatrix,
) -> Result<(), ValidationError> {
    let world = tile_matrix_to_bbox(tm);
    if bbox.min_east >= world.min_east
        && bbox.min_north >= world.min_north
        && bbox.max_east <= world.max_east
        && bbox.max_north <= world.max_north
    {
        Ok(())
    } else {
        log::warn!("bbox {bbox:?} is not contained in tile matrix `{}` world bbox", tm.id);
        Err(ValidationError::BBoxNotContained)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tile_matrix_set::Tms;

    #[test]
    fn known_crs_accepted() {
        assert!(validate_known_crs(&Crs::crs84()).is_ok());
        assert!(validate_known_crs(&Crs::web_mercator()).is_ok());
    }

    #[test]
    fn unknown_crs_rejected() {
        let err = validate_known_crs(&Crs::epsg(2056)).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCrs(_)));
    }

    #[test]
    fn crs_mismatch_detected() {
        let tms = Tms::world_crs84_quad();
        let err = validate_crs_match(&Crs::web_mercator(), &tms).unwrap_err();
        assert!(matches!(err, ValidationError::CrsMismatch(_, _)));
    }

    #[test]
    fn unknown_tile_matrix_id_detected() {
        let tms = Tms::world_crs84_quad();
        assert!(validate_tile_matrix_id(&tms, "not-a-zoom").is_err());
        assert!(validate_tile_matrix_id(&tms, "2").is_ok());
    }

    #[test]
    fn metatile_must_be_positive() {
        assert!(validate_metatile(1).is_ok());
        assert!(validate_metatile(0).is_err());
    }

    #[test]
    fn bbox_containment_checked() {
        let tms = Tms::world_crs84_quad();
        let tm = tms.matrix("2").unwrap();
        assert!(validate_bbox_contained(&BoundingBox::new(-10.0, -10.0, 10.0, 10.0), tm).is_ok());
        assert!(validate_bbox_contained(&BoundingBox::new(-190.0, -10.0, 10.0, 10.0), tm).is_err());
    }
}
