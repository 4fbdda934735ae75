//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Error kinds raised by the validation layer and the tile-matrix collaborators.

use crate::common::Axis;
use thiserror::Error;

/// Rejected input: the caller's arguments don't satisfy a precondition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("coordinate is not finite: ({0}, {1})")]
    NonFiniteCoordinate(f64, f64),
    #[error("polygon ring is not closed (first position != last position)")]
    UnclosedRing,
    #[error("linear ring needs at least 4 positions (3 distinct + closing repeat)")]
    RingTooShort,
    #[error("unrecognized CRS: `{0}`")]
    UnknownCrs(String),
    #[error("unsupported geometry type for this operation: `{0}`")]
    UnsupportedGeometryType(&'static str),
    #[error("metatile must be a positive integer, got {0}")]
    NonPositiveMetatile(i64),
    #[error("tile matrix id `{0}` is not a member of this tile matrix set")]
    UnknownTileMatrixId(String),
    #[error("geometry CRS `{0}` does not match tile matrix set CRS `{1}`")]
    CrsMismatch(String, String),
    #[error("bounding box is not contained in the tile matrix's world bbox")]
    BBoxNotContained,
    #[error("polygon must have at least one ring")]
    EmptyPolygon,
    #[error("line string needs at least 2 positions")]
    LineStringTooShort,
}

/// A coordinate falls outside the bounds it was required to lie within.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("coordinate {value} on axis {axis:?} is outside the tile matrix's world bbox [{min}, {max}]")]
    PositionOutsideMatrixBounds {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Internal consistency failure. Should never fire; indicates a bug.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantError {
    #[error("tile matrix limits violate min <= max: {0}")]
    LimitsOutOfOrder(String),
    #[error("internal sweep state inconsistency: {0}")]
    SweepStateInconsistent(String),
}

/// Umbrella error type returned by every public entry point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileMatrixLimitsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

pub type Result<T> = std::result::Result<T, TileMatrixLimitsError>;
