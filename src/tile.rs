//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile indices and tile matrix limits, scoped to a single tile matrix.

use serde::{Deserialize, Serialize};

/// Tie-breaking rule for a position that lies exactly on a tile boundary.
///
/// `None` pushes to the higher-index tile on both axes; `Col`/`Row` push to
/// the lower index on that one axis; `Both` does both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReverseIntersectionPolicy {
    #[default]
    None,
    Col,
    Row,
    Both,
}

impl ReverseIntersectionPolicy {
    pub(crate) fn reverses_col(self) -> bool {
        matches!(self, ReverseIntersectionPolicy::Col | ReverseIntersectionPolicy::Both)
    }

    pub(crate) fn reverses_row(self) -> bool {
        matches!(self, ReverseIntersectionPolicy::Row | ReverseIntersectionPolicy::Both)
    }
}

/// A positive integer `m`; groups `m`×`m` raw tiles into one logical tile.
pub type Metatile = u32;

/// Integer pair (col, row) scoped to one tile matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TileIndex {
    pub col: i64,
    pub row: i64,
}

impl TileIndex {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }
}

/// A rectangle in tile-index space within one tile matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixLimits {
    pub tile_matrix_id: TileMatrixIdRepr,
    pub min_tile_col: i64,
    pub max_tile_col: i64,
    pub min_tile_row: i64,
    pub max_tile_row: i64,
}

/// `tileMatrixId` serializes as a bare string per the OGC TMS JSON schema.
pub type TileMatrixIdRepr = String;

impl TileMatrixLimits {
    pub fn new(tile_matrix_id: impl Into<String>, a: TileIndex, b: TileIndex) -> Self {
        Self {
            tile_matrix_id: tile_matrix_id.into(),
            min_tile_col: a.col.min(b.col),
            max_tile_col: a.col.max(b.col),
            min_tile_row: a.row.min(b.row),
            max_tile_row: a.row.max(b.row),
        }
    }

    /// Whether `col` lies within this limit's column run (inclusive).
    pub fn contains_col(&self, col: i64) -> bool {
        self.min_tile_col <= col && col <= self.max_tile_col
    }

    /// Whether `row` lies within this limit's row run (inclusive).
    pub fn contains_row(&self, row: i64) -> bool {
        self.min_tile_row <= row && row <= self.max_tile_row
    }

    pub fn contains(&self, idx: TileIndex) -> bool {
        self.contains_col(idx.col) && self.contains_row(idx.row)
    }
}
