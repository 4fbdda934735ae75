//! Sweep-line engine converting vector geometries into OGC Two-Dimensional
//! Tile Matrix Set coverage limits.
//!
//! ## Predefined tile matrix sets
//!
//! ```rust
//! use tile_matrix_limits::{tile_matrix_limits, Crs, Geometry, Position, Tms};
//!
//! let tms = Tms::world_crs84_quad();
//! let geometry = Geometry::point(Position::new(30.0, 30.0).unwrap(), Crs::crs84());
//! let limits: Vec<_> = tile_matrix_limits(&geometry, &tms, "2", 1).unwrap().collect();
//! assert_eq!(limits.len(), 1);
//! ```
//!
//! ## Custom tile matrix sets
//!
//! A `Tms` can also be built from a caller-supplied list of `TileMatrix`
//! definitions via [`Tms::custom`], and registered process-wide through
//! [`registry::tms`].

pub mod common;
pub mod errors;
pub mod geojson;
pub mod geometry;
pub mod minimal_bounding_tile;
pub mod registry;
pub mod sweep;
pub mod tile;
pub mod tile_matrix_set;
pub mod tile_range;
pub mod validation;

pub use common::{Axis, CornerOfOrigin, Crs, TitleDescriptionKeywords};
pub use errors::{InvariantError, RangeError, TileMatrixLimitsError, ValidationError};
pub use geometry::{BoundingBox, Geometry, GeometryType, LinearRing, Position};
pub use minimal_bounding_tile::minimal_bounding_tile;
pub use sweep::{tile_matrix_limits, TileMatrixLimitsIter};
pub use tile::{Metatile, ReverseIntersectionPolicy, TileIndex, TileMatrixLimits};
pub use tile_matrix_set::{BoundingBox2D, TileMatrix, TileMatrixSet, Tms};
pub use tile_range::{TileRange, TileRangeIter};
