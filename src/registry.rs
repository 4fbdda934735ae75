//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Process-wide registry of predefined `Tms` grids.

use crate::tile_matrix_set::Tms;
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// A named collection of `Tms` instances.
pub struct TileMatrixSets {
    coll: HashMap<String, Tms>,
}

impl TileMatrixSets {
    fn new() -> Self {
        Self {
            coll: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Tms> {
        self.coll.get(id)
    }

    pub fn list(&self) -> impl Iterator<Item = &String> {
        self.coll.keys()
    }

    /// Register `tms` instances, panicking on id collision unless `overwrite`.
    pub fn register(&mut self, custom: Vec<Tms>, overwrite: bool) {
        for tms in custom {
            let id = tms.id().to_string();
            if self.coll.contains_key(&id) && !overwrite {
                panic!("{id} is already a registered TMS.");
            }
            self.coll.insert(id, tms);
        }
    }
}

/// Global registry of predefined tile matrix sets.
///
/// Seeded once with `WorldCRS84Quad` and `WebMercatorQuad`. Custom grids
/// that don't need to be process-wide can be built directly with
/// `Tms::custom` instead.
pub fn tms() -> &'static TileMatrixSets {
    static TMS: OnceCell<TileMatrixSets> = OnceCell::new();
    TMS.get_or_init(|| {
        let mut sets = TileMatrixSets::new();
        sets.register(vec![Tms::world_crs84_quad(), Tms::web_mercator_quad()], false);
        sets
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn predefined_grids_are_registered() {
        let sets = tms();
        assert!(sets.get("WorldCRS84Quad").is_some());
        assert!(sets.get("WebMercatorQuad").is_some());
        assert!(sets.get("NoSuchGrid").is_none());
    }

    #[test]
    fn list_contains_both_predefined_ids() {
        let names: Vec<&String> = tms().list().collect();
        assert!(names.iter().any(|n| n.as_str() == "WorldCRS84Quad"));
        assert!(names.iter().any(|n| n.as_str() == "WebMercatorQuad"));
    }
}
