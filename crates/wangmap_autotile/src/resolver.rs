//! Exact-match corner signature resolution
//!
//! A `CornerResolver` turns one corner-type wang set into a
//! signature-to-tile lookup table. Construction validates the set;
//! after that every lookup is an O(1) probe over immutable data, so a
//! resolver can be shared freely across threads.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;
use wangmap_core::{WangColorId, WangId, WangSet, WangSetType};

/// Rejected wang set shapes, caught while building the lookup table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Only corner sets have defined resolution semantics here; edge and
    /// mixed sets are refused rather than guessed at.
    #[error("wang set '{name}' has type {set_type:?}; only corner sets can be resolved")]
    UnsupportedSetType { name: String, set_type: WangSetType },

    /// A corner set's edge slots must all be 0.
    #[error("tile {tile_id} carries an edge color in a corner wang set")]
    EdgeColorInCornerSet { tile_id: u32 },

    /// A slot references a color index past the end of the color list.
    #[error("tile {tile_id} references color {color} but the set defines {color_count} colors")]
    UnknownColor {
        tile_id: u32,
        color: WangColorId,
        color_count: usize,
    },

    /// Two tiles with one signature would make resolution
    /// non-deterministic.
    #[error("tiles {first} and {second} share corner signature {signature}")]
    DuplicateSignature {
        signature: WangId,
        first: u32,
        second: u32,
    },
}

/// Lookup miss: the requested corner combination has no authored tile
///
/// Never recovered silently; the caller picks the fallback (blank tile,
/// warning, abort) so gaps in the authored catalog stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no tile matches corner signature {signature}")]
pub struct NoMatchingTile {
    pub signature: WangId,
}

/// Signature-to-tile lookup table for one corner wang set
#[derive(Debug, Clone)]
pub struct CornerResolver {
    /// Keyed by `[top-left, top-right, bottom-right, bottom-left]`
    table: HashMap<[WangColorId; 4], u32>,
}

impl CornerResolver {
    /// Build the table, validating the set. O(tiles); entry order in the
    /// set never affects the result.
    pub fn new(set: &WangSet) -> Result<Self, TableError> {
        if set.set_type != WangSetType::Corner {
            return Err(TableError::UnsupportedSetType {
                name: set.name.clone(),
                set_type: set.set_type,
            });
        }

        let mut table = HashMap::with_capacity(set.wang_tiles.len());
        for wt in &set.wang_tiles {
            if !wt.wang_id.is_corner_only() {
                return Err(TableError::EdgeColorInCornerSet { tile_id: wt.tile_id });
            }
            let max_color = wt.wang_id.max_color();
            if max_color as usize > set.colors.len() {
                return Err(TableError::UnknownColor {
                    tile_id: wt.tile_id,
                    color: max_color,
                    color_count: set.colors.len(),
                });
            }
            match table.entry(wt.wang_id.corners()) {
                Entry::Occupied(entry) => {
                    return Err(TableError::DuplicateSignature {
                        signature: wt.wang_id,
                        first: *entry.get(),
                        second: wt.tile_id,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(wt.tile_id);
                }
            }
        }

        Ok(Self { table })
    }

    /// Number of distinct signatures in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolve a cell from the terrain class at each of its corners
    ///
    /// Exact match only. An unauthored combination (including the
    /// all-zero one) fails with `NoMatchingTile`.
    pub fn resolve_cell(
        &self,
        top_left: WangColorId,
        top_right: WangColorId,
        bottom_right: WangColorId,
        bottom_left: WangColorId,
    ) -> Result<u32, NoMatchingTile> {
        let signature = WangId::from_corners(top_left, top_right, bottom_right, bottom_left);
        self.resolve(signature)
    }

    /// Resolve a full signature. Signatures with edge colors can never
    /// match a corner table.
    pub fn resolve(&self, signature: WangId) -> Result<u32, NoMatchingTile> {
        if !signature.is_corner_only() {
            return Err(NoMatchingTile { signature });
        }
        self.table
            .get(&signature.corners())
            .copied()
            .ok_or(NoMatchingTile { signature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wangmap_core::{Color, WangColor};

    /// The `sinnoh_paths` corner set as authored in
    /// `sinnoh_tileset_1x.tsx`
    fn sinnoh_paths() -> WangSet {
        let mut set = WangSet::new("sinnoh_paths".to_string(), WangSetType::Corner);
        set.add_color(WangColor::new("path_1".to_string(), Color::RED));
        set.add_color(WangColor::new(String::new(), Color::GREEN));

        let entries: [(u32, &str); 13] = [
            (2, "0,0,0,1,0,1,0,1"),
            (4, "0,1,0,1,0,1,0,1"),
            (5, "0,1,0,0,0,0,0,1"),
            (6, "0,1,0,0,0,1,0,1"),
            (7, "0,0,0,1,0,0,0,0"),
            (8, "0,0,0,1,0,1,0,0"),
            (9, "0,0,0,0,0,1,0,1"),
            (10, "0,1,0,1,0,0,0,1"),
            (11, "0,0,0,0,0,1,0,0"),
            (12, "0,1,0,1,0,1,0,0"),
            (13, "0,1,0,1,0,0,0,0"),
            (14, "0,0,0,0,0,0,0,1"),
            (15, "0,1,0,0,0,0,0,0"),
        ];
        for (tile_id, wang_id) in entries {
            set.add_wang_tile(tile_id, wang_id.parse().unwrap());
        }
        set
    }

    #[test]
    fn test_resolves_authored_signatures() {
        let resolver = CornerResolver::new(&sinnoh_paths()).unwrap();

        // Lower-left path corner piece
        assert_eq!(resolver.resolve_cell(1, 0, 1, 1), Ok(2));
        assert_eq!(resolver.resolve("0,0,0,1,0,1,0,1".parse().unwrap()), Ok(2));
        // Full center path tile
        assert_eq!(resolver.resolve_cell(1, 1, 1, 1), Ok(4));
        // Single-corner pieces
        assert_eq!(resolver.resolve_cell(1, 0, 0, 0), Ok(14));
        assert_eq!(resolver.resolve_cell(0, 1, 0, 0), Ok(15));
    }

    #[test]
    fn test_round_trip_every_signature() {
        let set = sinnoh_paths();
        let resolver = CornerResolver::new(&set).unwrap();

        for wt in &set.wang_tiles {
            let [tl, tr, br, bl] = wt.wang_id.corners();
            assert_eq!(resolver.resolve_cell(tl, tr, br, bl), Ok(wt.tile_id));
        }
        assert_eq!(resolver.len(), set.wang_tiles.len());
    }

    #[test]
    fn test_unauthored_signatures_miss() {
        let resolver = CornerResolver::new(&sinnoh_paths()).unwrap();

        // No terrain on any corner is not authored
        let err = resolver.resolve_cell(0, 0, 0, 0).unwrap_err();
        assert_eq!(err.signature, WangId::EMPTY);

        // Color 2 never appears in the authored signatures
        assert!(resolver.resolve_cell(2, 2, 2, 2).is_err());
    }

    #[test]
    fn test_edge_colors_never_match() {
        let resolver = CornerResolver::new(&sinnoh_paths()).unwrap();
        let mut signature = WangId::from_corners(1, 1, 1, 1);
        signature.0[WangId::TOP] = 1;
        assert!(resolver.resolve(signature).is_err());
    }

    #[test]
    fn test_load_order_does_not_matter() {
        let set = sinnoh_paths();
        let mut reversed = set.clone();
        reversed.wang_tiles.reverse();

        let a = CornerResolver::new(&set).unwrap();
        let b = CornerResolver::new(&reversed).unwrap();

        for wt in &set.wang_tiles {
            let [tl, tr, br, bl] = wt.wang_id.corners();
            assert_eq!(
                a.resolve_cell(tl, tr, br, bl),
                b.resolve_cell(tl, tr, br, bl)
            );
        }
    }

    #[test]
    fn test_duplicate_signature_rejected() {
        let mut set = sinnoh_paths();
        // Same signature as tile 4, different tile
        set.add_wang_tile(20, "0,1,0,1,0,1,0,1".parse().unwrap());

        match CornerResolver::new(&set) {
            Err(TableError::DuplicateSignature { first, second, signature }) => {
                assert_eq!(first, 4);
                assert_eq!(second, 20);
                assert_eq!(signature.corners(), [1, 1, 1, 1]);
            }
            other => panic!("expected DuplicateSignature, got {:?}", other),
        }
    }

    #[test]
    fn test_non_corner_set_rejected() {
        let mut set = sinnoh_paths();
        set.set_type = WangSetType::Edge;
        assert!(matches!(
            CornerResolver::new(&set),
            Err(TableError::UnsupportedSetType { .. })
        ));
    }

    #[test]
    fn test_edge_color_in_corner_set_rejected() {
        let mut set = sinnoh_paths();
        set.add_wang_tile(20, "1,0,0,0,0,0,0,0".parse().unwrap());
        assert_eq!(
            CornerResolver::new(&set).unwrap_err(),
            TableError::EdgeColorInCornerSet { tile_id: 20 }
        );
    }

    #[test]
    fn test_out_of_range_color_rejected() {
        let mut set = sinnoh_paths();
        set.add_wang_tile(20, "0,3,0,0,0,0,0,0".parse().unwrap());
        assert_eq!(
            CornerResolver::new(&set).unwrap_err(),
            TableError::UnknownColor {
                tile_id: 20,
                color: 3,
                color_count: 2
            }
        );
    }
}
