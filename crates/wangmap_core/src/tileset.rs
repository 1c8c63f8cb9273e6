//! Tileset configuration with sparse tile ids

use crate::wang::WangSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Image reference for a single tile
///
/// The source path is opaque to this crate; decoding pixels is the
/// renderer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileImage {
    /// Path as written in the file, relative to the tileset's location
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl TileImage {
    pub fn new(source: String, width: u32, height: u32) -> Self {
        Self {
            source,
            width,
            height,
        }
    }
}

/// A single tile entry in an image-collection tileset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique within the tileset. Ids are sparse; authored files skip
    /// numbers freely.
    pub id: u32,
    pub image: TileImage,
}

impl Tile {
    pub fn new(id: u32, image: TileImage) -> Self {
        Self { id, image }
    }
}

/// Tileset definition as authored in a `.tsx` file
///
/// Tiles are keyed by id in a `BTreeMap`: the id space has gaps, so a
/// dense array would be wrong, and ascending iteration keeps re-emission
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    /// Largest tile dimensions in the set, in pixels
    pub tile_width: u32,
    pub tile_height: u32,
    /// Format version string (`version` attribute)
    pub version: String,
    /// Editor version string (`tiledversion` attribute); empty when the
    /// file was not written by the editor
    pub tiled_version: String,
    /// 0 for image-collection tilesets like these
    pub columns: u32,
    pub tiles: BTreeMap<u32, Tile>,
    pub wang_sets: Vec<WangSet>,
}

impl Tileset {
    pub fn new(name: String, tile_width: u32, tile_height: u32) -> Self {
        Self {
            name,
            tile_width,
            tile_height,
            version: "1.10".to_string(),
            tiled_version: String::new(),
            columns: 0,
            tiles: BTreeMap::new(),
            wang_sets: Vec::new(),
        }
    }

    /// Insert a tile, replacing any previous tile with the same id
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.id, tile)
    }

    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn contains_tile(&self, id: u32) -> bool {
        self.tiles.contains_key(&id)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn max_tile_id(&self) -> Option<u32> {
        self.tiles.keys().next_back().copied()
    }

    pub fn add_wang_set(&mut self, wang_set: WangSet) {
        self.wang_sets.push(wang_set);
    }

    pub fn wang_set(&self, name: &str) -> Option<&WangSet> {
        self.wang_sets.iter().find(|ws| ws.name == name)
    }

    /// Check that every tile reference inside the wang sets points at a
    /// tile that exists
    pub fn validate(&self) -> Result<(), String> {
        for ws in &self.wang_sets {
            if let Some(tile) = ws.tile {
                if !self.contains_tile(tile) {
                    return Err(format!(
                        "wang set '{}' references missing tile {}",
                        ws.name, tile
                    ));
                }
            }
            for color in &ws.colors {
                if let Some(tile) = color.tile {
                    if !self.contains_tile(tile) {
                        return Err(format!(
                            "wang color '{}' in set '{}' references missing tile {}",
                            color.name, ws.name, tile
                        ));
                    }
                }
            }
            for wt in &ws.wang_tiles {
                if !self.contains_tile(wt.tile_id) {
                    return Err(format!(
                        "wang set '{}' defines a signature for missing tile {}",
                        ws.name, wt.tile_id
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wang::{WangId, WangSetType};

    fn tile(id: u32) -> Tile {
        Tile::new(id, TileImage::new(format!("tile_{}.png", id), 16, 16))
    }

    #[test]
    fn test_sparse_tile_ids() {
        let mut tileset = Tileset::new("overworld".to_string(), 16, 16);
        tileset.insert_tile(tile(0));
        tileset.insert_tile(tile(2));
        tileset.insert_tile(tile(15));

        assert_eq!(tileset.tile_count(), 3);
        assert!(tileset.contains_tile(2));
        assert!(!tileset.contains_tile(1));
        assert_eq!(tileset.max_tile_id(), Some(15));

        // Ascending iteration regardless of insertion order
        let ids: Vec<u32> = tileset.tiles.keys().copied().collect();
        assert_eq!(ids, vec![0, 2, 15]);
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut tileset = Tileset::new("overworld".to_string(), 16, 16);
        tileset.insert_tile(tile(3));
        let replaced = tileset.insert_tile(Tile::new(
            3,
            TileImage::new("other.png".to_string(), 16, 16),
        ));

        assert!(replaced.is_some());
        assert_eq!(tileset.tile(3).unwrap().image.source, "other.png");
    }

    #[test]
    fn test_json_round_trip() {
        let mut tileset = Tileset::new("overworld".to_string(), 16, 16);
        tileset.insert_tile(tile(4));
        let mut ws = WangSet::new("paths".to_string(), WangSetType::Corner);
        ws.add_wang_tile(4, WangId::from_corners(1, 1, 1, 1));
        tileset.add_wang_set(ws);

        let json = serde_json::to_string(&tileset).unwrap();
        let back: Tileset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tileset);
    }

    #[test]
    fn test_validate_catches_dangling_wang_tile() {
        let mut tileset = Tileset::new("overworld".to_string(), 16, 16);
        tileset.insert_tile(tile(4));

        let mut ws = WangSet::new("paths".to_string(), WangSetType::Corner);
        ws.add_wang_tile(4, WangId::from_corners(1, 1, 1, 1));
        tileset.add_wang_set(ws);
        assert!(tileset.validate().is_ok());

        let mut ws = WangSet::new("broken".to_string(), WangSetType::Corner);
        ws.add_wang_tile(99, WangId::from_corners(1, 1, 1, 1));
        tileset.add_wang_set(ws);
        let err = tileset.validate().unwrap_err();
        assert!(err.contains("missing tile 99"));
    }
}
