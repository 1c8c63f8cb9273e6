//! Wang set types and the 8-slot signature
//!
//! A wang set groups named terrain classes ("colors") with per-tile
//! signatures describing which class sits at each corner and edge of the
//! tile. The slot layout follows Tiled's clockwise indexing:
//!
//! ```text
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! ```
//!
//! Even slots (0,2,4,6) are edges (top, right, bottom, left); odd slots
//! (1,3,5,7) are corners (top-right, bottom-right, bottom-left,
//! top-left). Slot values are 1-based color indices, 0 meaning "no
//! terrain".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wang color index as stored in the format.
///
/// 0 = no terrain; `n` refers to the n-th color of the owning wang set
/// (1-based).
pub type WangColorId = u8;

/// Display color for a wang color, with exact `#rrggbb` round-trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Parse `#rrggbb` (or `#aarrggbb`, alpha ignored). The leading `#`
    /// is optional.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let hex = match hex.len() {
            6 => hex,
            8 => &hex[2..],
            _ => return None,
        };
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Format as `#rrggbb`, the form Tiled writes
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Type of wang set - determines which signature slots carry meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WangSetType {
    /// Only the 4 corner slots are used
    #[default]
    Corner,
    /// Only the 4 edge slots are used
    Edge,
    /// All 8 slots are used
    Mixed,
}

impl WangSetType {
    /// Parse the format's `type` attribute value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "corner" => Some(WangSetType::Corner),
            "edge" => Some(WangSetType::Edge),
            "mixed" => Some(WangSetType::Mixed),
            _ => None,
        }
    }

    /// The name written back into the format
    pub fn name(&self) -> &'static str {
        match self {
            WangSetType::Corner => "corner",
            WangSetType::Edge => "edge",
            WangSetType::Mixed => "mixed",
        }
    }
}

/// Error parsing the comma-separated `wangid` attribute form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid wang id '{text}': expected 8 comma-separated color indices")]
pub struct ParseWangIdError {
    pub text: String,
}

/// 8-slot terrain signature for one tile, in the format's slot order
///
/// Slot 0 is the top edge, then clockwise. Use the named accessors
/// instead of raw indexing; the slot layout is easy to get wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WangId(pub [WangColorId; 8]);

impl WangId {
    pub const TOP: usize = 0;
    pub const TOP_RIGHT: usize = 1;
    pub const RIGHT: usize = 2;
    pub const BOTTOM_RIGHT: usize = 3;
    pub const BOTTOM: usize = 4;
    pub const BOTTOM_LEFT: usize = 5;
    pub const LEFT: usize = 6;
    pub const TOP_LEFT: usize = 7;

    /// Signature with no terrain anywhere
    pub const EMPTY: Self = WangId([0; 8]);

    /// Build a corner-only signature (edge slots stay 0)
    pub fn from_corners(
        top_left: WangColorId,
        top_right: WangColorId,
        bottom_right: WangColorId,
        bottom_left: WangColorId,
    ) -> Self {
        let mut id = Self::EMPTY;
        id.0[Self::TOP_LEFT] = top_left;
        id.0[Self::TOP_RIGHT] = top_right;
        id.0[Self::BOTTOM_RIGHT] = bottom_right;
        id.0[Self::BOTTOM_LEFT] = bottom_left;
        id
    }

    pub fn top(&self) -> WangColorId {
        self.0[Self::TOP]
    }

    pub fn top_right(&self) -> WangColorId {
        self.0[Self::TOP_RIGHT]
    }

    pub fn right(&self) -> WangColorId {
        self.0[Self::RIGHT]
    }

    pub fn bottom_right(&self) -> WangColorId {
        self.0[Self::BOTTOM_RIGHT]
    }

    pub fn bottom(&self) -> WangColorId {
        self.0[Self::BOTTOM]
    }

    pub fn bottom_left(&self) -> WangColorId {
        self.0[Self::BOTTOM_LEFT]
    }

    pub fn left(&self) -> WangColorId {
        self.0[Self::LEFT]
    }

    pub fn top_left(&self) -> WangColorId {
        self.0[Self::TOP_LEFT]
    }

    /// The 4 corner slots as `[top-left, top-right, bottom-right,
    /// bottom-left]` (clockwise from top-left)
    pub fn corners(&self) -> [WangColorId; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// The 4 edge slots as `[top, right, bottom, left]`
    pub fn edges(&self) -> [WangColorId; 4] {
        [self.top(), self.right(), self.bottom(), self.left()]
    }

    /// True when every edge slot is 0 (all authored corner sets satisfy
    /// this)
    pub fn is_corner_only(&self) -> bool {
        self.edges() == [0; 4]
    }

    /// True when no slot carries terrain
    pub fn is_empty(&self) -> bool {
        self.0 == [0; 8]
    }

    /// Highest color index referenced by any slot
    pub fn max_color(&self) -> WangColorId {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g, h, i] = self.0;
        write!(f, "{},{},{},{},{},{},{},{}", a, b, c, d, e, g, h, i)
    }
}

impl FromStr for WangId {
    type Err = ParseWangIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut slots = [0u8; 8];
        let mut count = 0;
        for part in s.split(',') {
            if count == 8 {
                return Err(ParseWangIdError { text: s.to_string() });
            }
            slots[count] = part
                .trim()
                .parse()
                .map_err(|_| ParseWangIdError { text: s.to_string() })?;
            count += 1;
        }
        if count != 8 {
            return Err(ParseWangIdError { text: s.to_string() });
        }
        Ok(WangId(slots))
    }
}

/// A named terrain class within a wang set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColor {
    /// Display name; authored data may leave this empty
    pub name: String,
    pub color: Color,
    /// Representative tile shown in the editor palette (`tile="-1"` in
    /// the format maps to `None`)
    pub tile: Option<u32>,
    /// Relative weight for probability-weighted random fill
    pub probability: f32,
}

impl WangColor {
    pub fn new(name: String, color: Color) -> Self {
        Self {
            name,
            color,
            tile: None,
            probability: 1.0,
        }
    }
}

/// Maps one tile id to its terrain signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WangTile {
    pub tile_id: u32,
    pub wang_id: WangId,
}

/// An autotiling rule group scoped to one tileset
///
/// `wang_tiles` keeps authored order so re-emission is stable; resolution
/// never depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangSet {
    pub name: String,
    pub set_type: WangSetType,
    /// Representative tile for the whole set (`tile="-1"` maps to `None`)
    pub tile: Option<u32>,
    pub colors: Vec<WangColor>,
    pub wang_tiles: Vec<WangTile>,
}

impl WangSet {
    pub fn new(name: String, set_type: WangSetType) -> Self {
        Self {
            name,
            set_type,
            tile: None,
            colors: Vec::new(),
            wang_tiles: Vec::new(),
        }
    }

    /// Append a color and return its 1-based id as used in signatures
    pub fn add_color(&mut self, color: WangColor) -> WangColorId {
        self.colors.push(color);
        self.colors.len() as WangColorId
    }

    /// Look up a color by its 1-based signature id
    pub fn color(&self, id: WangColorId) -> Option<&WangColor> {
        if id == 0 {
            return None;
        }
        self.colors.get(id as usize - 1)
    }

    /// Find the 1-based id of a color by name
    pub fn color_id(&self, name: &str) -> Option<WangColorId> {
        self.colors
            .iter()
            .position(|c| c.name == name)
            .map(|i| (i + 1) as WangColorId)
    }

    pub fn add_wang_tile(&mut self, tile_id: u32, wang_id: WangId) {
        self.wang_tiles.push(WangTile { tile_id, wang_id });
    }

    /// Signature recorded for a tile, if any
    pub fn wang_id_for_tile(&self, tile_id: u32) -> Option<WangId> {
        self.wang_tiles
            .iter()
            .find(|wt| wt.tile_id == tile_id)
            .map(|wt| wt.wang_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#ff0000").unwrap();
        assert_eq!(color, Color::RED);
        assert_eq!(color.to_hex(), "#ff0000");

        // Tiled sometimes writes ARGB; alpha is dropped
        assert_eq!(Color::from_hex("#ff00ff00").unwrap(), Color::GREEN);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("not-a-color").is_none());
    }

    #[test]
    fn test_wang_set_type_names() {
        assert_eq!(WangSetType::from_name("corner"), Some(WangSetType::Corner));
        assert_eq!(WangSetType::from_name("edge"), Some(WangSetType::Edge));
        assert_eq!(WangSetType::from_name("mixed"), Some(WangSetType::Mixed));
        assert_eq!(WangSetType::from_name("Corner"), None);
        assert_eq!(WangSetType::Corner.name(), "corner");
    }

    #[test]
    fn test_wang_id_parse_display() {
        let id: WangId = "0,0,0,1,0,1,0,1".parse().unwrap();
        assert_eq!(id.to_string(), "0,0,0,1,0,1,0,1");
        assert_eq!(id.top(), 0);
        assert_eq!(id.top_right(), 0);
        assert_eq!(id.bottom_right(), 1);
        assert_eq!(id.bottom_left(), 1);
        assert_eq!(id.top_left(), 1);
        assert!(id.is_corner_only());
        assert!(!id.is_empty());
    }

    #[test]
    fn test_wang_id_parse_rejects_bad_input() {
        assert!("0,0,0,1".parse::<WangId>().is_err());
        assert!("0,0,0,1,0,1,0,1,0".parse::<WangId>().is_err());
        assert!("0,0,0,x,0,1,0,1".parse::<WangId>().is_err());
        assert!("".parse::<WangId>().is_err());
    }

    #[test]
    fn test_wang_id_from_corners_slot_order() {
        let id = WangId::from_corners(1, 2, 3, 4);
        // Slots: top-right = 1, bottom-right = 3, bottom-left = 5,
        // top-left = 7
        assert_eq!(id.0, [0, 2, 0, 3, 0, 4, 0, 1]);
        assert_eq!(id.corners(), [1, 2, 3, 4]);
        assert_eq!(id.edges(), [0, 0, 0, 0]);
        assert_eq!(id.max_color(), 4);
    }

    #[test]
    fn test_wang_set_color_ids_are_one_based() {
        let mut set = WangSet::new("paths".to_string(), WangSetType::Corner);
        let path = set.add_color(WangColor::new("path_1".to_string(), Color::RED));
        let grass = set.add_color(WangColor::new("grass".to_string(), Color::GREEN));

        assert_eq!(path, 1);
        assert_eq!(grass, 2);
        assert_eq!(set.color(0), None);
        assert_eq!(set.color(1).unwrap().name, "path_1");
        assert_eq!(set.color_id("grass"), Some(2));
        assert_eq!(set.color_id("water"), None);
    }

    #[test]
    fn test_wang_set_tile_lookup() {
        let mut set = WangSet::new("paths".to_string(), WangSetType::Corner);
        set.add_wang_tile(4, WangId::from_corners(1, 1, 1, 1));

        assert_eq!(set.wang_id_for_tile(4), Some(WangId::from_corners(1, 1, 1, 1)));
        assert_eq!(set.wang_id_for_tile(5), None);
    }
}
