//! Core data structures for wangmap
//!
//! This crate provides the fundamental types for representing Tiled
//! tileset definitions (`.tsx`) and their wang autotiling rules:
//! - `Tileset` - A named catalog of tiles addressable by sparse integer id
//! - `Tile` / `TileImage` - A single tile and its image reference
//! - `WangSet` - An autotiling rule group (colors + tile signatures)
//! - `WangId` - The 8-slot corner/edge terrain signature
//!
//! Everything here is plain load-time data: no I/O, no interior
//! mutability. Parsing and re-emitting the XML form lives in
//! `wangmap_tsx`; signature resolution lives in `wangmap_autotile`.

mod tileset;
mod wang;

pub use tileset::{Tile, TileImage, Tileset};
pub use wang::{
    Color, ParseWangIdError, WangColor, WangColorId, WangId, WangSet, WangSetType, WangTile,
};
