//! Tiled `.tsx` wang tileset loading and corner autotile resolution
//!
//! This facade re-exports the whole toolkit:
//! - [`wangmap_core`] - tileset and wang set data model
//! - [`wangmap_tsx`] - `.tsx` reader and writer
//! - [`wangmap_autotile`] - exact-match corner resolution, grids,
//!   painting, random fill
//!
//! # Example
//!
//! ```rust,ignore
//! use wangmap::{load_tileset, CornerResolver};
//!
//! let tileset = load_tileset("assets/sinnoh_tileset_1x.tsx")?;
//! let resolver = CornerResolver::new(tileset.wang_set("sinnoh_paths").unwrap())?;
//! let tile = resolver.resolve_cell(1, 1, 1, 1)?;
//! ```

pub use wangmap_autotile::{
    paint_vertex, preview_vertex_paint, randomize_region, resolve_grid, resolve_grid_with,
    CellUpdate, CornerResolver, GridResolveError, NoFillColors, NoMatchingTile, TableError,
    VertexGrid,
};
pub use wangmap_core::{
    Color, ParseWangIdError, Tile, TileImage, Tileset, WangColor, WangColorId, WangId, WangSet,
    WangSetType, WangTile,
};
pub use wangmap_tsx::{load_tileset, parse_tileset, tileset_to_string, write_tileset, TsxError};
