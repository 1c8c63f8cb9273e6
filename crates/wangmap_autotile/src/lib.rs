//! Wang corner autotile resolution
//!
//! This crate turns a corner-type wang set into an exact-match lookup
//! table and resolves cells, grids, and paint operations against it.
//!
//! # Features
//! - Validated signature table construction (duplicates, edge colors,
//!   and out-of-range color indices are load-time errors)
//! - O(1) per-cell resolution; misses are explicit, never guessed
//! - Vertex-label grids with strict and fallback-policy resolution
//! - Corner painting with preview and probability-weighted random fill
//!
//! # Example
//!
//! ```rust,ignore
//! use wangmap_autotile::{resolve_grid, CornerResolver, VertexGrid};
//!
//! let set = tileset.wang_set("sinnoh_paths").unwrap();
//! let resolver = CornerResolver::new(set)?;
//!
//! let mut grid = VertexGrid::new(20, 15);
//! grid.fill_region(4, 4, 6, 3, 1);
//!
//! let tiles = resolve_grid(&resolver, &grid)?;
//! ```

mod fill;
mod grid;
mod resolver;

pub use fill::{randomize_region, NoFillColors};
pub use grid::{
    paint_vertex, preview_vertex_paint, resolve_grid, resolve_grid_with, CellUpdate,
    GridResolveError, VertexGrid,
};
pub use resolver::{CornerResolver, NoMatchingTile, TableError};

// Re-export the data model the resolver consumes
pub use wangmap_core;
