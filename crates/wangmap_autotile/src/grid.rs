//! Vertex-label grids and whole-map resolution
//!
//! Terrain is painted on the corner lattice: a `width x height` cell
//! grid has `(width + 1) x (height + 1)` vertices, and each cell reads
//! its signature from the four vertices around it. Coordinates grow
//! rightward and downward, matching the file format; vertex `(x, y)` is
//! the top-left corner of cell `(x, y)`.

use crate::resolver::{CornerResolver, NoMatchingTile};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wangmap_core::{WangColorId, WangId};

/// Terrain class labels on the corner lattice of a cell grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexGrid {
    width: u32,
    height: u32,
    /// Row-major, `(width + 1) * (height + 1)` entries, 0 = unassigned
    labels: Vec<WangColorId>,
}

impl VertexGrid {
    /// Grid for `width x height` cells, every vertex unassigned
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize + 1) * (height as usize + 1);
        Self {
            width,
            height,
            labels: vec![0; len],
        }
    }

    /// Width in cells
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, vx: u32, vy: u32) -> usize {
        assert!(
            vx <= self.width && vy <= self.height,
            "vertex ({}, {}) outside {}x{} cell grid",
            vx,
            vy,
            self.width,
            self.height
        );
        vy as usize * (self.width as usize + 1) + vx as usize
    }

    /// Label at vertex `(vx, vy)`; panics outside the lattice
    pub fn get(&self, vx: u32, vy: u32) -> WangColorId {
        self.labels[self.index(vx, vy)]
    }

    pub fn set(&mut self, vx: u32, vy: u32, color: WangColorId) {
        let idx = self.index(vx, vy);
        self.labels[idx] = color;
    }

    /// Assign every vertex touching the cell rectangle `(x, y, w, h)`,
    /// i.e. vertices `x..=x+w` by `y..=y+h`. The rectangle is clamped to
    /// the grid.
    pub fn fill_region(&mut self, x: u32, y: u32, w: u32, h: u32, color: WangColorId) {
        if x > self.width || y > self.height {
            return;
        }
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        for vy in y..=y1 {
            for vx in x..=x1 {
                self.set(vx, vy, color);
            }
        }
    }

    /// Corner signature of cell `(x, y)` read from its four vertices
    pub fn cell_signature(&self, x: u32, y: u32) -> WangId {
        WangId::from_corners(
            self.get(x, y),
            self.get(x + 1, y),
            self.get(x + 1, y + 1),
            self.get(x, y + 1),
        )
    }
}

/// Strict grid resolution failure, pointing at the first bad cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) has no matching tile for signature {signature}")]
pub struct GridResolveError {
    pub x: u32,
    pub y: u32,
    pub signature: WangId,
}

/// Resolve every cell of the grid, row-major
///
/// Strict: the first cell whose signature has no authored tile aborts
/// resolution. Use `resolve_grid_with` to supply a fallback policy
/// instead.
pub fn resolve_grid(
    resolver: &CornerResolver,
    grid: &VertexGrid,
) -> Result<Vec<u32>, GridResolveError> {
    let mut tiles = Vec::with_capacity(grid.width() as usize * grid.height() as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let signature = grid.cell_signature(x, y);
            let tile = resolver
                .resolve(signature)
                .map_err(|_| GridResolveError { x, y, signature })?;
            tiles.push(tile);
        }
    }
    Ok(tiles)
}

/// Resolve every cell, mapping misses through the caller's fallback
///
/// The fallback sees the cell position and the signature that missed
/// (blank all-zero cells included) and decides what the cell becomes.
pub fn resolve_grid_with<F>(
    resolver: &CornerResolver,
    grid: &VertexGrid,
    mut fallback: F,
) -> Vec<Option<u32>>
where
    F: FnMut(u32, u32, WangId) -> Option<u32>,
{
    let mut tiles = Vec::with_capacity(grid.width() as usize * grid.height() as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let signature = grid.cell_signature(x, y);
            match resolver.resolve(signature) {
                Ok(tile) => tiles.push(Some(tile)),
                Err(_) => tiles.push(fallback(x, y, signature)),
            }
        }
    }
    tiles
}

/// One cell whose tile changed as a result of a paint operation
///
/// `tile` is `None` when the cell ended up blank (no terrain on any of
/// its corners).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub x: u32,
    pub y: u32,
    pub tile: Option<u32>,
}

/// Compute what `paint_vertex` would change, without touching the grid
pub fn preview_vertex_paint(
    resolver: &CornerResolver,
    grid: &VertexGrid,
    vx: u32,
    vy: u32,
    color: WangColorId,
) -> Result<Vec<CellUpdate>, NoMatchingTile> {
    let mut updates = Vec::with_capacity(4);

    // The up-to-4 cells sharing this vertex, with the slot the vertex
    // occupies in each
    for (dx, dy) in [(1, 1), (0, 1), (1, 0), (0, 0)] {
        let (Some(cx), Some(cy)) = (vx.checked_sub(dx), vy.checked_sub(dy)) else {
            continue;
        };
        if cx >= grid.width() || cy >= grid.height() {
            continue;
        }

        let corner_of = |x: u32, y: u32| {
            if (x, y) == (vx, vy) {
                color
            } else {
                grid.get(x, y)
            }
        };
        let signature = WangId::from_corners(
            corner_of(cx, cy),
            corner_of(cx + 1, cy),
            corner_of(cx + 1, cy + 1),
            corner_of(cx, cy + 1),
        );

        if signature.is_empty() {
            updates.push(CellUpdate {
                x: cx,
                y: cy,
                tile: None,
            });
        } else {
            let tile = resolver.resolve(signature)?;
            updates.push(CellUpdate {
                x: cx,
                y: cy,
                tile: Some(tile),
            });
        }
    }

    Ok(updates)
}

/// Assign one vertex label and re-resolve the touching cells
///
/// Returns the affected cells with their new tiles. If any touching
/// cell's new signature has no authored tile, the grid is left exactly
/// as it was and the miss is returned.
pub fn paint_vertex(
    resolver: &CornerResolver,
    grid: &mut VertexGrid,
    vx: u32,
    vy: u32,
    color: WangColorId,
) -> Result<Vec<CellUpdate>, NoMatchingTile> {
    let updates = preview_vertex_paint(resolver, grid, vx, vy, color)?;
    grid.set(vx, vy, color);
    Ok(updates)
}
