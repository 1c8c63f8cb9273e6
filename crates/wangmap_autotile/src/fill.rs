//! Probability-weighted terrain randomization
//!
//! Wang colors carry a `probability` weight; the editor's random fill
//! draws each vertex's terrain class with probability proportional to
//! it. Resolution of the randomized grid stays exact-match as always.

use crate::grid::VertexGrid;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use thiserror::Error;
use wangmap_core::{WangColor, WangColorId};

/// No color is drawable: every probability is zero or negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no wang color has a positive probability")]
pub struct NoFillColors;

/// Assign every vertex touching the cell rectangle `(x, y, w, h)` a
/// color drawn with probability proportional to its weight
///
/// Colors with nonpositive probability are never drawn. Deterministic
/// for a seeded rng.
pub fn randomize_region<R: Rng>(
    grid: &mut VertexGrid,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    colors: &[WangColor],
    rng: &mut R,
) -> Result<(), NoFillColors> {
    let weights: Vec<f32> = colors.iter().map(|c| c.probability.max(0.0)).collect();
    let dist = WeightedIndex::new(&weights).map_err(|_| NoFillColors)?;

    if x > grid.width() || y > grid.height() {
        return Ok(());
    }
    let x1 = x.saturating_add(w).min(grid.width());
    let y1 = y.saturating_add(h).min(grid.height());
    for vy in y..=y1 {
        for vx in x..=x1 {
            let color = (dist.sample(rng) + 1) as WangColorId;
            grid.set(vx, vy, color);
        }
    }
    Ok(())
}
