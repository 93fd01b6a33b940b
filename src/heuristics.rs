//! Board evaluation for the stochastic merging game.
//!
//! The evaluator is a weighted linear combination of three independent
//! terms: empty-cell count, corner-anchored monotonicity, and the number of
//! immediately available merges. Each term is exposed on its own so the
//! contributions can be inspected or reweighted in experiments.
use crate::grid::{Grid, GRID_SIZE};

/// Weight of the empty-cell count term.
pub const EMPTY_WEIGHT: f64 = 0.6;
/// Weight of the monotonicity term.
pub const MONOTONICITY_WEIGHT: f64 = 0.13;
/// Weight of the possible-merge count term.
pub const MERGE_WEIGHT: f64 = 0.27;

/// Sentinel marking a cell a template does not score.
const IGNORED: i32 = -1;

/// Four corner-anchored weighting templates, one per corner, with weights
/// 8/4/2/1 decaying away from the anchored corner along its row and column.
/// Cells marked [`IGNORED`] do not contribute to that template's score.
const MONOTONICITY_TEMPLATES: [[[i32; GRID_SIZE]; GRID_SIZE]; 4] = [
    [
        [8, 4, 2, 1],
        [4, IGNORED, IGNORED, IGNORED],
        [2, IGNORED, IGNORED, IGNORED],
        [1, IGNORED, IGNORED, IGNORED],
    ],
    [
        [1, 2, 4, 8],
        [IGNORED, IGNORED, IGNORED, 4],
        [IGNORED, IGNORED, IGNORED, 2],
        [IGNORED, IGNORED, IGNORED, 1],
    ],
    [
        [1, IGNORED, IGNORED, IGNORED],
        [2, IGNORED, IGNORED, IGNORED],
        [4, IGNORED, IGNORED, IGNORED],
        [8, 4, 2, 1],
    ],
    [
        [IGNORED, IGNORED, IGNORED, 1],
        [IGNORED, IGNORED, IGNORED, 2],
        [IGNORED, IGNORED, IGNORED, 4],
        [1, 2, 4, 8],
    ],
];

/// Counts the empty cells on the grid.
pub fn empty_cell_count(grid: &Grid) -> usize {
    grid.available_cells().len()
}

/// Scores how monotonically the tile values decay away from a corner.
///
/// Each template multiplies `log2(value)` (0 for empty cells) by its cell
/// weight and sums over the grid; the best-matching corner wins, so a grid
/// with its large tiles stacked in any one corner scores high.
pub fn monotonicity(grid: &Grid) -> f64 {
    let mut best = f64::NEG_INFINITY;
    for template in &MONOTONICITY_TEMPLATES {
        let mut score = 0.0;
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let weight = template[r][c];
                if weight == IGNORED {
                    continue;
                }
                let value = grid.get(r, c);
                if value != 0 {
                    score += f64::from(value).log2() * f64::from(weight);
                }
            }
        }
        if score > best {
            best = score;
        }
    }
    best
}

/// Counts pairs of orthogonally adjacent equal non-empty tiles.
///
/// Every such pair is a merge the player could realize within one move, so
/// a higher count means more scoring potential and more board compaction.
pub fn merge_count(grid: &Grid) -> u32 {
    let mut merges = 0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE - 1 {
            let value = grid.get(r, c);
            if value != 0 && value == grid.get(r, c + 1) {
                merges += 1;
            }
        }
    }
    for c in 0..GRID_SIZE {
        for r in 0..GRID_SIZE - 1 {
            let value = grid.get(r, c);
            if value != 0 && value == grid.get(r + 1, c) {
                merges += 1;
            }
        }
    }
    merges
}

/// Evaluates a grid for the adversarial search.
///
/// Pure and deterministic: the same grid always yields the same value and
/// the grid is never mutated.
pub fn evaluate(grid: &Grid) -> f64 {
    EMPTY_WEIGHT * empty_cell_count(grid) as f64
        + MONOTONICITY_WEIGHT * monotonicity(grid)
        + MERGE_WEIGHT * f64::from(merge_count(grid))
}
