//! Tile grid for the stochastic merging game.
//!
//! This module defines the board side of the adversarial search:
//! - `Direction`: the four player moves.
//! - `Grid`: a 4x4 matrix of power-of-two tiles (0 = empty) with methods for
//!   sliding/merging, empty-cell enumeration, tile insertion, and random
//!   tile spawning.
//!
//! Grids are small `Copy` values; every search branch works on its own copy,
//! so sibling branches can never corrupt each other.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the game grid. The grid is always square.
pub const GRID_SIZE: usize = 4;

/// Probability that a freshly spawned tile is a 2 (otherwise a 4).
pub const TWO_SPAWN_PROBABILITY: f64 = 0.9;

/// One of the four sliding moves available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the fixed enumeration order used by the search.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", name)
    }
}

/// The 4x4 game grid.
///
/// Every cell holds either 0 (empty) or a power of two. The type is `Copy`:
/// the adversarial search copies the grid at every branch and mutates the
/// copy, never the original.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

/// Slides one line of four cells toward index 0, merging equal neighbors.
///
/// Each tile merges at most once per move: `[2, 2, 4, 0]` becomes
/// `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`.
fn slide_line(line: [u32; GRID_SIZE]) -> [u32; GRID_SIZE] {
    let mut compact = [0u32; GRID_SIZE];
    let mut len = 0;
    for value in line {
        if value != 0 {
            compact[len] = value;
            len += 1;
        }
    }

    let mut out = [0u32; GRID_SIZE];
    let mut write = 0;
    let mut read = 0;
    while read < len {
        if read + 1 < len && compact[read] == compact[read + 1] {
            out[write] = compact[read] * 2;
            read += 2;
        } else {
            out[write] = compact[read];
            read += 1;
        }
        write += 1;
    }
    out
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn new_empty() -> Self {
        Grid {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Creates a grid from a predefined cell matrix.
    ///
    /// Useful for tests and for setting up specific game scenarios.
    pub fn from_cells(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Grid { cells }
    }

    /// Creates a starting grid with two randomly spawned tiles.
    ///
    /// Spawning follows the game's tile distribution: each tile lands on a
    /// uniformly random empty cell and is a 2 with probability
    /// [`TWO_SPAWN_PROBABILITY`], a 4 otherwise. The same seed always
    /// produces the same starting grid.
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new_empty();
        grid.spawn_random_tile(&mut rng);
        grid.spawn_random_tile(&mut rng);
        grid
    }

    /// Returns the tile value at row `r`, column `c` (0 = empty).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the grid.
    pub fn get(&self, r: usize, c: usize) -> u32 {
        self.cells[r][c]
    }

    /// Sets the tile value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the grid.
    pub fn set(&mut self, r: usize, c: usize, value: u32) {
        self.cells[r][c] = value;
    }

    /// Returns the coordinates of all empty cells in row-major order.
    pub fn available_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                if self.cells[r][c] == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Places `value` on the given empty cell.
    ///
    /// This models the environment's tile spawn during search; the caller is
    /// expected to pass a coordinate obtained from [`Grid::available_cells`].
    pub fn insert_tile(&mut self, cell: (usize, usize), value: u32) {
        self.cells[cell.0][cell.1] = value;
    }

    /// Spawns one random tile on a uniformly random empty cell.
    ///
    /// Returns the chosen cell and value, or `None` if the grid is full.
    pub fn spawn_random_tile(&mut self, rng: &mut impl Rng) -> Option<((usize, usize), u32)> {
        let empty = self.available_cells();
        if empty.is_empty() {
            return None;
        }
        let cell = empty[rng.gen_range(0..empty.len())];
        let value = if rng.gen_bool(TWO_SPAWN_PROBABILITY) {
            2
        } else {
            4
        };
        self.insert_tile(cell, value);
        Some((cell, value))
    }

    /// Returns the grid after sliding every tile in `direction`.
    ///
    /// The result may equal `self` when nothing can slide or merge that way;
    /// [`Grid::available_moves`] filters those out.
    pub fn slide(&self, direction: Direction) -> Grid {
        let mut result = *self;
        match direction {
            Direction::Left => {
                for r in 0..GRID_SIZE {
                    result.cells[r] = slide_line(self.cells[r]);
                }
            }
            Direction::Right => {
                for r in 0..GRID_SIZE {
                    let mut line = self.cells[r];
                    line.reverse();
                    let mut slid = slide_line(line);
                    slid.reverse();
                    result.cells[r] = slid;
                }
            }
            Direction::Up => {
                for c in 0..GRID_SIZE {
                    let line = [
                        self.cells[0][c],
                        self.cells[1][c],
                        self.cells[2][c],
                        self.cells[3][c],
                    ];
                    let slid = slide_line(line);
                    for r in 0..GRID_SIZE {
                        result.cells[r][c] = slid[r];
                    }
                }
            }
            Direction::Down => {
                for c in 0..GRID_SIZE {
                    let line = [
                        self.cells[3][c],
                        self.cells[2][c],
                        self.cells[1][c],
                        self.cells[0][c],
                    ];
                    let slid = slide_line(line);
                    for r in 0..GRID_SIZE {
                        result.cells[GRID_SIZE - 1 - r][c] = slid[r];
                    }
                }
            }
        }
        result
    }

    /// Enumerates all legal player moves with their resulting grids.
    ///
    /// A move is legal only if it changes the grid. Moves are returned in
    /// the fixed Up, Down, Left, Right order so search results are
    /// reproducible.
    pub fn available_moves(&self) -> Vec<(Direction, Grid)> {
        let mut moves = Vec::new();
        for direction in Direction::ALL {
            let next = self.slide(direction);
            if next != *self {
                moves.push((direction, next));
            }
        }
        moves
    }

    /// Returns `true` if at least one sliding move would change the grid.
    ///
    /// Cheaper than [`Grid::available_moves`]: any empty cell or any pair of
    /// equal orthogonal neighbors makes some move legal.
    pub fn can_move(&self) -> bool {
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                if self.cells[r][c] == 0 {
                    return true;
                }
                if c + 1 < GRID_SIZE && self.cells[r][c] == self.cells[r][c + 1] {
                    return true;
                }
                if r + 1 < GRID_SIZE && self.cells[r][c] == self.cells[r + 1][c] {
                    return true;
                }
            }
        }
        false
    }

    /// Returns the largest tile value on the grid.
    pub fn max_tile(&self) -> u32 {
        let mut max = 0;
        for row in &self.cells {
            for &value in row {
                if value > max {
                    max = value;
                }
            }
        }
        max
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for &value in row {
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            if r < GRID_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_line_compacts_and_merges() {
        assert_eq!(slide_line([2, 2, 4, 0]), [4, 4, 0, 0]);
        assert_eq!(slide_line([2, 0, 2, 4]), [4, 4, 0, 0]);
        assert_eq!(slide_line([0, 0, 0, 2]), [2, 0, 0, 0]);
        assert_eq!(slide_line([2, 4, 2, 4]), [2, 4, 2, 4]);
    }

    #[test]
    fn test_slide_line_merges_each_tile_once() {
        // The leading pair merges; the result must not merge again.
        assert_eq!(slide_line([2, 2, 2, 2]), [4, 4, 0, 0]);
        assert_eq!(slide_line([4, 2, 2, 0]), [4, 4, 0, 0]);
    }

    #[test]
    fn test_slide_directions() {
        let grid = Grid::from_cells([
            [2, 0, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [4, 0, 0, 4],
        ]);

        let left = grid.slide(Direction::Left);
        assert_eq!(left.get(0, 0), 4);
        assert_eq!(left.get(3, 0), 8);
        assert_eq!(left.get(0, 3), 0);

        let right = grid.slide(Direction::Right);
        assert_eq!(right.get(0, 3), 4);
        assert_eq!(right.get(3, 3), 8);

        let up = grid.slide(Direction::Up);
        assert_eq!(up.get(0, 0), 2);
        assert_eq!(up.get(1, 0), 4);

        let down = grid.slide(Direction::Down);
        assert_eq!(down.get(3, 0), 4);
        assert_eq!(down.get(2, 0), 2);
    }

    #[test]
    fn test_available_moves_excludes_no_ops() {
        let grid = Grid::from_cells([
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let moves = grid.available_moves();
        // Everything is already packed against the top edge, so Up is a
        // no-op; the other three directions all change the grid.
        assert!(moves.iter().all(|(d, _)| *d != Direction::Up));
        assert_eq!(moves.len(), 3);
        for (_, next) in moves {
            assert_ne!(next, grid);
        }
    }

    #[test]
    fn test_can_move_full_grid_without_merges() {
        let stuck = Grid::from_cells([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(!stuck.can_move());
        assert!(stuck.available_moves().is_empty());

        let mut mergeable = stuck;
        mergeable.set(0, 1, 2);
        assert!(mergeable.can_move());
    }

    #[test]
    fn test_available_cells_and_insert() {
        let mut grid = Grid::new_empty();
        assert_eq!(grid.available_cells().len(), GRID_SIZE * GRID_SIZE);

        grid.insert_tile((1, 2), 4);
        assert_eq!(grid.get(1, 2), 4);
        assert_eq!(grid.available_cells().len(), GRID_SIZE * GRID_SIZE - 1);
        assert!(!grid.available_cells().contains(&(1, 2)));
    }

    #[test]
    fn test_spawn_random_tile_determinism() {
        let mut rng_a = SmallRng::seed_from_u64(7);
        let mut rng_b = SmallRng::seed_from_u64(7);
        let mut grid_a = Grid::new_empty();
        let mut grid_b = Grid::new_empty();
        grid_a.spawn_random_tile(&mut rng_a);
        grid_b.spawn_random_tile(&mut rng_b);
        assert_eq!(grid_a, grid_b);

        let (_, value) = grid_a.spawn_random_tile(&mut rng_a).unwrap();
        assert!(value == 2 || value == 4);
    }

    #[test]
    fn test_spawn_on_full_grid_returns_none() {
        let mut grid = Grid::from_cells([[2; GRID_SIZE]; GRID_SIZE]);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(grid.spawn_random_tile(&mut rng).is_none());
    }

    #[test]
    fn test_new_random_with_seed_determinism() {
        let a = Grid::new_random_with_seed(514514);
        let b = Grid::new_random_with_seed(514514);
        assert_eq!(a, b);
        assert_eq!(a.available_cells().len(), GRID_SIZE * GRID_SIZE - 2);
    }
}
