//! # Puzzle Solvers Library
//!
//! This library bundles three independent combinatorial search engines
//! that share one engineering problem: exploring an exponentially large
//! implicit state graph under strict resource bounds while keeping
//! pruning and backtracking correct and tie-breaking reproducible.
//!
//! It is used by three binaries:
//! - `puzzle_solver`: solves sliding-tile puzzles with BFS, DFS, or A*
//!   and writes a search-statistics record.
//! - `sudoku_solver`: solves one Sudoku board or a batch file of boards
//!   with the backtracking constraint solver.
//! - `game_agent`: plays the stochastic merging game with the
//!   expectiminimax agent against seeded random tile spawns.
//!
//! ## Modules
//! - `grid`: the 4x4 merging-game grid (`Grid`, `Direction`) with slide,
//!   insertion, and random-spawn mechanics.
//! - `heuristics`: the weighted grid evaluator (empty cells,
//!   monotonicity, possible merges) used by the adversarial agent.
//! - `agent`: depth- and time-bounded expectiminimax with alpha-beta
//!   pruning over the spawn expectation layer.
//! - `puzzle`: sliding-tile states (`PuzzleState`, `Action`) with move
//!   generation, value equality, and Manhattan distance.
//! - `search`: BFS / DFS / A* over puzzle states with frontier/explored
//!   bookkeeping, statistics, and path reconstruction.
//! - `sudoku`: the 9x9 CSP solver (MRV, forward checking, transactional
//!   rollback).
//! - `utils`: parsing of initial states from their string forms.

pub mod agent;
pub mod grid;
pub mod heuristics;
pub mod puzzle;
pub mod search;
pub mod sudoku;
pub mod utils;
