//! Sliding-tile puzzle states.
//!
//! A `PuzzleState` stores an n x n board as a flat permutation of
//! `0..n*n` (0 is the blank) together with the bookkeeping the graph
//! searches need: path cost, tree depth, the action that produced the
//! state, and an `Rc` back-link to the parent for path reconstruction.
//! Equality and hashing go by configuration value, never by identity, so
//! visited-set membership works across different paths to the same board.
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// The move that produced a puzzle state.
///
/// `Initial` marks the root; the other four move the blank tile. The enum
/// order doubles as the fixed tie-break priority used by A*.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Initial,
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// The four blank moves in the fixed Up, Down, Left, Right order every
    /// search expands children in.
    pub const MOVES: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Fixed priority for frontier tie-breaking (Initial < Up < Down <
    /// Left < Right).
    pub fn priority(&self) -> u8 {
        match self {
            Action::Initial => 0,
            Action::Up => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Right => 4,
        }
    }

    /// Returns the move that undoes this one, or `None` for `Initial`.
    pub fn inverse(&self) -> Option<Action> {
        match self {
            Action::Initial => None,
            Action::Up => Some(Action::Down),
            Action::Down => Some(Action::Up),
            Action::Left => Some(Action::Right),
            Action::Right => Some(Action::Left),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Initial => "Initial",
            Action::Up => "Up",
            Action::Down => "Down",
            Action::Left => "Left",
            Action::Right => "Right",
        };
        write!(f, "{}", name)
    }
}

/// One node of the sliding-tile search graph.
///
/// States form a tree through `parent` links that are only ever walked
/// upward to reconstruct the solution path; children are cached as weak
/// references so re-expansion is idempotent without creating `Rc` cycles.
pub struct PuzzleState {
    config: Vec<u8>,
    n: usize,
    blank_index: usize,
    cost: u32,
    depth: u32,
    action: Action,
    parent: Option<Rc<PuzzleState>>,
    children: RefCell<Vec<Weak<PuzzleState>>>,
}

impl PuzzleState {
    /// Creates a validated root state from a flat configuration.
    ///
    /// # Errors
    /// Returns an error if the board is smaller than 2x2, the
    /// configuration length is not `n * n`, or the values are not a
    /// permutation of `0..n*n`.
    pub fn new(config: Vec<u8>, n: usize) -> Result<Self, String> {
        if n < 2 {
            return Err(format!("board size must be at least 2, got {}", n));
        }
        if config.len() != n * n {
            return Err(format!(
                "configuration has {} entries, expected {} for a {}x{} board",
                config.len(),
                n * n,
                n,
                n
            ));
        }
        let mut seen = vec![false; n * n];
        for &value in &config {
            let value = value as usize;
            if value >= n * n || seen[value] {
                return Err(format!(
                    "configuration is not a permutation of 0..{}: {:?}",
                    n * n,
                    config
                ));
            }
            seen[value] = true;
        }
        // A valid permutation always contains exactly one 0.
        let blank_index = config.iter().position(|&v| v == 0).unwrap();

        Ok(PuzzleState {
            config,
            n,
            blank_index,
            cost: 0,
            depth: 0,
            action: Action::Initial,
            parent: None,
            children: RefCell::new(Vec::new()),
        })
    }

    /// The flat board configuration.
    pub fn config(&self) -> &[u8] {
        &self.config
    }

    /// The board side length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Path length from the root.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Depth in the search tree (equals `cost` under unit move cost).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The move that produced this state.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The parent state, if any. Used only to walk the solution path.
    pub fn parent(&self) -> Option<&Rc<PuzzleState>> {
        self.parent.as_ref()
    }

    /// Tests whether the configuration is the identity permutation.
    pub fn is_goal(&self) -> bool {
        self.config
            .iter()
            .enumerate()
            .all(|(index, &value)| value as usize == index)
    }

    /// Sum of per-tile Manhattan distances to the goal position.
    ///
    /// The goal position of value `v` is row `v / n`, column `v % n`; the
    /// blank does not contribute. Admissible under unit move cost.
    pub fn manhattan_distance(&self) -> u32 {
        let n = self.n;
        let mut total = 0u32;
        for (index, &value) in self.config.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let value = value as usize;
            let goal_row = value / n;
            let goal_col = value % n;
            let row = index / n;
            let col = index % n;
            total += (goal_row.abs_diff(row) + goal_col.abs_diff(col)) as u32;
        }
        total
    }

    /// Applies one blank move, returning the child state or `None` when
    /// the move would push the blank off the board (or for `Initial`).
    pub fn apply(this: &Rc<PuzzleState>, action: Action) -> Option<Rc<PuzzleState>> {
        let n = this.n;
        let blank = this.blank_index;
        let target = match action {
            Action::Initial => return None,
            Action::Up => {
                if blank < n {
                    return None;
                }
                blank - n
            }
            Action::Down => {
                if blank + n >= this.config.len() {
                    return None;
                }
                blank + n
            }
            Action::Left => {
                if blank % n == 0 {
                    return None;
                }
                blank - 1
            }
            Action::Right => {
                if (blank + 1) % n == 0 {
                    return None;
                }
                blank + 1
            }
        };

        let mut config = this.config.clone();
        config.swap(blank, target);

        Some(Rc::new(PuzzleState {
            config,
            n,
            blank_index: target,
            cost: this.cost + 1,
            depth: this.depth + 1,
            action,
            parent: Some(Rc::clone(this)),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Generates the child states in the fixed Up, Down, Left, Right order.
    ///
    /// Children are computed once and cached as weak references; if the
    /// cached children have since been dropped they are recomputed, which
    /// yields value-identical states.
    pub fn expand(this: &Rc<PuzzleState>) -> Vec<Rc<PuzzleState>> {
        {
            let cached = this.children.borrow();
            if !cached.is_empty() {
                let upgraded: Option<Vec<Rc<PuzzleState>>> =
                    cached.iter().map(Weak::upgrade).collect();
                if let Some(children) = upgraded {
                    return children;
                }
            }
        }

        let children: Vec<Rc<PuzzleState>> = Action::MOVES
            .iter()
            .filter_map(|&action| PuzzleState::apply(this, action))
            .collect();
        *this.children.borrow_mut() = children.iter().map(Rc::downgrade).collect();
        children
    }
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Eq for PuzzleState {}

impl Hash for PuzzleState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.hash(state);
    }
}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleState")
            .field("config", &self.config)
            .field("cost", &self.cost)
            .field("action", &self.action)
            .finish()
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n {
            let cells: Vec<String> = self.config[row * self.n..(row + 1) * self.n]
                .iter()
                .map(|v| v.to_string())
                .collect();
            write!(f, "{}", cells.join(" "))?;
            if row < self.n - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
