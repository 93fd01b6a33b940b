//! Uninformed and informed graph search over sliding-tile puzzles.
//!
//! Three strategies share the same bookkeeping discipline:
//! - `Bfs`: FIFO frontier, goal test on dequeue.
//! - `Dfs`: LIFO frontier with children pushed in reversed order so they
//!   pop in the fixed Up, Down, Left, Right order.
//! - `AStar`: insert-only priority frontier ordered by `cost + Manhattan`
//!   with an authoritative best-f side table; an improved duplicate is
//!   re-pushed without evicting the stale entry.
//!
//! All strategies dedup by configuration value against both the explored
//! set and the frontier, and report nodes expanded, the maximum depth seen
//! (frontier-only nodes included), and a peak-memory estimate.
use crate::puzzle::{Action, PuzzleState};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::mem;
use std::rc::Rc;
use std::str::FromStr;

/// Which search strategy to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    AStar,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "ast" => Ok(Strategy::AStar),
            other => Err(format!(
                "unknown search mode '{}' (expected bfs, dfs, or ast)",
                other
            )),
        }
    }
}

/// Counters collected while a search runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// States popped from the frontier and expanded (goal pops excluded).
    pub nodes_expanded: u64,
    /// Deepest tree depth observed, counting frontier-only nodes.
    pub max_depth: u32,
    /// Estimated peak live-node memory in MiB.
    pub peak_memory_mb: f64,
}

/// Result of one search run: the goal state (if reached) plus statistics.
#[derive(Debug)]
pub struct SearchOutcome {
    pub goal: Option<Rc<PuzzleState>>,
    pub stats: SearchStats,
}

/// Estimates peak memory from the number of simultaneously live nodes.
///
/// There is no portable resident-set delta to read from safe Rust, so the
/// report approximates it: peak live node count times an approximate
/// per-node footprint (struct, heap configuration, refcounts).
struct MemoryTracker {
    node_bytes: usize,
    peak_nodes: usize,
}

impl MemoryTracker {
    fn new(n: usize) -> Self {
        MemoryTracker {
            node_bytes: mem::size_of::<PuzzleState>() + n * n + 2 * mem::size_of::<usize>(),
            peak_nodes: 0,
        }
    }

    fn observe(&mut self, live_nodes: usize) {
        if live_nodes > self.peak_nodes {
            self.peak_nodes = live_nodes;
        }
    }

    fn peak_mb(&self) -> f64 {
        (self.peak_nodes * self.node_bytes) as f64 / (1024.0 * 1024.0)
    }
}

/// Runs the selected strategy from `initial` until a goal is dequeued or
/// the reachable state space is exhausted.
///
/// An exhausted search is a normal outcome: the returned `goal` is `None`
/// and the statistics still describe the completed exploration.
pub fn search(initial: PuzzleState, strategy: Strategy) -> SearchOutcome {
    let initial = Rc::new(initial);
    match strategy {
        Strategy::Bfs => bfs_search(initial),
        Strategy::Dfs => dfs_search(initial),
        Strategy::AStar => astar_search(initial),
    }
}

/// Walks the parent links from `goal` back to the root and returns the
/// actions along the way in root-to-goal order.
pub fn path_to_goal(goal: &Rc<PuzzleState>) -> Vec<Action> {
    let mut path = Vec::new();
    let mut current = Rc::clone(goal);
    loop {
        let parent = match current.parent() {
            Some(parent) => Rc::clone(parent),
            None => break,
        };
        path.push(current.action());
        current = parent;
    }
    path.reverse();
    path
}

fn bfs_search(initial: Rc<PuzzleState>) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let mut memory = MemoryTracker::new(initial.n());

    let mut frontier: VecDeque<Rc<PuzzleState>> = VecDeque::new();
    let mut frontier_set: HashSet<Vec<u8>> = HashSet::new();
    let mut explored: HashSet<Vec<u8>> = HashSet::new();
    frontier_set.insert(initial.config().to_vec());
    frontier.push_back(initial);

    while let Some(state) = frontier.pop_front() {
        explored.insert(state.config().to_vec());
        stats.max_depth = stats.max_depth.max(state.depth());
        memory.observe(explored.len() + frontier.len());

        if state.is_goal() {
            stats.peak_memory_mb = memory.peak_mb();
            return SearchOutcome {
                goal: Some(state),
                stats,
            };
        }
        stats.nodes_expanded += 1;

        for child in PuzzleState::expand(&state) {
            if !explored.contains(child.config()) && !frontier_set.contains(child.config()) {
                frontier_set.insert(child.config().to_vec());
                stats.max_depth = stats.max_depth.max(child.depth());
                frontier.push_back(child);
            }
        }
    }

    stats.peak_memory_mb = memory.peak_mb();
    SearchOutcome { goal: None, stats }
}

fn dfs_search(initial: Rc<PuzzleState>) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let mut memory = MemoryTracker::new(initial.n());

    let mut frontier: Vec<Rc<PuzzleState>> = Vec::new();
    let mut frontier_set: HashSet<Vec<u8>> = HashSet::new();
    let mut explored: HashSet<Vec<u8>> = HashSet::new();
    frontier_set.insert(initial.config().to_vec());
    frontier.push(initial);

    while let Some(state) = frontier.pop() {
        explored.insert(state.config().to_vec());
        stats.max_depth = stats.max_depth.max(state.depth());
        memory.observe(explored.len() + frontier.len());

        if state.is_goal() {
            stats.peak_memory_mb = memory.peak_mb();
            return SearchOutcome {
                goal: Some(state),
                stats,
            };
        }
        stats.nodes_expanded += 1;

        // Push in reversed order so children pop in Up, Down, Left, Right
        // order.
        for child in PuzzleState::expand(&state).into_iter().rev() {
            if !explored.contains(child.config()) && !frontier_set.contains(child.config()) {
                frontier_set.insert(child.config().to_vec());
                stats.max_depth = stats.max_depth.max(child.depth());
                frontier.push(child);
            }
        }
    }

    stats.peak_memory_mb = memory.peak_mb();
    SearchOutcome { goal: None, stats }
}

/// Frontier entry for A*: ordered by `f = cost + heuristic` ascending,
/// ties broken by the fixed action priority.
struct HeapEntry {
    f: u32,
    action_rank: u8,
    state: Rc<PuzzleState>,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.action_rank == other.action_rank
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the smallest f (then the
        // earliest action) pops first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.action_rank.cmp(&self.action_rank))
    }
}

fn astar_search(initial: Rc<PuzzleState>) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let mut memory = MemoryTracker::new(initial.n());

    let mut frontier: BinaryHeap<HeapEntry> = BinaryHeap::new();
    // Authoritative best f per configuration; the heap may hold stale
    // duplicates that this table supersedes.
    let mut best_f: HashMap<Vec<u8>, u32> = HashMap::new();
    let mut explored: HashSet<Vec<u8>> = HashSet::new();

    let f = initial.cost() + initial.manhattan_distance();
    best_f.insert(initial.config().to_vec(), f);
    frontier.push(HeapEntry {
        f,
        action_rank: initial.action().priority(),
        state: initial,
    });

    while let Some(entry) = frontier.pop() {
        let state = entry.state;
        explored.insert(state.config().to_vec());
        stats.max_depth = stats.max_depth.max(state.depth());
        memory.observe(explored.len() + frontier.len());

        if state.is_goal() {
            stats.peak_memory_mb = memory.peak_mb();
            return SearchOutcome {
                goal: Some(state),
                stats,
            };
        }
        stats.nodes_expanded += 1;

        for child in PuzzleState::expand(&state) {
            let f = child.cost() + child.manhattan_distance();
            let in_explored = explored.contains(child.config());
            match best_f.get(child.config()).copied() {
                None if !in_explored => {
                    best_f.insert(child.config().to_vec(), f);
                    stats.max_depth = stats.max_depth.max(child.depth());
                    frontier.push(HeapEntry {
                        f,
                        action_rank: child.action().priority(),
                        state: child,
                    });
                }
                Some(previous) if f < previous => {
                    // Strictly better path to a queued configuration:
                    // re-push and update the side table; the stale entry
                    // stays behind and is expanded redundantly but
                    // harmlessly.
                    // TODO: switch to a decrease-key structure if the
                    // redundant expansions ever show up in profiles.
                    best_f.insert(child.config().to_vec(), f);
                    frontier.push(HeapEntry {
                        f,
                        action_rank: child.action().priority(),
                        state: child,
                    });
                }
                _ => {}
            }
        }
    }

    stats.peak_memory_mb = memory.peak_mb();
    SearchOutcome { goal: None, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::puzzle_from_str;

    fn run(config: &str, strategy: Strategy) -> SearchOutcome {
        search(puzzle_from_str(config).unwrap(), strategy)
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert_eq!("dfs".parse::<Strategy>().unwrap(), Strategy::Dfs);
        assert_eq!("AST".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert!("ids".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_initial_goal_needs_no_expansion() {
        for strategy in [Strategy::Bfs, Strategy::Dfs, Strategy::AStar] {
            let outcome = run("0,1,2,3,4,5,6,7,8", strategy);
            let goal = outcome.goal.expect("goal state expected");
            assert!(goal.is_goal());
            assert_eq!(goal.cost(), 0);
            assert_eq!(outcome.stats.nodes_expanded, 0);
            assert!(path_to_goal(&goal).is_empty());
        }
    }

    #[test]
    fn test_bfs_finds_shortest_path() {
        let outcome = run("1,2,5,3,4,0,6,7,8", Strategy::Bfs);
        let goal = outcome.goal.expect("solvable instance");
        assert_eq!(goal.cost(), 3);
        assert_eq!(
            path_to_goal(&goal),
            vec![Action::Up, Action::Left, Action::Left]
        );
        assert!(outcome.stats.max_depth >= goal.depth());
        assert!(outcome.stats.peak_memory_mb > 0.0);
    }

    #[test]
    fn test_astar_matches_bfs_optimal_cost() {
        for config in ["1,2,5,3,4,0,6,7,8", "1,0,2,3", "3,1,2,0,4,5,6,7,8"] {
            let bfs = run(config, Strategy::Bfs);
            let ast = run(config, Strategy::AStar);
            let bfs_goal = bfs.goal.expect("bfs goal");
            let ast_goal = ast.goal.expect("astar goal");
            // Manhattan distance is admissible, so A* keeps optimality.
            assert_eq!(ast_goal.cost(), bfs_goal.cost());
        }
    }

    #[test]
    fn test_astar_solves_scrambled_instance_optimally() {
        let outcome = run("1,2,5,3,4,0,6,7,8", Strategy::AStar);
        let goal = outcome.goal.expect("solvable instance");
        assert_eq!(goal.cost(), 3);
        let path = path_to_goal(&goal);
        assert_eq!(path.len(), goal.cost() as usize);
        assert!(!path.is_empty());
    }

    #[test]
    fn test_dfs_reaches_goal() {
        let outcome = run("1,0,2,3", Strategy::Dfs);
        let goal = outcome.goal.expect("dfs goal");
        assert!(goal.is_goal());
        // DFS makes no optimality promise, but the path must be real:
        // replaying it from the root must land on the goal configuration.
        let path = path_to_goal(&goal);
        let mut state = Rc::new(puzzle_from_str("1,0,2,3").unwrap());
        for action in path {
            state = PuzzleState::apply(&state, action).expect("replayed move is legal");
        }
        assert!(state.is_goal());
    }

    #[test]
    fn test_unsolvable_instance_exhausts_search() {
        // Swapping one tile pair flips the permutation parity, which makes
        // the instance unreachable from the goal.
        for strategy in [Strategy::Bfs, Strategy::Dfs, Strategy::AStar] {
            let outcome = run("1,0,3,2", strategy);
            assert!(outcome.goal.is_none());
            assert!(outcome.stats.nodes_expanded > 0);
        }
    }

    #[test]
    fn test_max_depth_counts_frontier_children() {
        let outcome = run("1,2,5,3,4,0,6,7,8", Strategy::Bfs);
        let goal = outcome.goal.unwrap();
        // BFS enqueues one extra layer beyond the goal depth before the
        // goal itself is dequeued.
        assert!(outcome.stats.max_depth >= goal.depth());
    }
}
