use clap::Parser;
use puzzle_solvers::puzzle::Action;
use puzzle_solvers::search::{self, SearchOutcome, Strategy};
use puzzle_solvers::utils::puzzle_from_str;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search strategy: bfs, dfs, or ast
    mode: String,

    /// Comma-separated initial configuration, e.g. "1,2,5,3,4,0,6,7,8"
    config: String,

    /// Path of the statistics record to write
    #[clap(short, long, default_value = "output.txt")]
    output: PathBuf,
}

/// Renders the action list in the record's bracketed, quoted form,
/// e.g. `['Up', 'Left', 'Left']`.
fn format_path(path: &[Action]) -> String {
    let names: Vec<String> = path.iter().map(|a| format!("'{}'", a)).collect();
    format!("[{}]", names.join(", "))
}

fn format_record(outcome: &SearchOutcome, running_time: f64) -> Option<String> {
    let goal = outcome.goal.as_ref()?;
    let path = search::path_to_goal(goal);
    Some(format!(
        "path_to_goal: {}\n\
         cost_of_path: {}\n\
         nodes_expanded: {}\n\
         search_depth: {}\n\
         max_search_depth: {}\n\
         running_time: {:.8}\n\
         max_ram_usage: {:.8}\n",
        format_path(&path),
        goal.cost(),
        outcome.stats.nodes_expanded,
        goal.depth(),
        outcome.stats.max_depth,
        running_time,
        outcome.stats.peak_memory_mb,
    ))
}

fn main() {
    let args = Args::parse();

    let strategy: Strategy = args.mode.parse().expect("invalid search mode");
    let initial = puzzle_from_str(&args.config).expect("invalid puzzle configuration");

    let start = Instant::now();
    let outcome = search::search(initial, strategy);
    let running_time = start.elapsed().as_secs_f64();

    match format_record(&outcome, running_time) {
        Some(record) => {
            fs::write(&args.output, record)
                .unwrap_or_else(|e| panic!("Failed to write {}: {}", args.output.display(), e));
            println!("Program completed in {:.3} second(s)", running_time);
        }
        None => {
            println!(
                "No solution found after expanding {} nodes.",
                outcome.stats.nodes_expanded
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solvers::search::SearchStats;

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "[]");
        assert_eq!(
            format_path(&[Action::Up, Action::Left, Action::Left]),
            "['Up', 'Left', 'Left']"
        );
    }

    #[test]
    fn test_format_record_fields() {
        let initial = puzzle_from_str("1,2,5,3,4,0,6,7,8").unwrap();
        let outcome = search::search(initial, Strategy::AStar);
        let record = format_record(&outcome, 0.125).unwrap();
        assert!(record.contains("path_to_goal: ['Up', 'Left', 'Left']\n"));
        assert!(record.contains("cost_of_path: 3\n"));
        assert!(record.contains("running_time: 0.12500000\n"));
        assert!(record.contains("max_ram_usage: "));
    }

    #[test]
    fn test_format_record_without_goal() {
        let outcome = SearchOutcome {
            goal: None,
            stats: SearchStats::default(),
        };
        assert!(format_record(&outcome, 0.0).is_none());
    }
}
