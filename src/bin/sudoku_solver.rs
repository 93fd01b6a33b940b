use clap::Parser;
use puzzle_solvers::sudoku::{self, SudokuBoard};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// 81-character board string (row-major, 0 for blanks); when omitted,
    /// boards are read from the input file instead
    board: Option<String>,

    /// Newline-delimited board file used in batch mode
    #[clap(short, long, default_value = "sudokus_start.txt")]
    input: PathBuf,

    /// Path of the solution record to write
    #[clap(short, long, default_value = "output.txt")]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    let boards: Vec<String> = match &args.board {
        Some(line) => vec![line.clone()],
        None => {
            let content = fs::read_to_string(&args.input).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {}", args.input.display(), e);
                process::exit(1);
            });
            content
                .lines()
                .map(str::trim)
                .filter(|line| line.len() >= 9)
                .map(str::to_string)
                .collect()
        }
    };

    let mut records = Vec::new();
    for line in &boards {
        let board = SudokuBoard::from_line(line).unwrap_or_else(|e| {
            eprintln!("Invalid board '{}': {}", line, e);
            process::exit(1);
        });
        match sudoku::solve(&board) {
            Some(solved) => records.push(solved.to_line()),
            None => eprintln!("Board has no solution: {}", line),
        }
    }

    let mut record = records.join("\n");
    record.push('\n');
    fs::write(&args.output, record)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", args.output.display(), e));

    println!(
        "Solved {} of {} board(s); results written to {}",
        records.len(),
        boards.len(),
        args.output.display()
    );
}
