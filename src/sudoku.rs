//! Backtracking constraint solver for 9x9 Sudoku.
//!
//! The board is a flat array of 81 cells (0 = unassigned). Candidate
//! domains are `u16` bitmasks (bit `v` set means value `v` is still
//! possible). Solving combines:
//! - initial domain pruning from the given clues,
//! - minimum-remaining-values variable selection,
//! - forward checking with an exact removal log, rolled back
//!   transactionally when a branch fails.
//!
//! An unsolvable board is a normal negative result (`None`), not an error.
use std::fmt;

/// Cells on a board.
pub const BOARD_CELLS: usize = 81;

const SIZE: usize = 9;
const BOX: usize = 3;

/// Bitmask with candidate bits 1..=9 all set.
const FULL_DOMAIN: u16 = 0b11_1111_1110;

/// A 9x9 Sudoku assignment, row-major, 0 meaning unassigned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SudokuBoard {
    cells: [u8; BOARD_CELLS],
}

/// Human-readable cell name in row-letter/column-digit form, e.g. `A1`
/// for the top-left cell and `I9` for the bottom-right one.
pub fn cell_name(index: usize) -> String {
    let row = (b'A' + (index / SIZE) as u8) as char;
    let col = index % SIZE + 1;
    format!("{}{}", row, col)
}

impl SudokuBoard {
    /// Parses an 81-character digit string (row-major, `0` = blank).
    ///
    /// # Errors
    /// Returns an error when the string is not exactly 81 characters or
    /// contains anything but the digits 0-9.
    pub fn from_line(line: &str) -> Result<Self, String> {
        let trimmed = line.trim();
        let mut cells = [0u8; BOARD_CELLS];
        let mut count = 0;
        for (index, ch) in trimmed.chars().enumerate() {
            if index >= BOARD_CELLS {
                return Err(format!(
                    "board string too long: expected {} characters",
                    BOARD_CELLS
                ));
            }
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| format!("invalid character '{}' at cell {}", ch, cell_name(index)))?;
            cells[index] = digit as u8;
            count += 1;
        }
        if count != BOARD_CELLS {
            return Err(format!(
                "board string has {} characters, expected {}",
                count, BOARD_CELLS
            ));
        }
        Ok(SudokuBoard { cells })
    }

    /// Serializes the board back to its 81-character row-major form.
    pub fn to_line(&self) -> String {
        self.cells.iter().map(|&v| char::from(b'0' + v)).collect()
    }

    /// Returns the value of the cell at `index` (0 = unassigned).
    pub fn get(&self, index: usize) -> u8 {
        self.cells[index]
    }

    /// `true` when no cell is unassigned.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Checks that every row, column, and 3x3 box holds each of 1..=9
    /// exactly once.
    pub fn is_valid_solution(&self) -> bool {
        for r in 0..SIZE {
            if !self.unit_is_complete((0..SIZE).map(|c| r * SIZE + c)) {
                return false;
            }
        }
        for c in 0..SIZE {
            if !self.unit_is_complete((0..SIZE).map(|r| r * SIZE + c)) {
                return false;
            }
        }
        for box_row in (0..SIZE).step_by(BOX) {
            for box_col in (0..SIZE).step_by(BOX) {
                let unit = (0..BOX)
                    .flat_map(move |r| (0..BOX).map(move |c| (box_row + r) * SIZE + (box_col + c)));
                if !self.unit_is_complete(unit) {
                    return false;
                }
            }
        }
        true
    }

    fn unit_is_complete(&self, indices: impl Iterator<Item = usize>) -> bool {
        let mut mask = 0u16;
        for index in indices {
            let value = self.cells[index];
            if value == 0 {
                return false;
            }
            mask |= 1 << value;
        }
        mask == FULL_DOMAIN
    }
}

impl fmt::Display for SudokuBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            let row: Vec<String> = (0..SIZE)
                .map(|c| self.cells[r * SIZE + c].to_string())
                .collect();
            write!(f, "{}", row.join(" "))?;
            if r < SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Visits every peer of `index`: the rest of its row, column, and box.
/// Cells shared between the row/column and the box are visited twice,
/// which the callers tolerate (removals are idempotent).
fn for_each_peer(index: usize, mut visit: impl FnMut(usize)) {
    let r = index / SIZE;
    let c = index % SIZE;
    for cc in 0..SIZE {
        if cc != c {
            visit(r * SIZE + cc);
        }
    }
    for rr in 0..SIZE {
        if rr != r {
            visit(rr * SIZE + c);
        }
    }
    let box_row = r / BOX * BOX;
    let box_col = c / BOX * BOX;
    for rr in box_row..box_row + BOX {
        for cc in box_col..box_col + BOX {
            if rr != r || cc != c {
                visit(rr * SIZE + cc);
            }
        }
    }
}

/// Builds the starting domains: every unassigned cell begins with 1..=9
/// minus every value already fixed in its row, column, or box.
fn initial_domains(board: &SudokuBoard) -> [u16; BOARD_CELLS] {
    let mut domains = [0u16; BOARD_CELLS];
    for index in 0..BOARD_CELLS {
        if board.cells[index] == 0 {
            domains[index] = FULL_DOMAIN;
        }
    }
    for index in 0..BOARD_CELLS {
        let value = board.cells[index];
        if value != 0 {
            let bit = 1u16 << value;
            for_each_peer(index, |peer| {
                domains[peer] &= !bit;
            });
        }
    }
    domains
}

/// Minimum-remaining-values selection: the unassigned cell with the
/// smallest domain, ties broken by cell order. `None` means the
/// assignment is complete.
fn select_unassigned(board: &SudokuBoard, domains: &[u16; BOARD_CELLS]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for index in 0..BOARD_CELLS {
        if board.cells[index] != 0 {
            continue;
        }
        let size = domains[index].count_ones();
        match best {
            Some((_, smallest)) if size >= smallest => {}
            _ => best = Some((index, size)),
        }
    }
    best.map(|(index, _)| index)
}

/// Checks that `value` does not already appear in the row, column, or box
/// of the unassigned cell at `index`.
fn is_consistent(board: &SudokuBoard, index: usize, value: u8) -> bool {
    let r = index / SIZE;
    let c = index % SIZE;
    for cc in 0..SIZE {
        if board.cells[r * SIZE + cc] == value {
            return false;
        }
    }
    for rr in 0..SIZE {
        if board.cells[rr * SIZE + c] == value {
            return false;
        }
    }
    let box_row = r / BOX * BOX;
    let box_col = c / BOX * BOX;
    for rr in box_row..box_row + BOX {
        for cc in box_col..box_col + BOX {
            if board.cells[rr * SIZE + cc] == value {
                return false;
            }
        }
    }
    true
}

/// Propagates an assignment by removing `value` from the domain of every
/// unassigned peer, logging exactly which cells lost the value so the
/// caller can roll back precisely.
///
/// Returns the removal log and whether some peer's domain was emptied.
fn forward_check(
    board: &SudokuBoard,
    domains: &mut [u16; BOARD_CELLS],
    var: usize,
    value: u8,
) -> (Vec<(usize, u16)>, bool) {
    let bit = 1u16 << value;
    let mut log: Vec<(usize, u16)> = Vec::new();
    let mut wiped = false;
    for_each_peer(var, |peer| {
        if board.cells[peer] == 0 && domains[peer] & bit != 0 {
            domains[peer] &= !bit;
            log.push((peer, bit));
            if domains[peer] == 0 {
                wiped = true;
            }
        }
    });
    (log, wiped)
}

fn backtrack(board: &mut SudokuBoard, domains: &mut [u16; BOARD_CELLS]) -> bool {
    let var = match select_unassigned(board, domains) {
        Some(var) => var,
        None => return true,
    };
    let saved_domain = domains[var];

    for value in 1..=9u8 {
        if saved_domain & (1 << value) == 0 {
            continue;
        }
        if !is_consistent(board, var, value) {
            continue;
        }

        board.cells[var] = value;
        let (log, wiped) = forward_check(board, domains, var, value);

        if !wiped && backtrack(board, domains) {
            return true;
        }

        // Transactional rollback: undo the assignment and replay the
        // removal log in reverse so the domain map returns to exactly its
        // pre-branch contents.
        board.cells[var] = 0;
        for &(cell, removed) in log.iter().rev() {
            domains[cell] |= removed;
        }
        domains[var] = saved_domain;
    }

    false
}

/// Solves the board, returning the completed assignment or `None` when
/// the constraints cannot be satisfied.
pub fn solve(board: &SudokuBoard) -> Option<SudokuBoard> {
    let mut work = *board;
    let mut domains = initial_domains(&work);
    if backtrack(&mut work, &mut domains) {
        Some(work)
    } else {
        None
    }
}
