//! Parsing helpers for initial search states.
use crate::puzzle::PuzzleState;

/// Parses a comma-separated tile list into a validated puzzle state.
///
/// The board side length is inferred from the number of entries, so the
/// list must contain a square count of values forming a permutation of
/// `0..n*n`, e.g. `"1,2,5,3,4,0,6,7,8"` for a 3x3 board.
///
/// # Errors
/// Returns an error for non-numeric entries, a non-square entry count, a
/// non-permutation, or a board smaller than 2x2.
///
/// # Examples
/// ```
/// use puzzle_solvers::utils::puzzle_from_str;
///
/// let state = puzzle_from_str("1,2,5,3,4,0,6,7,8").unwrap();
/// assert_eq!(state.n(), 3);
/// assert!(puzzle_from_str("1,2,3").is_err());
/// ```
pub fn puzzle_from_str(input: &str) -> Result<PuzzleState, String> {
    let values = input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<u8>()
                .map_err(|e| format!("invalid tile value '{}': {}", token, e))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    let n = (values.len() as f64).sqrt() as usize;
    PuzzleState::new(values, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_configuration() {
        let state = puzzle_from_str("0,1,2,3").unwrap();
        assert_eq!(state.n(), 2);
        assert!(state.is_goal());

        let spaced = puzzle_from_str(" 1 , 0 , 2 , 3 ").unwrap();
        assert_eq!(spaced.config(), &[1, 0, 2, 3]);
    }

    #[test]
    fn test_rejects_non_numeric_entry() {
        let err = puzzle_from_str("0,1,x,3").unwrap_err();
        assert!(err.contains("'x'"));
    }

    #[test]
    fn test_rejects_non_square_length() {
        assert!(puzzle_from_str("0,1,2").is_err());
        assert!(puzzle_from_str("0,1,2,3,4").is_err());
    }

    #[test]
    fn test_rejects_non_permutation() {
        assert!(puzzle_from_str("0,0,1,2").is_err());
        assert!(puzzle_from_str("1,2,3,4").is_err());
    }

    #[test]
    fn test_rejects_board_below_minimum_size() {
        assert!(puzzle_from_str("0").is_err());
    }
}
