//! Row match highlighting.
//!
//! Two rows match when the lines currently drawn on the same screen row of
//! both panes are equal after trimming surrounding whitespace. This is a
//! positional comparison only: identical lines that sit at different screen
//! rows are not flagged, and no line alignment is attempted.

use crate::content::LineSequence;

pub fn lines_match(left: &str, right: &str) -> bool {
    left.trim() == right.trim()
}

/// Whether screen row `screen_row` (1-based, row 0 holds the labels) shows
/// matching lines when the panes are scrolled to `left_row` / `right_row`.
pub fn row_matches(
    lhs: &LineSequence,
    left_row: isize,
    rhs: &LineSequence,
    right_row: isize,
    screen_row: u16,
) -> bool {
    let offset = screen_row as isize;
    match (lhs.line(left_row + offset), rhs.line(right_row + offset)) {
        (Some(left), Some(right)) => lines_match(left, right),
        _ => false,
    }
}

/// Match flags for screen rows `1..=rows`. All false when highlighting is off.
pub fn match_mask(
    lhs: &LineSequence,
    left_row: isize,
    rhs: &LineSequence,
    right_row: isize,
    rows: u16,
    enabled: bool,
) -> Vec<bool> {
    (1..=rows)
        .map(|i| enabled && row_matches(lhs, left_row, rhs, right_row, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::viewport::HOME_ROW;

    fn seq(lines: &[&str]) -> LineSequence {
        LineSequence::normalize(lines.iter().copied(), 2)
    }

    #[test]
    fn test_mismatched_middle_row() {
        let lhs = seq(&["a", "b", "c"]);
        let rhs = seq(&["a", "x", "c"]);
        let mask = match_mask(&lhs, HOME_ROW, &rhs, HOME_ROW, 3, true);
        assert_eq!(mask, vec![true, false, true]);
    }

    #[test]
    fn test_identical_sequences_all_match() {
        let lines = ["fn main() {", "    body();", "}"];
        let lhs = seq(&lines);
        let rhs = seq(&lines);
        for row in [HOME_ROW, 0, 1] {
            let mask = match_mask(&lhs, row, &rhs, row, 3, true);
            let in_bounds = (1..=3).filter(|i| row + i < 3).count();
            assert_eq!(mask.iter().filter(|m| **m).count(), in_bounds);
        }
    }

    #[test]
    fn test_disabled_flags_nothing() {
        let lhs = seq(&["a", "b"]);
        let mask = match_mask(&lhs, HOME_ROW, &lhs.clone(), HOME_ROW, 2, false);
        assert_eq!(mask, vec![false, false]);
    }

    #[test]
    fn test_trim_only_surrounding_whitespace() {
        assert!(lines_match("  let x = 1;", "let x = 1;   "));
        assert!(!lines_match("let  x", "let x"));
    }

    #[test]
    fn test_out_of_bounds_never_matches() {
        let lhs = seq(&["a"]);
        let rhs = seq(&["a", "a"]);
        assert!(row_matches(&lhs, HOME_ROW, &rhs, HOME_ROW, 1));
        assert!(!row_matches(&lhs, HOME_ROW, &rhs, HOME_ROW, 2));
    }

    #[test]
    fn test_drifted_rows_do_not_match() {
        let lhs = seq(&["a", "b", "c"]);
        let rhs = seq(&["x", "a", "b", "c"]);
        assert_eq!(
            match_mask(&lhs, HOME_ROW, &rhs, HOME_ROW, 3, true),
            vec![false, false, false]
        );
        // scrolling the right pane one row realigns them
        assert_eq!(
            match_mask(&lhs, HOME_ROW, &rhs, 0, 3, true),
            vec![true, true, true]
        );
    }
}
