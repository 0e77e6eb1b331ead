// vim: set ai et ts=4 sw=4 sts=4:
mod index;

use std::fmt;

use crate::util::Direction;
use crate::grid::{Grid, Square, SquareStatus};
use crate::error::Error;
use crate::hint::Hint;

pub use self::index::{CandidateIndex, IndexCache, LineContent, Signature};

pub trait DirectionalSequence
{
    fn get_row_index(&self) -> usize;
    fn get_direction(&self) -> Direction;

    /// (row, col) of the square at the given position along this sequence.
    fn square_index(&self, at: usize) -> (usize, usize) {
        self.get_direction().to_grid(self.get_row_index(), at)
    }
    fn get_square<'g>(&self, grid: &'g Grid, at: usize) -> &'g Square {
        let (row, col) = self.square_index(at);
        grid.get_square(row, col)
    }
}

/// A row or column of the puzzle, together with the line contents still
/// consistent with its hint and with the squares fixed so far.
///
/// The candidate list starts as the index bucket for the hint and only ever
/// shrinks.
#[derive(Debug, Clone)]
pub struct Row {
    pub direction:  Direction,
    pub index:      usize,
    pub length:     usize,
    pub hint:       Hint,
    candidates:     Vec<LineContent>,
}

impl Row {
    pub fn new(candidate_index: &CandidateIndex,
               direction: Direction,
               row_index: usize,
               hint: &Hint) -> Result<Self, Error>
    {
        let key = hint.key().ok_or_else(|| Error::UnsupportedHint {
            direction,
            index: row_index,
            hint: hint.to_string(),
        })?;
        let candidates = candidate_index.lookup(&key).to_vec();
        if candidates.is_empty() {
            log::debug!("no line of length {} matches {} {} hint {}",
                        candidate_index.length(), direction.line_name(), row_index, hint);
        }
        Ok(Row {
            direction,
            index:      row_index,
            length:     candidate_index.length(),
            hint:       hint.clone(),
            candidates,
        })
    }

    pub fn candidates(&self) -> &[LineContent] {
        &self.candidates
    }
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }
    pub fn is_exhausted(&self) -> bool {
        self.candidates.is_empty()
    }

    /// For each position, how many candidates have that square filled.
    pub fn tally(&self) -> Vec<usize> {
        let mut counts = vec![0; self.length];
        for content in &self.candidates {
            for (at, count) in counts.iter_mut().enumerate() {
                if content.is_filled(at) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// Drops every candidate that disagrees with `status` at position `at`.
    /// Returns whether anything was removed.
    pub fn prune(&mut self, at: usize, status: SquareStatus) -> bool {
        let want_filled = match status {
            SquareStatus::Filled  => true,
            SquareStatus::Empty   => false,
            SquareStatus::Unknown => return false,
        };
        let before = self.candidates.len();
        self.candidates.retain(|c| c.is_filled(at) == want_filled);
        self.candidates.len() != before
    }
}
impl DirectionalSequence for Row {
    fn get_row_index(&self) -> usize { self.index }
    fn get_direction(&self) -> Direction { self.direction }
}
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ({}; {} candidates)",
               self.direction.line_name(), self.index, self.hint, self.candidates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::parse_hint;
    use crate::util::Direction::*;
    use crate::grid::SquareStatus::*;

    fn row(length: usize, hint: &str) -> Result<Row, Error> {
        let index = CandidateIndex::build(length).unwrap();
        Row::new(&index, Horizontal, 0, &parse_hint(hint).unwrap())
    }

    #[test]
    fn initializes_from_index_bucket() {
        let r = row(5, "2 1").unwrap();
        // 11010, 11001, 01101
        assert_eq!(r.candidate_count(), 3);
        assert_eq!(row(5, "?").unwrap().candidate_count(), 32);
        assert_eq!(row(5, "0").unwrap().candidates(), &[LineContent::from_bits(0)]);
    }

    #[test]
    fn unsatisfiable_hint_has_no_candidates() {
        assert!(row(2, "3").unwrap().is_exhausted());
        assert!(row(4, "0 2").unwrap().is_exhausted());
    }

    #[test]
    fn mixed_unspecified_is_unsupported() {
        match row(3, "1 ?") {
            Err(Error::UnsupportedHint { direction, index, hint }) => {
                assert_eq!(direction, Horizontal);
                assert_eq!(index, 0);
                assert_eq!(hint, "1 ?");
            }
            other => panic!("expected unsupported hint, got {:?}", other),
        }
    }

    #[test]
    fn tally_counts_filled_candidates() {
        let r = row(5, "2 1").unwrap();
        assert_eq!(r.tally(), vec![2, 3, 1, 1, 2]);
        let r = row(3, "3").unwrap();
        assert_eq!(r.tally(), vec![1, 1, 1]);
    }

    #[test]
    fn prune_only_shrinks() {
        let mut r = row(5, "2 1").unwrap();
        assert!(!r.prune(1, Filled));
        assert!(!r.prune(2, Unknown));
        assert!(r.prune(0, Empty));
        assert_eq!(r.candidates(), &[LineContent::from_bits(0b10110)]);
        assert!(r.prune(0, Filled));
        assert!(r.is_exhausted());
        assert!(!r.prune(3, Filled));
    }

    #[test]
    fn columns_address_grid_by_position() {
        let index = CandidateIndex::build(3).unwrap();
        let col = Row::new(&index, Vertical, 2, &parse_hint("1").unwrap()).unwrap();
        assert_eq!(col.square_index(1), (1, 2));
    }
}
