// vim: set ai et ts=4 sts=4:
use std::fmt;

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(row={:-2}, col={:-2})", self.get_row(), self.get_col())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    Filled,
    Empty,
    Unknown,
}
impl SquareStatus {
    pub fn is_known(&self) -> bool {
        *self != SquareStatus::Unknown
    }
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::Filled  => "Filled",
            SquareStatus::Empty   => "Empty",
            SquareStatus::Unknown => "Unknown",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct StatusChange {
    pub row: usize,
    pub col: usize,
    pub old: SquareStatus,
    pub new: SquareStatus,
}
impl StatusChange {
    pub fn new(row: usize, col: usize, old: SquareStatus, new: SquareStatus) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for StatusChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Change: in square {}, status was changed from {} to {}",
            self.fmt_location(),
            self.old,
            self.new)
    }
}
pub type Changes = Vec<StatusChange>;

// ------------------------------------------------

#[derive(PartialEq, Debug)]
pub enum StatusError {
    ChangeRejected(StatusChange, String),
}
impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StatusError: {}", match self {
            StatusError::ChangeRejected(change, msg) =>
                format!("In {}, attempt to change status from {} to {} was rejected: {}",
                    change.fmt_location(), change.old, change.new, msg),
        })
    }
}
impl std::error::Error for StatusError {}

// if it worked: the change, if any; if it didn't, the change that was rejected
pub type StatusResult = Result<Option<StatusChange>, StatusError>;

// ------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    row: usize,
    col: usize,
    status: SquareStatus,
}
impl Square {
    pub fn new(row: usize, col: usize) -> Square {
        Square {
            row,
            col,
            status: SquareStatus::Unknown,
        }
    }

    pub fn get_status(&self) -> SquareStatus { self.status }

    pub fn set_status(&mut self, new_status: SquareStatus) -> StatusResult {
        let cand_change = StatusChange::new(self.row, self.col, self.status, new_status);
        self.apply_status_change(cand_change)
    }

    pub fn apply_status_change(&mut self, cand_change: StatusChange)
        -> StatusResult
    {
        debug_assert!(cand_change.row == self.row);
        debug_assert!(cand_change.col == self.col);

        // once known, a square's status is fixed for the rest of the solve
        if self.status != SquareStatus::Unknown && self.status != cand_change.new {
            let msg = match cand_change.new {
                SquareStatus::Unknown => "square was already set",
                _                     => "conflicting information",
            };
            return Err(StatusError::ChangeRejected(cand_change, msg.to_string()));
        }
        if self.status != cand_change.new {
            self.status = cand_change.new;
            return Ok(Some(cand_change));
        }
        Ok(None)
    }

    pub fn fmt_visual(&self) -> &str {
        match self.status {
            SquareStatus::Empty   => " ",
            SquareStatus::Filled  => "\u{25A0}",
            SquareStatus::Unknown => ".",
        }
    }
    pub fn fmt_plain(&self) -> char {
        match self.status {
            SquareStatus::Empty   => '.',
            SquareStatus::Filled  => '#',
            SquareStatus::Unknown => '?',
        }
    }
}
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}
impl HasGridLocation for Square {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}

// ------------------------------------------------

/// The square matrix of cell states produced by a solve.
///
/// Squares start out `Unknown` and are written at most once; the solver is the
/// only writer, everything else reads it through the accessors below.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    squares: Vec<Vec<Square>>,
}
impl Grid {
    pub fn new(size: usize) -> Self {
        Grid {
            squares: (0..size).map(|row| (0..size).map(|col| Square::new(row, col))
                                                  .collect::<Vec<_>>())
                              .collect(),
        }
    }

    pub fn size(&self) -> usize { self.squares.len() }

    pub fn get_square(&self, row: usize, col: usize) -> &Square {
        &self.squares[row][col]
    }
    pub(crate) fn get_square_mut(&mut self, row: usize, col: usize) -> &mut Square {
        &mut self.squares[row][col]
    }
    pub fn status(&self, row: usize, col: usize) -> SquareStatus {
        self.squares[row][col].get_status()
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.iter().map(|r| r.as_slice())
    }

    /// Coordinates (row, col) of all filled squares, in row-major order.
    pub fn filled_squares(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.squares.iter()
                    .flatten()
                    .filter(|sq| sq.get_status() == SquareStatus::Filled)
                    .map(|sq| (sq.get_row(), sq.get_col()))
    }
    pub fn unknown_count(&self) -> usize {
        self.squares.iter()
                    .flatten()
                    .filter(|sq| !sq.get_status().is_known())
                    .count()
    }
    pub fn is_solved(&self) -> bool {
        self.unknown_count() == 0
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(size={}, unknown={})", self.size(), self.unknown_count())
    }
}
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|sq| sq.fmt_plain()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
