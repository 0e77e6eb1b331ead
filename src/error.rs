// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::io;
use yaml_rust::ScanError;

use crate::util::Direction;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum ConflictReason {
    NoCandidates,        // no line content satisfies the hint together with the fixed squares
    EmptyButAllFilled,   // square is empty, yet every remaining candidate fills it
    FilledButNoneFilled, // square is filled, yet no remaining candidate fills it
    Rejected,            // a write contradicted the square's existing status
}
impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            ConflictReason::NoCandidates        => "no candidate line remains",
            ConflictReason::EmptyButAllFilled   => "square is empty but every candidate fills it",
            ConflictReason::FilledButNoneFilled => "square is filled but no candidate fills it",
            ConflictReason::Rejected            => "conflicting status for square",
        })
    }
}

/// A contradiction found while propagating, located by the line that exposed
/// it and the position along that line.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Conflict {
    pub direction: Direction,
    pub line: usize,
    pub position: usize,
    pub reason: ConflictReason,
}
impl Conflict {
    pub fn new(direction: Direction, line: usize, position: usize, reason: ConflictReason) -> Self {
        Conflict { direction, line, position, reason }
    }
    pub fn row(&self) -> usize { self.direction.to_grid(self.line, self.position).0 }
    pub fn col(&self) -> usize { self.direction.to_grid(self.line, self.position).1 }
}
impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "conflict at (row={}, col={}) while checking {} {}: {}",
               self.row(), self.col(), self.direction.line_name(), self.line, self.reason)
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidInput(String),
    UnsupportedHint { direction: Direction, index: usize, hint: String },
    Conflict(Conflict),
    Config(String),
    Yaml(ScanError),
    Io(io::Error),
}
impl Error {
    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            Error::Conflict(c) => Some(c),
            _                  => None,
        }
    }
}
impl From<Conflict> for Error {
    fn from(other: Conflict) -> Self {
        Error::Conflict(other)
    }
}
impl From<ScanError> for Error {
    fn from(other: ScanError) -> Self {
        Error::Yaml(other)
    }
}
impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::UnsupportedHint { direction, index, hint } =>
                write!(f, "unsupported hint \"{}\" in {} {}: '?' must stand alone",
                       hint, direction.line_name(), index),
            Error::Conflict(c)       => write!(f, "{}", c),
            Error::Config(msg)       => write!(f, "configuration error: {}", msg),
            Error::Yaml(e)           => write!(f, "YAML error: {}", e),
            Error::Io(e)             => write!(f, "I/O error: {}", e),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Yaml(e) => Some(e),
            Error::Io(e)   => Some(e),
            _              => None,
        }
    }
}
