// vim: set ai et ts=4 sts=4 sw=4:
//! Line-by-line nonogram solving.
//!
//! Hints are parsed with [`hint::parse_hints`], turned into a [`puzzle::Puzzle`]
//! whose rows and columns each carry the list of line contents still possible,
//! and [`puzzle::Puzzle::solve`] intersects those lists until nothing changes.
//! Only single-line deductions are made, so ambiguous puzzles come back with
//! some squares still unknown.
pub mod util;
pub mod error;
pub mod config;
pub mod hint;
pub mod grid;
pub mod row;
pub mod puzzle;
