// vim: set ai et ts=4 sts=4 sw=4:
use log::{debug, info, trace};

use super::Puzzle;
use crate::error::{Conflict, ConflictReason, Error};
use crate::grid::{Changes, SquareStatus, SquareStatus::*};
use crate::row::DirectionalSequence;
use crate::util::{Direction, Direction::*};

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Outcome {
    /// Every square is known.
    Solved,
    /// Fixed point reached with some squares still unknown.
    Unsolved,
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: Outcome,
    pub passes: usize,
    pub changes: Changes,
}

impl Puzzle {
    /// Propagates line constraints until no pass fixes a new square.
    ///
    /// On a conflict the puzzle is left mid-solve and should be discarded.
    pub fn solve(&mut self) -> Result<SolveReport, Error> {
        let mut changes = Changes::new();
        let mut passes = 0;

        loop {
            passes += 1;
            let progress = self.run_pass(&mut changes)?;
            debug!("pass {}: {} squares fixed so far, {} unknown",
                   passes, changes.len(), self.grid.unknown_count());
            if !progress {
                break;
            }
        }

        let outcome = match self.grid.is_solved() {
            true  => Outcome::Solved,
            false => Outcome::Unsolved,
        };
        info!("{:?} after {} passes ({} squares fixed)", outcome, passes, changes.len());
        Ok(SolveReport { outcome, passes, changes })
    }

    /// One full pass: all rows in order, then all columns in order.
    /// Returns whether any square was fixed.
    pub fn run_pass(&mut self, changes: &mut Changes) -> Result<bool, Conflict> {
        let before = changes.len();
        for y in 0..self.rows.len() {
            self.propagate_line(Horizontal, y, changes)?;
        }
        for x in 0..self.cols.len() {
            self.propagate_line(Vertical, x, changes)?;
        }
        Ok(changes.len() > before)
    }

    fn propagate_line(&mut self, direction: Direction, index: usize, changes: &mut Changes)
        -> Result<(), Conflict>
    {
        let (tally, total) = {
            let row = self.line(direction, index);
            if row.is_exhausted() {
                // point at the first known square of the line, if there is one
                let position = (0..row.length).find(|&at| row.get_square(&self.grid, at).get_status().is_known())
                                              .unwrap_or(0);
                return Err(Conflict::new(direction, index, position, ConflictReason::NoCandidates));
            }
            (row.tally(), row.candidate_count())
        };

        for (at, &count) in tally.iter().enumerate() {
            let forced = match count {
                c if c == total => Filled,
                0               => Empty,
                _               => continue,
            };
            let (y, x) = direction.to_grid(index, at);
            match self.grid.status(y, x) {
                Unknown => self.fix(direction, index, at, forced, changes)?,
                Empty if forced == Filled => return Err(Conflict::new(direction, index, at, ConflictReason::EmptyButAllFilled)),
                Filled if forced == Empty => return Err(Conflict::new(direction, index, at, ConflictReason::FilledButNoneFilled)),
                _ => {}
            }
        }
        Ok(())
    }

    fn fix(&mut self, direction: Direction, index: usize, at: usize, status: SquareStatus, changes: &mut Changes)
        -> Result<(), Conflict>
    {
        let (y, x) = direction.to_grid(index, at);
        let change = self.grid.get_square_mut(y, x)
                              .set_status(status)
                              .map_err(|_| Conflict::new(direction, index, at, ConflictReason::Rejected))?;
        self.rows[y].prune(x, status);
        self.cols[x].prune(y, status);

        if let Some(change) = change {
            trace!("{} {}: {}", direction.line_name(), index, change);
            changes.push(change);
        }
        Ok(())
    }
}
