//! Estimation frames and call records

use std::collections::HashSet;

/// Cost bookkeeping for one syntactic scope: a conditional branch pair or a
/// declaration body being walked.
///
/// Costs accumulate into `trunk` until the walk crosses into the alternative
/// (false) branch, then into `branch`. A frame collapses when the walk
/// reaches `next_instruction`, folding the larger of the two accumulators
/// into its parent: the adversary picks the more expensive branch.
#[derive(Debug, Default)]
pub struct Frame {
    /// Cost accumulated on the primary path
    pub trunk: u64,
    /// Cost accumulated after crossing into the alternative branch
    pub branch: u64,
    /// True once the walk crossed into the alternative branch
    pub alternative: bool,
    /// Offset at which this frame's scope ends and it must collapse
    pub next_instruction: Option<usize>,
    /// Declared values already priced within this scope, by body offset
    pub known: HashSet<usize>,
}

impl Frame {
    /// Fresh frame with nothing accumulated
    pub fn new() -> Self {
        Self::default()
    }

    /// Account a cost on whichever path the walk is currently on
    pub fn add(&mut self, cost: u64) {
        if self.alternative {
            self.branch += cost;
        } else {
            self.trunk += cost;
        }
    }

    /// Collapsed cost of this frame: the more expensive path
    pub fn get(&self) -> u64 {
        if self.alternative {
            self.trunk.max(self.branch)
        } else {
            self.trunk
        }
    }
}

/// Why the walk jumped into a declaration body, and where to come back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallRecord {
    /// Body start offset
    pub start: usize,
    /// Offset to resume at after the body's `Return`
    pub ret: usize,
    /// True for a function call, false for a lazily-referenced value
    pub function: bool,
    /// Argument count of a function call
    pub arg_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accumulates_into_trunk_then_branch() {
        let mut frame = Frame::new();
        frame.add(3);
        assert_eq!(frame.get(), 3);
        frame.alternative = true;
        frame.add(5);
        assert_eq!(frame.trunk, 3);
        assert_eq!(frame.branch, 5);
    }

    #[test]
    fn test_frame_collapse_takes_max_not_sum() {
        let mut frame = Frame::new();
        frame.add(7);
        frame.alternative = true;
        frame.add(4);
        assert_eq!(frame.get(), 7);
        frame.add(10);
        assert_eq!(frame.get(), 14);
    }

    #[test]
    fn test_frame_without_alternative_reports_trunk() {
        let mut frame = Frame::new();
        frame.add(2);
        frame.add(2);
        assert_eq!(frame.get(), 4);
    }
}
