//! Row/column equivalence partitions.

use std::fmt;

use crate::circuit::VarId;

/// Two indices were already in the same class when a merge was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeConflict {
    /// The shared slot
    pub slot: usize,
}

/// Maps every variable index to a compacted slot.
///
/// Starts as the identity. Merging two indices unions their classes into
/// the lower slot and moves every slot above the removed one down by one,
/// so the live slots are always `0..=live_count()`. Slot 0 is the
/// reference node's class and is never an equation or unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    slots: Vec<usize>,
    live: usize,
}

impl Partition {
    /// Identity partition over `0..=count`.
    pub fn identity(count: usize) -> Self {
        Self {
            slots: (0..=count).collect(),
            live: count,
        }
    }

    /// Add one index with a fresh slot of its own.
    pub fn push(&mut self) -> VarId {
        self.live += 1;
        self.slots.push(self.live);
        VarId(self.slots.len() - 1)
    }

    /// Slot of an index.
    pub fn slot(&self, var: VarId) -> usize {
        self.slots[var.0]
    }

    /// Number of live slots, excluding slot 0.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Union the classes of `a` and `b` and compact the numbering.
    pub fn merge(&mut self, a: VarId, b: VarId) -> Result<(), MergeConflict> {
        let (sa, sb) = (self.slots[a.0], self.slots[b.0]);
        let (keep, removed) = if sa > sb { (sb, sa) } else { (sa, sb) };
        if keep == removed {
            return Err(MergeConflict { slot: keep });
        }

        for slot in &mut self.slots {
            if *slot == removed {
                *slot = keep;
            } else if *slot > removed {
                *slot -= 1;
            }
        }
        self.live -= 1;
        Ok(())
    }

    /// All slots, indexed by variable.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .slots
            .iter()
            .enumerate()
            .map(|(var, slot)| format!("{}->{}", var, slot))
            .collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_compacts_numbering() {
        let mut p = Partition::identity(4);
        p.merge(VarId(3), VarId(1)).unwrap();
        assert_eq!(p.slots(), &[0, 1, 2, 1, 3]);
        assert_eq!(p.live_count(), 3);

        p.merge(VarId(4), VarId(0)).unwrap();
        assert_eq!(p.slots(), &[0, 1, 2, 1, 0]);
        assert_eq!(p.live_count(), 2);
    }

    #[test]
    fn test_merge_with_ground_drops_class() {
        let mut p = Partition::identity(3);
        p.merge(VarId(1), VarId(0)).unwrap();
        assert_eq!(p.slots(), &[0, 0, 1, 2]);
        // Merging another member of the ground class is a conflict
        assert_eq!(p.merge(VarId(0), VarId(1)), Err(MergeConflict { slot: 0 }));
    }

    #[test]
    fn test_merge_same_class_is_conflict() {
        let mut p = Partition::identity(3);
        p.merge(VarId(1), VarId(2)).unwrap();
        assert_eq!(p.merge(VarId(2), VarId(1)), Err(MergeConflict { slot: 1 }));
        assert_eq!(p.merge(VarId(3), VarId(3)), Err(MergeConflict { slot: 2 }));
        // A failed merge leaves the partition untouched
        assert_eq!(p.slots(), &[0, 1, 1, 2]);
    }

    #[test]
    fn test_every_merge_removes_exactly_one_slot() {
        let mut p = Partition::identity(6);
        let merges = [(1, 2), (5, 0), (3, 6), (2, 4), (6, 1)];
        for (i, (a, b)) in merges.iter().enumerate() {
            p.merge(VarId(*a), VarId(*b)).unwrap();
            assert_eq!(p.live_count(), 6 - (i + 1));
            let max = p.slots().iter().copied().max().unwrap();
            assert_eq!(max, p.live_count());
        }
    }

    #[test]
    fn test_push_takes_next_slot() {
        let mut p = Partition::identity(2);
        p.merge(VarId(1), VarId(2)).unwrap();
        let x = p.push();
        assert_eq!(x, VarId(3));
        assert_eq!(p.slot(x), 2);
        assert_eq!(p.live_count(), 2);
    }
}
