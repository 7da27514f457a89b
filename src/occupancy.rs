use std::collections::HashMap;

use crate::geometry::Position;

/// Multiset of occupied cells. A count above one means two segments overlap.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    counts: HashMap<Position, usize>,
}

impl Occupancy {
    pub fn new() -> Self {
        Occupancy::default()
    }

    pub fn insert(&mut self, pos: Position) {
        *self.counts.entry(pos).or_insert(0) += 1;
    }

    pub fn remove(&mut self, pos: Position) {
        if let Some(count) = self.counts.get_mut(&pos) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&pos);
            }
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.counts.contains_key(&pos)
    }

    pub fn count(&self, pos: Position) -> usize {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    /// Number of distinct occupied cells.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
