//! Sparse playable-cell set. Membership is the only notion of passability;
//! there is no separate bounds check.

use std::collections::BTreeMap;

use crate::types::Pos;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    cells: BTreeMap<Pos, bool>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cell of a `width` x `height` rectangle anchored at the origin is playable.
    pub fn rect(width: u32, height: u32) -> Self {
        let mut grid = Self::new();
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                grid.set(Pos { x, y }, true);
            }
        }
        grid
    }

    pub fn set(&mut self, pos: Pos, playable: bool) {
        self.cells.insert(pos, playable);
    }

    /// Marks `pos` as a hole.
    pub fn carve(&mut self, pos: Pos) {
        self.set(pos, false);
    }

    pub fn in_grid(&self, pos: Pos) -> bool {
        self.cells.get(&pos).copied().unwrap_or(false)
    }

    /// Playable cells in key order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().filter(|(_, playable)| **playable).map(|(pos, _)| *pos)
    }

    /// `(width, height)` as one past the largest playable x and y; `(0, 0)` when empty.
    pub fn dimensions(&self) -> (u32, u32) {
        let mut max_x = -1;
        let mut max_y = -1;
        for pos in self.cells() {
            max_x = max_x.max(pos.x);
            max_y = max_y.max(pos.y);
        }
        ((max_x + 1).max(0) as u32, (max_y + 1).max(0) as u32)
    }
}
