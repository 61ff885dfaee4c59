//! Free-cell pool: draw without replacement, return on consumption.

use snake_core::{BoardRng, Position};

use crate::CellMap;

/// Cells not currently assigned to any board feature.
///
/// Stored as a dense `Vec` plus a cell → slot index so that a uniform random
/// draw, a targeted removal, and a return are all O(1).  Snake bodies are not
/// tracked here.
#[derive(Debug, Clone, Default)]
pub struct FreePool {
    cells: Vec<Position>,
    slots: CellMap<usize>,
}

impl FreePool {
    /// Every cell of a `width × height` grid, column by column.
    pub fn with_grid(width: i32, height: i32) -> Self {
        let mut pool = Self::default();
        for x in 0..width {
            for y in 0..height {
                pool.release(Position::new(x, y));
            }
        }
        pool
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Position) -> bool {
        self.slots.contains_key(&cell)
    }

    /// Remove and return a uniformly chosen cell, or `None` when empty.
    pub fn take_random(&mut self, rng: &mut BoardRng) -> Option<Position> {
        if self.cells.is_empty() {
            return None;
        }
        let idx = rng.index(self.cells.len());
        Some(self.remove_at(idx))
    }

    /// Remove a specific cell.  Returns `false` if it was not free.
    pub fn take(&mut self, cell: Position) -> bool {
        match self.slots.get(&cell) {
            Some(&idx) => {
                self.remove_at(idx);
                true
            }
            None => false,
        }
    }

    /// Return a cell to the pool.  Returns `false` if it was already free.
    pub fn release(&mut self, cell: Position) -> bool {
        if self.slots.contains_key(&cell) {
            return false;
        }
        self.slots.insert(cell, self.cells.len());
        self.cells.push(cell);
        true
    }

    fn remove_at(&mut self, idx: usize) -> Position {
        let cell = self.cells.swap_remove(idx);
        self.slots.remove(&cell);
        if let Some(&moved) = self.cells.get(idx) {
            self.slots.insert(moved, idx);
        }
        cell
    }
}
