use std::collections::BTreeSet;

use crate::error::GameError;

/// Cells the player has picked, stored as 0-based indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSet {
    cells: BTreeSet<usize>,
    total: usize,
}

impl SelectionSet {
    pub fn new(total: usize) -> Self {
        Self {
            cells: BTreeSet::new(),
            total,
        }
    }

    /// Forces membership of `index` to `on`. Returns whether anything changed.
    pub fn toggle(&mut self, index: usize, on: bool) -> Result<bool, GameError> {
        if index >= self.total {
            return Err(GameError::CellOutOfRange {
                index,
                total: self.total,
            });
        }
        Ok(if on {
            self.cells.insert(index)
        } else {
            self.cells.remove(&index)
        })
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn remaining(&self) -> usize {
        self.total - self.cells.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    /// 1-based labels as printed on the grid.
    pub fn labels(&self) -> BTreeSet<u32> {
        self.cells.iter().map(|&i| i as u32 + 1).collect()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_idempotent() {
        let mut sel = SelectionSet::new(64);
        assert_eq!(sel.toggle(5, true), Ok(true));
        assert_eq!(sel.toggle(5, true), Ok(false));
        assert_eq!(sel.size(), 1);
        assert_eq!(sel.toggle(5, false), Ok(true));
        assert_eq!(sel.toggle(5, false), Ok(false));
        assert_eq!(sel.size(), 0);
    }

    #[test]
    fn labels_are_one_based() {
        let mut sel = SelectionSet::new(64);
        for i in [0, 5, 63] {
            sel.toggle(i, true).unwrap();
        }
        assert_eq!(sel.labels().into_iter().collect::<Vec<_>>(), vec![1, 6, 64]);
        assert_eq!(sel.remaining(), 61);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut sel = SelectionSet::new(64);
        assert_eq!(
            sel.toggle(64, true),
            Err(GameError::CellOutOfRange { index: 64, total: 64 })
        );
        assert_eq!(sel.size(), 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut sel = SelectionSet::new(8);
        for i in 0..8 {
            sel.toggle(i, true).unwrap();
        }
        sel.clear();
        sel.clear();
        assert_eq!(sel.size(), 0);
        assert_eq!(sel.remaining(), sel.total());
    }
}
