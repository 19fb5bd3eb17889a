// Pointer drag state for painting the grid

/// Input device that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Mouse,
    Touch,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub active: bool,
    /// Membership applied to every cell the pointer enters during this drag.
    pub target_on: bool,
    /// Cell of the last touch start. Browsers may replay a tap as a mousedown there.
    tapped: Option<usize>,
}

impl DragState {
    /// Starts a drag on `cell`; the target state is the inverse of its current one.
    /// Returns `None` for the compatibility mousedown that follows a tap.
    pub fn begin(
        &mut self,
        pointer: Pointer,
        cell: usize,
        currently_selected: bool,
    ) -> Option<bool> {
        match pointer {
            Pointer::Touch => self.tapped = Some(cell),
            Pointer::Mouse => {
                if self.tapped.take() == Some(cell) {
                    return None;
                }
            }
        }
        self.active = true;
        self.target_on = !currently_selected;
        Some(self.target_on)
    }

    /// Membership to apply for a cell entered mid-drag, if a drag is active.
    pub fn enter(&self) -> Option<bool> {
        self.active.then_some(self.target_on)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_paints_with_start_state() {
        let mut drag = DragState::default();
        assert_eq!(drag.enter(), None);
        assert_eq!(drag.begin(Pointer::Mouse, 0, false), Some(true));
        assert_eq!(drag.enter(), Some(true));
        drag.end();
        assert_eq!(drag.enter(), None);
        assert_eq!(drag.begin(Pointer::Mouse, 0, true), Some(false));
        assert_eq!(drag.enter(), Some(false));
    }

    #[test]
    fn tap_is_not_undone_by_replayed_mousedown() {
        let mut drag = DragState::default();
        // touchstart selects cell 3, then the tap ends.
        assert_eq!(drag.begin(Pointer::Touch, 3, false), Some(true));
        drag.end();
        // The replayed mousedown sees the cell already selected and must not flip it back.
        assert_eq!(drag.begin(Pointer::Mouse, 3, true), None);
        assert_eq!(drag.enter(), None);
        // A real click afterwards toggles normally.
        assert_eq!(drag.begin(Pointer::Mouse, 3, true), Some(false));
    }

    #[test]
    fn mouse_on_another_cell_after_touch_still_toggles() {
        let mut drag = DragState::default();
        drag.begin(Pointer::Touch, 3, false);
        drag.end();
        assert_eq!(drag.begin(Pointer::Mouse, 9, false), Some(true));
    }
}
