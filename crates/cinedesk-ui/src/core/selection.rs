//! Row selection for batch actions.
//!
//! Selection only ever covers rows on the current page: select-all takes the
//! visible ids, and a new page prunes anything no longer visible.

use std::collections::BTreeSet;

/// Header checkbox state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectAllState {
    /// No visible row is selected.
    None,
    /// Some but not all visible rows are selected (indeterminate).
    Some,
    /// Every visible row is selected.
    All,
}

/// Selected row ids, kept sorted so batch payloads are stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<Id: Ord> {
    ids: BTreeSet<Id>,
}

impl<Id: Ord> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Clone> Selection<Id> {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in order.
    #[must_use]
    pub fn ids(&self) -> Vec<Id> {
        self.ids.iter().cloned().collect()
    }

    /// Flip one row.
    pub fn toggle(&mut self, id: Id) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Header checkbox click: clear when every visible row is selected,
    /// otherwise select exactly the visible rows.
    pub fn toggle_all(&mut self, visible: &[Id]) {
        if self.state(visible) == SelectAllState::All {
            self.ids.clear();
        } else {
            self.ids = visible.iter().cloned().collect();
        }
    }

    /// Header checkbox state against the visible rows.
    #[must_use]
    pub fn state(&self, visible: &[Id]) -> SelectAllState {
        let selected = visible.iter().filter(|id| self.ids.contains(id)).count();
        if selected == 0 {
            SelectAllState::None
        } else if selected == visible.len() {
            SelectAllState::All
        } else {
            SelectAllState::Some
        }
    }

    /// Drop ids that are not on the current page.
    pub fn retain_visible(&mut self, visible: &[Id]) {
        self.ids.retain(|id| visible.contains(id));
    }

    /// Unselect one row (after it was deleted).
    pub fn remove(&mut self, id: &Id) {
        self.ids.remove(id);
    }

    /// Unselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_takes_only_visible_rows() {
        let mut selection = Selection::new();
        selection.toggle(9_u64);
        selection.toggle_all(&[1, 2, 3]);
        assert_eq!(selection.ids(), vec![1, 2, 3]);
        assert_eq!(selection.state(&[1, 2, 3]), SelectAllState::All);

        selection.toggle_all(&[1, 2, 3]);
        assert!(selection.is_empty());
    }

    #[test]
    fn partial_selection_is_indeterminate() {
        let mut selection = Selection::new();
        selection.toggle("b".to_string());
        let visible = ["a".to_string(), "b".to_string()];
        assert_eq!(selection.state(&visible), SelectAllState::Some);

        selection.toggle_all(&visible);
        assert_eq!(selection.state(&visible), SelectAllState::All);
    }

    #[test]
    fn empty_page_reports_none() {
        let selection = Selection::<u64>::new();
        assert_eq!(selection.state(&[]), SelectAllState::None);
    }

    #[test]
    fn new_page_prunes_hidden_rows() {
        let mut selection = Selection::new();
        selection.toggle_all(&[1_u64, 2, 3]);
        selection.retain_visible(&[3, 4]);
        assert_eq!(selection.ids(), vec![3]);

        selection.remove(&3);
        assert_eq!(selection.len(), 0);
    }
}
