//! Selection state machine
//!
//! ```text
//!            toggle (set becomes non-empty)
//!   Single ─────────────────────────────────▶ Multi
//!     ▲  ◀─────────────────────────────────    │
//!     │     toggle (set becomes empty)         │
//!     └──────────── set_active ────────────────┘
//! ```
//!
//! Multi keeps the active index: checking boxes never changes which record is
//! shown.

use std::collections::BTreeSet;

/// Which records are selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    /// Browsing: one record is shown and is the action target
    Single { active: usize },
    /// Batch selection: `checked` is never empty
    Multi {
        active: usize,
        checked: BTreeSet<usize>,
    },
}

impl SelectionState {
    pub fn single(active: usize) -> Self {
        SelectionState::Single { active }
    }

    /// Index of the record shown in the detail panel
    pub fn active(&self) -> usize {
        match self {
            SelectionState::Single { active } | SelectionState::Multi { active, .. } => *active,
        }
    }

    /// The checked set, present only in Multi mode
    pub fn checked(&self) -> Option<&BTreeSet<usize>> {
        match self {
            SelectionState::Single { .. } => None,
            SelectionState::Multi { checked, .. } => Some(checked),
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked().is_some_and(|c| c.contains(&index))
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, SelectionState::Multi { .. })
    }

    /// Flip membership of `index`, switching mode when the set fills or empties
    pub(crate) fn toggled(&self, index: usize) -> Self {
        let active = self.active();
        let mut checked = self.checked().cloned().unwrap_or_default();
        if !checked.remove(&index) {
            checked.insert(index);
        }
        if checked.is_empty() {
            SelectionState::Single { active }
        } else {
            SelectionState::Multi { active, checked }
        }
    }

    /// Re-index after the records at `removed` are gone.
    ///
    /// A surviving active record keeps focus at its new position. A removed
    /// active record hands focus to the nearest surviving record before it,
    /// or to the first record when none precedes it.
    pub(crate) fn after_removal(&self, removed: &BTreeSet<usize>) -> Self {
        let shift = |index: usize| index - removed.range(..index).count();

        let old_active = self.active();
        let active = if removed.contains(&old_active) {
            shift(old_active).saturating_sub(1)
        } else {
            shift(old_active)
        };

        let checked: BTreeSet<usize> = self
            .checked()
            .map(|c| {
                c.iter()
                    .filter(|i| !removed.contains(i))
                    .map(|&i| shift(i))
                    .collect()
            })
            .unwrap_or_default();

        if checked.is_empty() {
            SelectionState::Single { active }
        } else {
            SelectionState::Multi { active, checked }
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState::Single { active: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_enters_and_leaves_multi() {
        let state = SelectionState::single(2);
        let multi = state.toggled(4);
        assert!(multi.is_multi());
        assert_eq!(multi.active(), 2);
        assert!(multi.is_checked(4));

        let back = multi.toggled(4);
        assert_eq!(back, SelectionState::single(2));
    }

    #[test]
    fn test_removed_active_moves_to_previous() {
        let state = SelectionState::single(3);
        let removed = BTreeSet::from([3]);
        assert_eq!(state.after_removal(&removed).active(), 2);
    }

    #[test]
    fn test_removed_first_stays_first() {
        let state = SelectionState::single(0);
        let removed = BTreeSet::from([0]);
        assert_eq!(state.after_removal(&removed).active(), 0);
    }

    #[test]
    fn test_surviving_active_follows_record() {
        let state = SelectionState::single(4);
        let removed = BTreeSet::from([0, 2]);
        assert_eq!(state.after_removal(&removed).active(), 2);
    }

    #[test]
    fn test_checked_survivors_are_renumbered() {
        let state = SelectionState::single(0).toggled(1).toggled(3);
        let next = state.after_removal(&BTreeSet::from([1]));
        assert_eq!(next.checked(), Some(&BTreeSet::from([2])));
    }

    #[test]
    fn test_removing_all_checked_returns_to_single() {
        let state = SelectionState::single(0).toggled(1).toggled(2);
        let next = state.after_removal(&BTreeSet::from([1, 2]));
        assert_eq!(next, SelectionState::single(0));
    }
}
