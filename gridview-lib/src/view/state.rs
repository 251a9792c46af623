//! Expansion and selection state, keyed by row identity.

use std::collections::HashSet;

use crate::model::Row;
use crate::model::Value;

/// The stable identity of a row across data reloads.
///
/// Keys are the canonical display form of a caller-designated identity
/// field, never an array index or object reference: the authoritative row
/// array is replaced wholesale on every reload, and positional keys would
/// silently desynchronize expansion and selection from the logical rows.
///
/// Identity values are expected to be unique. Colliding identities alias
/// their expansion/selection state across rows; this is a documented
/// limitation of the calling screens, not a failure here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(String);

impl RowKey {
    /// Resolves the identity of a row from its designated identity field.
    ///
    /// Rows missing the field (or carrying null) have no identity and
    /// cannot be tracked; they simply never report expanded or selected.
    pub fn of(row: &Row, id_field: &str) -> Option<Self> {
        match row.get_path(id_field) {
            Some(value) if !value.is_null() => Some(Self(value.display_string())),
            _ => None,
        }
    }
}

impl From<&Value> for RowKey {
    fn from(value: &Value) -> Self {
        Self(value.display_string())
    }
}

/// The set of expanded parent rows of a master-detail view.
///
/// Independent of sorting, filtering and pagination. Cleared only by an
/// explicit collapse-all or when an identity disappears from the data set
/// entirely (pruned on wholesale replacement).
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<RowKey>,
}

impl ExpansionState {
    /// Flips the expansion of one row.
    pub fn toggle(&mut self, key: RowKey) {
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    /// Expands every identity in the currently visible (filtered) set.
    ///
    /// Rows hidden by an active filter are not force-expanded and their
    /// prior state is preserved, so clearing the filter restores the
    /// previously expanded set.
    pub fn expand_all(&mut self, visible: impl IntoIterator<Item = RowKey>) {
        self.expanded.extend(visible);
    }

    /// Collapses everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Returns `true` if the row is expanded.
    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains(key)
    }

    /// Number of expanded rows.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Drops identities no longer present in the data set.
    pub fn retain_known(&mut self, known: &HashSet<RowKey>) {
        self.expanded.retain(|key| known.contains(key));
    }
}

/// The set of selected rows for bulk actions.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: HashSet<RowKey>,
}

impl SelectionState {
    /// Flips the selection of one row. Returns the new state.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    /// Sets the selection of one row explicitly.
    pub fn set(&mut self, key: RowKey, selected: bool) {
        if selected {
            self.selected.insert(key);
        } else {
            self.selected.remove(&key);
        }
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// Returns the selected identities.
    pub fn selected(&self) -> &HashSet<RowKey> {
        &self.selected
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drops identities no longer present in the data set.
    pub fn retain_known(&mut self, known: &HashSet<RowKey>) {
        self.selected.retain(|key| known.contains(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: i32) -> RowKey {
        RowKey::from(&Value::Int(id))
    }

    #[test]
    fn test_row_key_of() {
        let row = Row::new().set("id", 7);
        assert_eq!(RowKey::of(&row, "id"), Some(key(7)));
        assert_eq!(RowKey::of(&row, "missing"), None);
        assert_eq!(RowKey::of(&Row::new().set("id", Value::Null), "id"), None);
    }

    #[test]
    fn test_row_key_aliases_across_value_forms() {
        // Identity is the canonical display form: Int 7 and Long 7 collide.
        assert_eq!(RowKey::from(&Value::Int(7)), RowKey::from(&Value::Long(7)));
    }

    #[test]
    fn test_toggle_expand_collapse() {
        let mut state = ExpansionState::default();
        state.toggle(key(1));
        assert!(state.is_expanded(&key(1)));
        state.toggle(key(1));
        assert!(!state.is_expanded(&key(1)));
    }

    #[test]
    fn test_expand_all_preserves_hidden_state() {
        let mut state = ExpansionState::default();
        state.toggle(key(1)); // expanded, then hidden by a filter

        // Only rows 2 and 3 are visible; expand-all touches just those.
        state.expand_all([key(2), key(3)]);

        assert!(state.is_expanded(&key(1)));
        assert!(state.is_expanded(&key(2)));
        assert!(state.is_expanded(&key(3)));
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_retain_known_prunes_departed_rows() {
        let mut state = ExpansionState::default();
        state.toggle(key(1));
        state.toggle(key(2));

        let known: HashSet<RowKey> = [key(2)].into_iter().collect();
        state.retain_known(&known);

        assert!(!state.is_expanded(&key(1)));
        assert!(state.is_expanded(&key(2)));
    }

    #[test]
    fn test_selection_toggle_and_set() {
        let mut state = SelectionState::default();
        assert!(state.toggle(key(1)));
        assert!(!state.toggle(key(1)));
        state.set(key(2), true);
        state.set(key(2), true); // idempotent
        assert_eq!(state.len(), 1);
        state.clear();
        assert!(state.is_empty());
    }
}
