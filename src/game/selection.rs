//! Selection policy for the in-progress round
//!
//! The very first blend combines two objects to get the jar going; every
//! later blend adds one object to the existing mix. Toggle is the only
//! mutation entry point.

use crate::types::GameObject;

/// Objects that must be chosen for the round at the given blend count
pub fn required_selection(blend_count: u32) -> usize {
    if blend_count == 0 { 2 } else { 1 }
}

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// Selection already held the required count; nothing happened
    Saturated,
}

/// The transient set of chosen objects for the current round.
/// Insertion order is preserved for display.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    objects: Vec<GameObject>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an object in or out of the selection. Adding past the
    /// required count is a no-op.
    pub fn toggle(&mut self, object: &GameObject, required: usize) -> SelectionChange {
        if let Some(pos) = self.objects.iter().position(|o| o.id == object.id) {
            self.objects.remove(pos);
            return SelectionChange::Removed;
        }
        if self.objects.len() < required {
            self.objects.push(object.clone());
            return SelectionChange::Added;
        }
        SelectionChange::Saturated
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Ready to blend once exactly the required count is selected
    pub fn is_complete(&self, required: usize) -> bool {
        self.objects.len() == required
    }

    pub fn ids(&self) -> Vec<u32> {
        self.objects.iter().map(|o| o.id).collect()
    }

    /// Hex colors of the selected objects, for blend feedback
    pub fn colors(&self) -> Vec<&str> {
        self.objects
            .iter()
            .filter_map(|o| o.color.as_deref())
            .collect()
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn object(id: u32) -> GameObject {
        GameObject {
            id,
            name: format!("object-{id}"),
            category: "test".to_string(),
            unlock_threshold: 0,
            sprite_path: String::new(),
            scores: BTreeMap::new(),
            description: None,
            rarity: String::new(),
            color: Some("#336699".to_string()),
            icon: None,
        }
    }

    #[test]
    fn test_required_selection_counts() {
        assert_eq!(required_selection(0), 2);
        assert_eq!(required_selection(1), 1);
        assert_eq!(required_selection(100), 1);
    }

    #[test]
    fn test_toggle_saturates_at_required_count() {
        let mut selection = Selection::new();
        assert_eq!(selection.toggle(&object(1), 2), SelectionChange::Added);
        assert_eq!(selection.toggle(&object(2), 2), SelectionChange::Added);
        // Third distinct object is a no-op
        assert_eq!(selection.toggle(&object(3), 2), SelectionChange::Saturated);
        assert_eq!(selection.len(), 2);
        assert!(selection.is_complete(2));
    }

    #[test]
    fn test_toggle_removes_when_selected_even_if_full() {
        let mut selection = Selection::new();
        selection.toggle(&object(1), 2);
        selection.toggle(&object(2), 2);
        assert_eq!(selection.toggle(&object(1), 2), SelectionChange::Removed);
        assert_eq!(selection.ids(), vec![2]);
        assert!(!selection.is_complete(2));
    }

    #[test]
    fn test_colors_skips_colorless_objects() {
        let mut selection = Selection::new();
        let mut gray = object(1);
        gray.color = None;
        selection.toggle(&gray, 2);
        selection.toggle(&object(2), 2);
        assert_eq!(selection.colors(), vec!["#336699"]);
    }
}
