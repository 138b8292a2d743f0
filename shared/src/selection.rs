use crate::shape::ShapeId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    ids: Vec<ShapeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        self.ids.clear();
        for id in ids {
            self.insert(id);
        }
    }

    pub fn insert(&mut self, id: ShapeId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: ShapeId) -> bool {
        match self.ids.iter().position(|item| *item == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn click(&mut self, id: ShapeId, modifier: bool) {
        let selected = self.contains(id);
        match (modifier, selected) {
            (false, false) => self.replace([id]),
            (false, true) => {}
            (true, true) => {
                self.remove(id);
            }
            (true, false) => self.insert(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ShapeId = ShapeId(1);
    const B: ShapeId = ShapeId(2);
    const C: ShapeId = ShapeId(3);

    #[test]
    fn plain_click_selects_only_that_shape() {
        let mut selection = SelectionSet::new();
        selection.replace([A, B]);
        selection.click(C, false);
        assert_eq!(selection.ids(), &[C]);
    }

    #[test]
    fn modified_click_on_selected_shape_removes_it() {
        let mut selection = SelectionSet::new();
        selection.click(A, false);
        selection.click(A, true);
        assert!(selection.is_empty());
    }

    #[test]
    fn modified_clicks_toggle_membership() {
        let mut selection = SelectionSet::new();
        selection.click(A, false);
        selection.click(B, true);
        assert_eq!(selection.ids(), &[A, B]);
        selection.click(A, true);
        assert_eq!(selection.ids(), &[B]);
    }

    #[test]
    fn plain_click_on_member_keeps_group() {
        let mut selection = SelectionSet::new();
        selection.replace([A, B]);
        selection.click(B, false);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn replace_drops_duplicates() {
        let mut selection = SelectionSet::new();
        selection.replace([A, A, C]);
        assert_eq!(selection.ids(), &[A, C]);
        assert!(!selection.remove(B));
    }
}
