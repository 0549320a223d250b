/// Record ids marked for the next bulk action, in the order they were picked.
///
/// Membership is not checked against the collection here; the controller
/// only ever inserts live ids and prunes on deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn select_all<I, S>(&mut self, universe: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.clear();
        for id in universe {
            let id = id.into();
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle("a"));
        assert!(sel.toggle("b"));
        assert!(sel.contains("a"));
        assert!(!sel.toggle("a"));
        assert!(!sel.contains("a"));
        assert_eq!(sel.ids(), ["b".to_string()]);
    }

    #[test]
    fn select_all_replaces_and_dedups() {
        let mut sel = SelectionSet::new();
        sel.toggle("z");
        sel.select_all(["a", "b", "a"]);
        assert_eq!(sel.size(), 2);
        assert!(!sel.contains("z"));
    }

    #[test]
    fn retain_prunes() {
        let mut sel = SelectionSet::new();
        sel.select_all(["a", "b", "c"]);
        sel.retain(|id| id != "b");
        assert_eq!(sel.ids(), ["a".to_string(), "c".to_string()]);
        sel.clear();
        assert!(sel.is_empty());
    }
}
