//! Collection store - the current page of posts and pagination state.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{CollectionPage, Post};

/// Holds the last fetched page of posts.
///
/// Local mutations (`insert_front`, `replace_by_id`, `remove_by_id`) never
/// recompute `total_pages`; it stays as the last fetch reported it until the
/// next [`CollectionStore::replace_page`].
#[derive(Default)]
pub struct CollectionStore {
    state: RwLock<CollectionPage>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items with a confirmed fetch result. `current_page` is
    /// left untouched.
    ///
    /// A `total_pages` of zero (an empty collection) is stored as 1.
    pub fn replace_page(&self, items: Vec<Post>, total_pages: u32) {
        if total_pages == 0 {
            tracing::debug!("Server reported zero pages, storing 1");
        }

        let mut state = self.write();
        state.items = items;
        state.total_pages = total_pages.max(1);
    }

    /// Move the page cursor. Does not fetch.
    ///
    /// Values outside `1..=total_pages` are stored as given.
    pub fn set_current_page(&self, page: u32) {
        let mut state = self.write();
        if page == 0 || page > state.total_pages {
            tracing::debug!(
                page,
                total_pages = state.total_pages,
                "Current page set outside known range"
            );
        }
        state.current_page = page;
    }

    /// Prepend a newly created post.
    ///
    /// A post whose id is already present is moved to the front instead of
    /// being duplicated.
    pub fn insert_front(&self, post: Post) {
        let mut state = self.write();
        state.items.retain(|existing| existing.id != post.id);
        state.items.insert(0, post);
    }

    /// Replace the post with the same id in place.
    pub fn replace_by_id(&self, post: Post) {
        let mut state = self.write();
        match state.items.iter_mut().find(|existing| existing.id == post.id) {
            Some(slot) => *slot = post,
            None => tracing::warn!(id = %post.id, "Updated post is not on the current page"),
        }
    }

    /// Remove the post with `id`, if present.
    pub fn remove_by_id(&self, id: &str) {
        let mut state = self.write();
        if let Some(index) = state.items.iter().position(|existing| existing.id == id) {
            state.items.remove(index);
        }
    }

    /// Drop everything and go back to an empty first page.
    pub fn reset(&self) {
        *self.write() = CollectionPage::default();
    }

    pub fn snapshot(&self) -> CollectionPage {
        self.read().clone()
    }

    pub fn items(&self) -> Vec<Post> {
        self.read().items.clone()
    }

    pub fn current_page(&self) -> u32 {
        self.read().current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.read().total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.read().current_page > 1
    }

    pub fn has_next(&self) -> bool {
        let state = self.read();
        state.current_page < state.total_pages
    }

    fn read(&self) -> RwLockReadGuard<'_, CollectionPage> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CollectionPage> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn post(id: &str) -> Post {
        Post::new(id, format!("Title {id}"), "C", "u1")
    }

    fn ids(store: &CollectionStore) -> Vec<String> {
        store.items().into_iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_starts_on_empty_first_page() {
        let store = CollectionStore::new();
        assert_eq!(store.snapshot(), CollectionPage::default());
        assert!(!store.has_previous());
        assert!(!store.has_next());
    }

    #[test]
    fn test_replace_page_keeps_current_page() {
        let store = CollectionStore::new();
        store.set_current_page(2);

        store.replace_page(vec![post("a"), post("b")], 4);

        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.total_pages(), 4);
        assert_eq!(store.current_page(), 2);
    }

    #[test]
    fn test_replace_page_stores_at_least_one_page() {
        let store = CollectionStore::new();
        store.replace_page(Vec::new(), 0);
        assert_eq!(store.total_pages(), 1);
    }

    #[test]
    fn test_set_current_page_leaves_items_unchanged() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a"), post("b")], 3);
        let before = store.items();

        for k in 1..=3 {
            store.set_current_page(k);
            assert_eq!(store.items(), before);
            assert_eq!(store.current_page(), k);
        }
    }

    #[test]
    fn test_set_current_page_passes_out_of_range_through() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a")], 2);

        store.set_current_page(7);

        assert_eq!(store.current_page(), 7);
        assert_eq!(store.total_pages(), 2);
    }

    #[test]
    fn test_insert_front_after_fetch_keeps_total_pages() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a")], 3);
        store.set_current_page(1);

        store.insert_front(post("b"));

        let snapshot = store.snapshot();
        assert_eq!(ids(&store), vec!["b", "a"]);
        assert_eq!(snapshot.total_pages, 3);
        assert_eq!(snapshot.current_page, 1);
    }

    #[test]
    fn test_insert_front_moves_existing_id() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a"), post("b")], 1);

        store.insert_front(Post::new("b", "New", "C", "u1"));

        assert_eq!(ids(&store), vec!["b", "a"]);
        assert_eq!(store.items()[0].title, "New");
    }

    #[test]
    fn test_replace_by_id_preserves_position() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a"), post("b"), post("c")], 1);

        store.replace_by_id(Post::new("b", "Edited", "C2", "u1"));

        let items = store.items();
        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        assert_eq!(items[1].title, "Edited");
        assert_eq!(items[1].content, "C2");
    }

    #[test]
    fn test_replace_by_id_without_match_is_noop() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a")], 1);
        let before = store.snapshot();

        store.replace_by_id(post("zzz"));

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_remove_by_id() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a"), post("b")], 2);

        store.remove_by_id("a");

        assert_eq!(ids(&store), vec!["b"]);
        assert_eq!(store.total_pages(), 2);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("b")], 1);
        let before = store.snapshot();

        store.remove_by_id("a");

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_mutation_sequences_never_duplicate_ids() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a"), post("b")], 2);

        let ops: [(&str, &str); 9] = [
            ("insert", "c"),
            ("insert", "a"),
            ("replace", "b"),
            ("insert", "c"),
            ("remove", "a"),
            ("insert", "a"),
            ("replace", "x"),
            ("remove", "zz"),
            ("insert", "b"),
        ];

        for (op, id) in ops {
            match op {
                "insert" => store.insert_front(post(id)),
                "replace" => store.replace_by_id(post(id)),
                _ => store.remove_by_id(id),
            }

            let ids = ids(&store);
            let unique: HashSet<_> = ids.iter().collect();
            assert_eq!(unique.len(), ids.len(), "duplicate ids after {op} {id}: {ids:?}");
        }

        assert_eq!(ids(&store), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_pagination_affordances() {
        let store = CollectionStore::new();
        store.replace_page(Vec::new(), 3);

        store.set_current_page(1);
        assert!(!store.has_previous());
        assert!(store.has_next());

        store.set_current_page(2);
        assert!(store.has_previous());
        assert!(store.has_next());

        store.set_current_page(3);
        assert!(store.has_previous());
        assert!(!store.has_next());
    }

    #[test]
    fn test_reset() {
        let store = CollectionStore::new();
        store.replace_page(vec![post("a")], 5);
        store.set_current_page(4);

        store.reset();

        assert_eq!(store.snapshot(), CollectionPage::default());
    }
}
