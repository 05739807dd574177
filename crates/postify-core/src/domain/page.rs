use serde::{Deserialize, Serialize};

use super::Post;

/// One page of posts as returned by the remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total_pages: u32,
}

/// Snapshot of the collection store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPage {
    pub items: Vec<Post>,
    pub total_pages: u32,
    pub current_page: u32,
}

impl Default for CollectionPage {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 1,
            current_page: 1,
        }
    }
}
