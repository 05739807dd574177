//! Post commands - the dashboard view.
//!
//! Mutations first load the page being looked at, then apply the change and
//! print the resulting page, the way the dashboard shows it.

use std::fmt::Write;

use postify_core::domain::PostDraft;
use postify_core::{CollectionStore, SessionStore};

use crate::state::AppState;

/// `postify posts list`
pub async fn list(state: &AppState, page: u32) -> anyhow::Result<()> {
    state.controller.load_page(page).await?;

    print!("{}", render_page(&state.collection, &state.session));
    Ok(())
}

/// `postify posts create`
pub async fn create(
    state: &AppState,
    page: u32,
    title: String,
    content: String,
) -> anyhow::Result<()> {
    state.controller.load_page(page).await?;
    let post = state
        .controller
        .create_post(PostDraft::new(title, content))
        .await?;

    println!("Created post {}.", post.id);
    print!("{}", render_page(&state.collection, &state.session));
    Ok(())
}

/// `postify posts update`
pub async fn update(
    state: &AppState,
    page: u32,
    id: &str,
    title: String,
    content: String,
) -> anyhow::Result<()> {
    state.controller.load_page(page).await?;
    state
        .controller
        .update_post(id, PostDraft::new(title, content))
        .await?;

    println!("Updated post {id}.");
    print!("{}", render_page(&state.collection, &state.session));
    Ok(())
}

/// `postify posts delete`
pub async fn delete(state: &AppState, page: u32, id: &str) -> anyhow::Result<()> {
    state.controller.load_page(page).await?;
    state.controller.delete_post(id).await?;

    println!("Deleted post {id}.");
    print!("{}", render_page(&state.collection, &state.session));
    Ok(())
}

/// Render the current page with ownership marks and paging hints.
pub fn render_page(collection: &CollectionStore, session: &SessionStore) -> String {
    let page = collection.snapshot();
    let mut out = String::new();

    let _ = writeln!(out, "Page {} of {}", page.current_page, page.total_pages);
    if page.items.is_empty() {
        let _ = writeln!(out, "  No posts yet.");
    }

    for post in &page.items {
        let mark = if session.owns(post) { "  (yours)" } else { "" };
        let _ = writeln!(out, "  [{}] {}{}", post.id, post.title, mark);
        for line in post.content.lines() {
            let _ = writeln!(out, "      {line}");
        }
    }

    if collection.has_previous() {
        let _ = writeln!(
            out,
            "Previous: postify posts list --page {}",
            page.current_page - 1
        );
    }
    if collection.has_next() {
        let _ = writeln!(
            out,
            "Next: postify posts list --page {}",
            page.current_page + 1
        );
    }

    out
}
