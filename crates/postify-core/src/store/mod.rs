//! In-memory state shared between views and the sync controller.
//!
//! Both stores are meant to be held in an `Arc` and passed to whatever needs
//! them. Every mutation takes the write lock for its whole duration, so
//! readers never observe a half-applied change.

mod collection;
mod session;

pub use collection::CollectionStore;
pub use session::SessionStore;
