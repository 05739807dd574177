//! # Postify Core
//!
//! The client-side synchronization layer of Postify.
//! This crate holds the session and collection stores, the route guard and
//! the sync controller that keeps both stores consistent with the remote
//! authority. It has zero infrastructure dependencies: transports, durable
//! storage and token decoding are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod guard;
pub mod ports;
pub mod store;
pub mod sync;
mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Intent, SyncError, ValidationError};
pub use guard::{Decision, decide};
pub use store::{CollectionStore, SessionStore};
pub use sync::{PAGE_SIZE, SyncController};
