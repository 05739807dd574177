//! # Postify Shared
//!
//! Wire types exchanged with the Postify REST backend.
//! Kept free of client logic so any front-end can decode the same payloads.

pub mod dto;
pub mod response;

pub use response::ErrorBody;
