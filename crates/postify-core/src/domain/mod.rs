//! Domain entities - the objects the client keeps in sync with the server.

mod account;
mod page;
mod post;
mod session;

pub use account::{Credentials, IssuedTokens, NewAccount};
pub use page::{CollectionPage, PostsPage};
pub use post::{Post, PostDraft};
pub use session::Session;
