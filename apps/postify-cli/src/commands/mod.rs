//! Command definitions and dispatch.
//!
//! Each command stands for a view. Before it runs, the session is restored
//! from the credentials file and the navigation goes through the route
//! guard, exactly like a page load in a browser.

mod auth;
mod posts;

use anyhow::bail;
use clap::{Parser, Subcommand};

use postify_core::guard::{HOME_PATH, LOGIN_PATH, SIGNUP_PATH};
use postify_core::{Decision, decide};

use crate::state::AppState;

/// Postify terminal client.
#[derive(Debug, Parser)]
#[command(name = "postify", version, about)]
pub struct Cli {
    /// API root, overrides POSTIFY_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "POSTIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and store the issued tokens.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "POSTIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget stored tokens.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Trade the refresh token for a new access token.
    Refresh,
    /// Browse and manage posts.
    Posts {
        #[command(subcommand)]
        action: PostsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// Show one page of posts.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Publish a new post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Page shown after the change.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Edit one of your posts.
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Delete one of your posts.
    Delete {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

impl Command {
    /// The view this command navigates to.
    pub fn path(&self) -> &'static str {
        match self {
            Command::Signup { .. } => SIGNUP_PATH,
            Command::Login { .. } => LOGIN_PATH,
            Command::Logout | Command::Whoami | Command::Refresh | Command::Posts { .. } => {
                HOME_PATH
            }
        }
    }
}

/// Restore the session, pass the guard, then run `command`.
pub async fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    state.session.initialize().await;

    if let Decision::Redirect { to, preserve } = decide(&state.session.snapshot(), command.path())
    {
        tracing::debug!(to, from = %preserve, "Navigation redirected");
        bail!("Not signed in. Run `postify login` first ({preserve} requires a session, sent to {to})");
    }

    match command {
        Command::Signup {
            username,
            email,
            password,
        } => auth::signup(state, username, email, password).await,
        Command::Login { email, password } => auth::login(state, email, password).await,
        Command::Logout => auth::logout(state).await,
        Command::Whoami => auth::whoami(state),
        Command::Refresh => auth::refresh(state).await,
        Command::Posts { action } => match action {
            PostsCommand::List { page } => posts::list(state, page).await,
            PostsCommand::Create {
                title,
                content,
                page,
            } => posts::create(state, page, title, content).await,
            PostsCommand::Update {
                id,
                title,
                content,
                page,
            } => posts::update(state, page, &id, title, content).await,
            PostsCommand::Delete { id, page } => posts::delete(state, page, &id).await,
        },
    }
}
