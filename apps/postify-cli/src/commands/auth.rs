//! Account commands.

use postify_core::domain::{Credentials, NewAccount};

use crate::state::AppState;

/// `postify signup`
pub async fn signup(
    state: &AppState,
    username: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    state
        .controller
        .signup(NewAccount::new(username, email, password))
        .await?;

    println!("Account created. Run `postify login` to sign in.");
    Ok(())
}

/// `postify login`
pub async fn login(state: &AppState, email: String, password: String) -> anyhow::Result<()> {
    let user_id = state
        .controller
        .login(Credentials::new(email, password))
        .await?;

    println!("Signed in as {user_id}.");
    Ok(())
}

/// `postify logout`
pub async fn logout(state: &AppState) -> anyhow::Result<()> {
    state.controller.logout().await?;

    println!("Signed out.");
    Ok(())
}

/// `postify refresh`
pub async fn refresh(state: &AppState) -> anyhow::Result<()> {
    state.controller.refresh().await?;

    println!("Access token renewed.");
    Ok(())
}

/// `postify whoami`
pub fn whoami(state: &AppState) -> anyhow::Result<()> {
    match state.session.user_id() {
        Some(user_id) => println!("Signed in as {user_id}."),
        // Identity is only known in the process that performed the login.
        None => println!("Signed in. Your user id is shown again after the next login."),
    }
    Ok(())
}
