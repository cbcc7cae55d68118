use crate::cli::{actions::render, globals::GlobalArgs};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::info;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

/// Signs in and persists the session for later commands.
///
/// # Errors
/// Returns an error if the credentials are rejected or the session cannot be
/// stored.
pub async fn login(args: LoginArgs) -> Result<()> {
    let console = args.globals.open()?;
    let session = console
        .try_login(&args.email, &args.password)
        .await
        .context("Login failed")?;

    info!(path = %args.globals.config.session_file.display(), "session stored");
    println!("Signed in as {}", render::identity(session.identity()));
    if let Some(expires_at) = session.expires_at() {
        println!("Session expires at {expires_at}");
    }
    Ok(())
}

/// Forgets the local session. The backend is not contacted.
///
/// # Errors
/// Returns an error if the console cannot be opened.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let console = globals.open()?;
    let was_signed_in = console.session().is_authenticated();
    console.logout();
    if was_signed_in {
        println!("Signed out");
    } else {
        println!("No active session");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the console cannot be opened.
pub fn whoami(globals: &GlobalArgs) -> Result<()> {
    let console = globals.open()?;
    match console.session().snapshot() {
        Some(session) => {
            println!("{}", render::identity(session.identity()));
            if let Some(expires_at) = session.expires_at() {
                println!("Session expires at {expires_at}");
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}
