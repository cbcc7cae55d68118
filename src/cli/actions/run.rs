use crate::cli::actions::{content, overview, session, users, verifications, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => session::login(args).await,
        Action::Logout(globals) => session::logout(&globals),
        Action::Whoami(globals) => session::whoami(&globals),
        Action::Overview(globals) => overview::execute(&globals).await,
        Action::Users(args) => users::execute(args).await,
        Action::Verifications(args) => verifications::execute(args).await,
        Action::Content(args) => content::execute(args).await,
    }
}
