pub mod content;
pub mod overview;
pub mod session;
pub mod users;
pub mod verifications;

mod render;

// Internal "interpreter" for `Action`.
// The match lives in `run` so this module only lists what the CLI can do.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Login(session::LoginArgs),
    Logout(GlobalArgs),
    Whoami(GlobalArgs),
    Overview(GlobalArgs),
    Users(users::Args),
    Verifications(verifications::Args),
    Content(content::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
