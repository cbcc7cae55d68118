use crate::{
    cancapp::{listing::filter_users, types::UserStatus},
    cli::{actions::render, globals::GlobalArgs},
};
use anyhow::{Context, Result};

#[derive(Debug)]
pub enum UserAction {
    List { search: Option<String> },
    Show { id: String },
    Status { id: String, status: UserStatus },
    Warn { id: String, reason: String },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub action: UserAction,
}

/// # Errors
/// Returns an error if no session is active or the backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let console = args.globals.open()?;
    let api = console.authorized()?;

    match args.action {
        UserAction::List { search } => {
            let users = api.users().await.context("Failed to load users")?;
            let shown = filter_users(&users, search.as_deref().unwrap_or_default());
            print!("{}", render::users(&shown));
            println!("{} of {} users", shown.len(), users.len());
        }
        UserAction::Show { id } => {
            let user = api
                .user(&id)
                .await
                .with_context(|| format!("Failed to load user {id}"))?;
            print!("{}", render::user_detail(&user));
        }
        UserAction::Status { id, status } => {
            api.update_user_status(&id, status)
                .await
                .with_context(|| format!("Failed to set user {id} {status}"))?;
            println!("Action Completed: status {status} applied to user {id}");
        }
        UserAction::Warn { id, reason } => {
            api.add_user_warning(&id, &reason)
                .await
                .with_context(|| format!("Failed to warn user {id}"))?;
            println!("Action Completed: warning applied to user {id}");
        }
    }

    Ok(())
}
