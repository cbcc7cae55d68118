use crate::{
    cancapp::{listing::remove_by_key, types::PendingProfile, AdminApi},
    cli::{actions::render, globals::GlobalArgs},
};
use anyhow::{Context, Result};
use tracing::warn;

#[derive(Debug)]
pub enum VerificationAction {
    List,
    Approve { id: String },
    Reject { id: String, reason: Option<String> },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub action: VerificationAction,
}

/// Current queue, used to name the profile and count what is left after a
/// decision. The decision still goes ahead when the queue cannot be read.
async fn queue(api: &AdminApi) -> Option<Vec<PendingProfile>> {
    match api.pending_profiles().await {
        Ok(profiles) => Some(profiles),
        Err(err) => {
            warn!("pending profiles unavailable: {err}");
            None
        }
    }
}

fn report(title: &str, verb: &str, id: &str, queue: Option<Vec<PendingProfile>>) {
    let Some(mut queue) = queue else {
        println!("{title}: profile {id} has been {verb}");
        return;
    };

    let name = remove_by_key(&mut queue, id)
        .map(|profile| profile.name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("profile {id}"));
    println!("{title}: {name}'s profile has been {verb}");
    println!("{} pending", queue.len());
}

/// # Errors
/// Returns an error if no session is active or the backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let console = args.globals.open()?;
    let api = console.authorized()?;

    match args.action {
        VerificationAction::List => {
            let profiles = api
                .pending_profiles()
                .await
                .context("Failed to load pending profiles")?;
            print!("{}", render::pending_profiles(&profiles));
        }
        VerificationAction::Approve { id } => {
            let pending = queue(api).await;
            api.approve_profile(&id)
                .await
                .with_context(|| format!("Failed to approve profile {id}"))?;
            report("Profile Approved", "approved", &id, pending);
        }
        VerificationAction::Reject { id, reason } => {
            let pending = queue(api).await;
            api.reject_profile(&id, reason.as_deref())
                .await
                .with_context(|| format!("Failed to reject profile {id}"))?;
            report("Profile Rejected", "rejected", &id, pending);
        }
    }

    Ok(())
}
