use crate::{
    cancapp::{listing::remove_by_key, types::ContentKind},
    cli::{actions::render, globals::GlobalArgs},
};
use anyhow::{Context, Result};
use tracing::warn;

#[derive(Debug)]
pub enum ContentAction {
    ReportedPosts,
    ReportedComments,
    TopPosts,
    RemovePost { id: i64 },
    RemoveComment { id: i64 },
    Warn {
        user_id: String,
        kind: ContentKind,
        content_id: i64,
    },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub action: ContentAction,
}

/// # Errors
/// Returns an error if no session is active or the backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let console = args.globals.open()?;
    let api = console.authorized()?;

    match args.action {
        ContentAction::ReportedPosts => {
            let posts = api
                .reported_posts()
                .await
                .context("Failed to load reported posts")?;
            print!("{}", render::reported_posts(&posts));
        }
        ContentAction::ReportedComments => {
            let comments = api
                .reported_comments()
                .await
                .context("Failed to load reported comments")?;
            print!("{}", render::reported_comments(&comments));
        }
        ContentAction::TopPosts => {
            let posts = api.top_posts().await.context("Failed to load top posts")?;
            print!("{}", render::top_posts(&posts));
        }
        ContentAction::RemovePost { id } => {
            let reported = api.reported_posts().await;
            api.remove_post(id)
                .await
                .with_context(|| format!("Failed to remove post {id}"))?;
            println!("Action Completed: remove applied to post {id}");
            match reported {
                Ok(mut posts) => {
                    remove_by_key(&mut posts, &id);
                    println!("{} reported posts remaining", posts.len());
                }
                Err(err) => warn!("reported posts unavailable: {err}"),
            }
        }
        ContentAction::RemoveComment { id } => {
            let reported = api.reported_comments().await;
            api.remove_comment(id)
                .await
                .with_context(|| format!("Failed to remove comment {id}"))?;
            println!("Action Completed: remove applied to comment {id}");
            match reported {
                Ok(mut comments) => {
                    remove_by_key(&mut comments, &id);
                    println!("{} reported comments remaining", comments.len());
                }
                Err(err) => warn!("reported comments unavailable: {err}"),
            }
        }
        ContentAction::Warn {
            user_id,
            kind,
            content_id,
        } => {
            api.warn_user_for_content(&user_id, kind, content_id)
                .await
                .with_context(|| format!("Failed to warn user {user_id}"))?;
            println!("Action Completed: warning applied to {kind} {content_id} by user {user_id}");
        }
    }

    Ok(())
}
