use crate::cli::{actions::render, globals::GlobalArgs};
use anyhow::{bail, Result};
use std::fmt::Display;
use tracing::warn;

/// Prints one overview section, or a notification when it failed to load.
/// Returns whether the section rendered.
fn section<T, E: Display>(
    title: &str,
    result: Result<T, E>,
    view: impl FnOnce(&T) -> String,
) -> bool {
    println!("== {title} ==");
    let rendered = match result {
        Ok(value) => {
            print!("{}", view(&value));
            true
        }
        Err(err) => {
            warn!(section = title, "overview section failed: {err}");
            println!("! {title} unavailable: {err}");
            false
        }
    };
    println!();
    rendered
}

/// Fetches the three overview sections concurrently and renders each one on
/// its own; a failing section does not hide the others.
///
/// # Errors
/// Returns an error if no session is active or every section failed.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let console = globals.open()?;
    let api = console.authorized()?;

    let (stats, activity, distribution) = tokio::join!(
        api.dashboard_stats(),
        api.recent_activity(),
        api.user_distribution()
    );

    let rendered = [
        section("Statistics", stats, render::stats),
        section("Recent activity", activity, |items| render::activity(items)),
        section("User distribution", distribution, |items| {
            render::distribution(items)
        }),
    ];

    if rendered.iter().any(|ok| *ok) {
        Ok(())
    } else {
        bail!("Overview unavailable")
    }
}
