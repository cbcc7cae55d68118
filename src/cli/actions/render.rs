//! Plain-text rendering for command output. Everything here returns a
//! `String` so the views stay testable without capturing stdout.

use crate::cancapp::{
    listing::initials,
    types::{DashboardStats, Identity, PendingProfile, ReportedComment, ReportedPost, TopPost, User},
};
use serde_json::Value;
use std::fmt::Write;

const EXCERPT_CHARS: usize = 48;
const EMPTY: &str = "-";

/// Display name, falling back to the account name when the profile has none.
fn display_name<'a>(name: &'a str, user_name: &'a str) -> &'a str {
    if name.trim().is_empty() {
        user_name
    } else {
        name
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY.to_string()
    } else {
        value.to_string()
    }
}

/// Single-line excerpt of free text, cut at `max` characters.
pub fn excerpt(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// Left-aligned columns separated by two spaces, with a dashed rule under the
/// header. An empty table renders as `(none)`.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "(none)\n".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = line(headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&line(rule.iter().map(String::as_str), &widths));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut out = String::new();
    for (index, (cell, &width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        let _ = write!(out, "{cell:<width$}");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

pub fn identity(identity: &Identity) -> String {
    let name = display_name(&identity.name, &identity.user_name);
    let mut out = format!("{} <{}>", or_dash(name), identity.email);
    if !identity.user_type.is_empty() {
        let _ = write!(out, " ({})", identity.user_type);
    }
    out
}

pub fn users(users: &[&User]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                user.id.clone(),
                or_dash(display_name(&user.name, &user.user_name)),
                or_dash(&user.email),
                or_dash(&user.user_type),
                user.status.clone().unwrap_or_else(|| EMPTY.to_string()),
                user.warnings.unwrap_or(0).to_string(),
                user.last_active.clone().unwrap_or_else(|| EMPTY.to_string()),
            ]
        })
        .collect();

    table(
        &["ID", "NAME", "EMAIL", "TYPE", "STATUS", "WARNINGS", "LAST ACTIVE"],
        &rows,
    )
}

pub fn user_detail(user: &User) -> String {
    let name = display_name(&user.name, &user.user_name);
    let fields = [
        ("Id", user.id.clone()),
        ("Name", or_dash(name)),
        ("Initials", or_dash(&initials(name))),
        ("Username", or_dash(&user.user_name)),
        ("Email", or_dash(&user.email)),
        ("Type", or_dash(&user.user_type)),
        ("Address", or_dash(&user.address)),
        ("Status", user.status.clone().unwrap_or_else(|| EMPTY.to_string())),
        ("Warnings", user.warnings.unwrap_or(0).to_string()),
        ("Last active", user.last_active.clone().unwrap_or_else(|| EMPTY.to_string())),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        let _ = writeln!(out, "{label:<12} {value}");
    }
    out
}

pub fn pending_profiles(profiles: &[PendingProfile]) -> String {
    let rows: Vec<Vec<String>> = profiles
        .iter()
        .map(|profile| {
            vec![
                profile.id.clone(),
                or_dash(&profile.name),
                or_dash(&profile.user_type),
                or_dash(&profile.specialty),
                or_dash(&profile.medical_license),
                or_dash(&profile.submitted_at),
            ]
        })
        .collect();

    table(
        &["ID", "NAME", "TYPE", "SPECIALTY", "LICENSE", "SUBMITTED"],
        &rows,
    )
}

pub fn reported_posts(posts: &[ReportedPost]) -> String {
    let rows: Vec<Vec<String>> = posts
        .iter()
        .map(|post| {
            vec![
                post.id.to_string(),
                or_dash(&post.user_name),
                or_dash(&post.report_reason),
                excerpt(&post.content, EXCERPT_CHARS),
                post.comments_count.to_string(),
                post.reactions_count.to_string(),
                or_dash(&post.time),
            ]
        })
        .collect();

    table(
        &["ID", "AUTHOR", "REASON", "CONTENT", "COMMENTS", "REACTIONS", "TIME"],
        &rows,
    )
}

pub fn reported_comments(comments: &[ReportedComment]) -> String {
    let rows: Vec<Vec<String>> = comments
        .iter()
        .map(|comment| {
            vec![
                comment.id.to_string(),
                comment.post_id.to_string(),
                or_dash(&comment.user_name),
                or_dash(&comment.report_reason),
                excerpt(&comment.content, EXCERPT_CHARS),
                comment.reactions_count.to_string(),
                or_dash(&comment.time),
            ]
        })
        .collect();

    table(
        &["ID", "POST", "AUTHOR", "REASON", "CONTENT", "REACTIONS", "TIME"],
        &rows,
    )
}

pub fn top_posts(posts: &[TopPost]) -> String {
    let rows: Vec<Vec<String>> = posts
        .iter()
        .map(|post| {
            vec![
                post.id.to_string(),
                or_dash(&post.user_name),
                post.engagement_score.to_string(),
                post.comments_count.to_string(),
                post.reactions_count.to_string(),
                excerpt(&post.content, EXCERPT_CHARS),
            ]
        })
        .collect();

    table(
        &["ID", "AUTHOR", "SCORE", "COMMENTS", "REACTIONS", "CONTENT"],
        &rows,
    )
}

pub fn stats(stats: &DashboardStats) -> String {
    let fields = [
        ("Total users", stats.total_users),
        ("Pending verifications", stats.pending_verifications),
        ("Reported content", stats.reported_content),
        ("Active warnings", stats.active_warnings),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        let _ = writeln!(out, "{label:<22} {value}");
    }
    out
}

/// First of `keys` present on an object, rendered without JSON quotes.
fn field(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| item.get(*key))
        .and_then(|value| match value {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
}

pub fn activity(items: &[Value]) -> String {
    if items.is_empty() {
        return "(none)\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let Some(action) = field(item, &["action", "description", "message", "title"]) else {
            let _ = writeln!(out, "- {item}");
            continue;
        };
        let details: Vec<String> = [
            field(item, &["user", "userName", "name"]),
            field(item, &["time", "timestamp", "createdAt"]),
        ]
        .into_iter()
        .flatten()
        .collect();

        if details.is_empty() {
            let _ = writeln!(out, "- {action}");
        } else {
            let _ = writeln!(out, "- {action} ({})", details.join(", "));
        }
    }
    out
}

pub fn distribution(items: &[Value]) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                field(item, &["type", "userType", "name"]).unwrap_or_else(|| item.to_string()),
                field(item, &["count", "total"]).unwrap_or_else(|| EMPTY.to_string()),
                field(item, &["percentage", "percent"])
                    .map_or_else(|| EMPTY.to_string(), |value| format!("{value}%")),
            ]
        })
        .collect();

    table(&["TYPE", "COUNT", "SHARE"], &rows)
}
