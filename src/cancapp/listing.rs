//! Local list state shared by the console views: the user search filter and
//! the optimistic removal applied after a moderation action succeeds.

use super::types::{PendingProfile, ReportedComment, ReportedPost, TopPost, User};

/// Records that views patch by id.
pub trait Keyed {
    type Key: PartialEq + ?Sized;

    fn key(&self) -> &Self::Key;
}

impl Keyed for User {
    type Key = str;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for PendingProfile {
    type Key = str;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ReportedPost {
    type Key = i64;

    fn key(&self) -> &i64 {
        &self.id
    }
}

impl Keyed for ReportedComment {
    type Key = i64;

    fn key(&self) -> &i64 {
        &self.id
    }
}

impl Keyed for TopPost {
    type Key = i64;

    fn key(&self) -> &i64 {
        &self.id
    }
}

/// Removes the first record with `key`, returning it when present.
pub fn remove_by_key<T: Keyed>(items: &mut Vec<T>, key: &T::Key) -> Option<T> {
    let index = items.iter().position(|item| item.key() == key)?;
    Some(items.remove(index))
}

/// Case-insensitive match on name or email; an empty term matches everyone.
#[must_use]
pub fn matches_search(user: &User, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || user.name.to_lowercase().contains(&term)
        || user.email.to_lowercase().contains(&term)
}

#[must_use]
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    users.iter().filter(|user| matches_search(user, term)).collect()
}

/// Initials shown in place of a missing avatar.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
