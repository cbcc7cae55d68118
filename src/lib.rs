//! # CancApp Admin Console
//!
//! `cancapp-admin` is the administrative console for the CancApp community
//! platform: user account management, professional-profile verification,
//! content moderation and summary statistics, all served by the CancApp REST
//! backend.
//!
//! ## Session
//!
//! An administrator signs in once with email and password. The returned bearer
//! token, refresh token, expiry and identity are written to a session file and
//! restored on the next run; `logout` removes them locally without contacting
//! the backend.
//!
//! ## Response Shapes
//!
//! Some backend endpoints wrap their payload in an `{isSuccess, value, errors}`
//! envelope and others return it directly. Every reply is decoded envelope
//! first with a single fallback to the raw shape, and an empty body decodes to
//! an explicit no-content reply.

pub mod cancapp;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
