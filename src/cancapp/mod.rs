//! Client core of the admin console.
//!
//! - `session`: the signed-in administrator, persisted through `storage`.
//! - `gateway`: the only place that talks HTTP; decodes replies via `envelope`.
//! - `client`: typed admin endpoints on top of the gateway.
//! - `listing`: search and list patching used by the views.
//!
//! Token material flows from `session` into `storage` and from `storage` into
//! `gateway` headers. None of these modules log tokens or passwords.

pub mod client;
pub mod config;
pub mod console;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod session;
pub mod storage;
pub mod types;

pub use client::AdminApi;
pub use config::ConsoleConfig;
pub use console::Console;
pub use envelope::{Reply, Shape};
pub use error::Error;
pub use gateway::{CallOptions, Gateway};
pub use session::{Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
