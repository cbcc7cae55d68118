pub mod backend;
pub mod content;
pub mod logging;
pub mod session;
pub mod users;
pub mod verifications;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

pub const CMD_OVERVIEW: &str = "overview";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("cancapp-admin")
        .about("CancApp administrative console")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(session::login())
        .subcommand(session::logout())
        .subcommand(session::whoami())
        .subcommand(
            Command::new(CMD_OVERVIEW)
                .about("Dashboard statistics, recent activity and user distribution"),
        )
        .subcommand(users::command())
        .subcommand(verifications::command())
        .subcommand(content::command());

    let command = backend::with_args(command);
    logging::with_args(command)
}
