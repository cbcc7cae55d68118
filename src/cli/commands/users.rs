use clap::{Arg, Command};

pub const CMD_USERS: &str = "users";
pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_STATUS: &str = "status";
pub const CMD_WARN: &str = "warn";

pub const ARG_SEARCH: &str = "search";
pub const ARG_ID: &str = "id";
pub const ARG_STATUS: &str = "status";
pub const ARG_REASON: &str = "reason";

fn user_id() -> Arg {
    Arg::new(ARG_ID).help("User id").required(true)
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_USERS)
        .about("Manage user accounts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_LIST).about("List users").arg(
                Arg::new(ARG_SEARCH)
                    .short('s')
                    .long(ARG_SEARCH)
                    .help("Only users whose name or email contains this text"),
            ),
        )
        .subcommand(
            Command::new(CMD_SHOW)
                .about("Show one user")
                .arg(user_id()),
        )
        .subcommand(
            Command::new(CMD_STATUS)
                .about("Activate or disable a user account")
                .arg(user_id())
                .arg(
                    Arg::new(ARG_STATUS)
                        .help("New account status")
                        .required(true)
                        .value_parser(["active", "disabled"]),
                ),
        )
        .subcommand(
            Command::new(CMD_WARN)
                .about("Issue a warning to a user")
                .arg(user_id())
                .arg(
                    Arg::new(ARG_REASON)
                        .short('r')
                        .long(ARG_REASON)
                        .help("Reason shown to the user")
                        .required(true),
                ),
        )
}
