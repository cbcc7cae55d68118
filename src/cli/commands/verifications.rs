use clap::{Arg, Command};

pub const CMD_VERIFICATIONS: &str = "verifications";
pub const CMD_LIST: &str = "list";
pub const CMD_APPROVE: &str = "approve";
pub const CMD_REJECT: &str = "reject";

pub const ARG_ID: &str = "id";
pub const ARG_REASON: &str = "reason";

fn profile_id() -> Arg {
    Arg::new(ARG_ID).help("Pending profile id").required(true)
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_VERIFICATIONS)
        .about("Review professional profile verifications")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_LIST).about("List pending profiles"))
        .subcommand(
            Command::new(CMD_APPROVE)
                .about("Approve a pending profile")
                .arg(profile_id()),
        )
        .subcommand(
            Command::new(CMD_REJECT)
                .about("Reject a pending profile")
                .arg(profile_id())
                .arg(
                    Arg::new(ARG_REASON)
                        .short('r')
                        .long(ARG_REASON)
                        .help("Optional rejection reason"),
                ),
        )
}
