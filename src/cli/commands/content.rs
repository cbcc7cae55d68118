use clap::{Arg, Command};

pub const CMD_CONTENT: &str = "content";
pub const CMD_REPORTED_POSTS: &str = "reported-posts";
pub const CMD_REPORTED_COMMENTS: &str = "reported-comments";
pub const CMD_TOP_POSTS: &str = "top-posts";
pub const CMD_REMOVE_POST: &str = "remove-post";
pub const CMD_REMOVE_COMMENT: &str = "remove-comment";
pub const CMD_WARN: &str = "warn";

pub const ARG_ID: &str = "id";
pub const ARG_USER_ID: &str = "user-id";
pub const ARG_KIND: &str = "kind";
pub const ARG_CONTENT_ID: &str = "content-id";

fn content_id(help: &'static str) -> Arg {
    Arg::new(ARG_ID)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_CONTENT)
        .about("Moderate posts and comments")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_REPORTED_POSTS).about("List reported posts"))
        .subcommand(Command::new(CMD_REPORTED_COMMENTS).about("List reported comments"))
        .subcommand(Command::new(CMD_TOP_POSTS).about("List top posts by engagement"))
        .subcommand(
            Command::new(CMD_REMOVE_POST)
                .about("Remove a reported post")
                .arg(content_id("Post id")),
        )
        .subcommand(
            Command::new(CMD_REMOVE_COMMENT)
                .about("Remove a reported comment")
                .arg(content_id("Comment id")),
        )
        .subcommand(
            Command::new(CMD_WARN)
                .about("Warn the author of a post or comment")
                .arg(Arg::new(ARG_USER_ID).help("Author user id").required(true))
                .arg(
                    Arg::new(ARG_KIND)
                        .short('k')
                        .long(ARG_KIND)
                        .help("Kind of content that was reported")
                        .required(true)
                        .value_parser(["post", "comment"]),
                )
                .arg(
                    Arg::new(ARG_CONTENT_ID)
                        .short('c')
                        .long(ARG_CONTENT_ID)
                        .help("Id of the post or comment")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
}
