//! Maps validated CLI matches to an [`Action`].
//!
//! Global flags may be given before or after the subcommand, so they are read
//! from the deepest subcommand matches where clap propagates them.

use crate::cli::{
    actions::{
        content::{self, ContentAction},
        session::LoginArgs,
        users::{self, UserAction},
        verifications::{self, VerificationAction},
        Action,
    },
    commands::{self, backend},
    globals::GlobalArgs,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

/// Deepest subcommand matches.
#[must_use]
pub fn leaf(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

fn string(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: {id}"))
}

fn number(matches: &ArgMatches, id: &str) -> Result<i64> {
    matches
        .get_one::<i64>(id)
        .copied()
        .with_context(|| format!("missing required argument: {id}"))
}

fn sub(matches: &ArgMatches) -> Result<(&str, &ArgMatches)> {
    matches.subcommand().context("missing subcommand")
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is
/// unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::new(backend::Options::parse(leaf(matches)).into_config());

    let (name, matches) = sub(matches)?;
    match name {
        commands::session::CMD_LOGIN => Ok(Action::Login(LoginArgs {
            globals,
            email: string(matches, commands::session::ARG_EMAIL)?,
            password: SecretString::from(string(matches, commands::session::ARG_PASSWORD)?),
        })),
        commands::session::CMD_LOGOUT => Ok(Action::Logout(globals)),
        commands::session::CMD_WHOAMI => Ok(Action::Whoami(globals)),
        commands::CMD_OVERVIEW => Ok(Action::Overview(globals)),
        commands::users::CMD_USERS => Ok(Action::Users(users::Args {
            globals,
            action: user_action(matches)?,
        })),
        commands::verifications::CMD_VERIFICATIONS => {
            Ok(Action::Verifications(verifications::Args {
                globals,
                action: verification_action(matches)?,
            }))
        }
        commands::content::CMD_CONTENT => Ok(Action::Content(content::Args {
            globals,
            action: content_action(matches)?,
        })),
        other => bail!("unknown command: {other}"),
    }
}

fn user_action(matches: &ArgMatches) -> Result<UserAction> {
    use commands::users::{
        ARG_ID, ARG_REASON, ARG_SEARCH, ARG_STATUS, CMD_LIST, CMD_SHOW, CMD_STATUS, CMD_WARN,
    };

    let (name, matches) = sub(matches)?;
    Ok(match name {
        CMD_LIST => UserAction::List {
            search: matches.get_one::<String>(ARG_SEARCH).cloned(),
        },
        CMD_SHOW => UserAction::Show {
            id: string(matches, ARG_ID)?,
        },
        CMD_STATUS => UserAction::Status {
            id: string(matches, ARG_ID)?,
            status: string(matches, ARG_STATUS)?
                .parse()
                .map_err(|err: String| anyhow!(err))?,
        },
        CMD_WARN => UserAction::Warn {
            id: string(matches, ARG_ID)?,
            reason: string(matches, ARG_REASON)?,
        },
        other => bail!("unknown users command: {other}"),
    })
}

fn verification_action(matches: &ArgMatches) -> Result<VerificationAction> {
    use commands::verifications::{ARG_ID, ARG_REASON, CMD_APPROVE, CMD_LIST, CMD_REJECT};

    let (name, matches) = sub(matches)?;
    Ok(match name {
        CMD_LIST => VerificationAction::List,
        CMD_APPROVE => VerificationAction::Approve {
            id: string(matches, ARG_ID)?,
        },
        CMD_REJECT => VerificationAction::Reject {
            id: string(matches, ARG_ID)?,
            reason: matches.get_one::<String>(ARG_REASON).cloned(),
        },
        other => bail!("unknown verifications command: {other}"),
    })
}

fn content_action(matches: &ArgMatches) -> Result<ContentAction> {
    use commands::content::{
        ARG_CONTENT_ID, ARG_ID, ARG_KIND, ARG_USER_ID, CMD_REMOVE_COMMENT, CMD_REMOVE_POST,
        CMD_REPORTED_COMMENTS, CMD_REPORTED_POSTS, CMD_TOP_POSTS, CMD_WARN,
    };

    let (name, matches) = sub(matches)?;
    Ok(match name {
        CMD_REPORTED_POSTS => ContentAction::ReportedPosts,
        CMD_REPORTED_COMMENTS => ContentAction::ReportedComments,
        CMD_TOP_POSTS => ContentAction::TopPosts,
        CMD_REMOVE_POST => ContentAction::RemovePost {
            id: number(matches, ARG_ID)?,
        },
        CMD_REMOVE_COMMENT => ContentAction::RemoveComment {
            id: number(matches, ARG_ID)?,
        },
        CMD_WARN => ContentAction::Warn {
            user_id: string(matches, ARG_USER_ID)?,
            kind: string(matches, ARG_KIND)?
                .parse()
                .map_err(|err: String| anyhow!(err))?,
            content_id: number(matches, ARG_CONTENT_ID)?,
        },
        other => bail!("unknown content command: {other}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancapp::types::{ContentKind, UserStatus};
    use secrecy::ExposeSecret;
    use std::{path::PathBuf, time::Duration};

    const ENV_VARS: [&str; 7] = [
        "CANCAPP_API_URL",
        "CANCAPP_SESSION_FILE",
        "CANCAPP_TIMEOUT",
        "CANCAPP_LOG_LEVEL",
        "CANCAPP_LOG_JSON",
        "CANCAPP_ADMIN_EMAIL",
        "CANCAPP_ADMIN_PASSWORD",
    ];

    fn dispatch(args: &[&str]) -> Result<Action> {
        let mut result = None;
        temp_env::with_vars(ENV_VARS.map(|key| (key, None::<&str>)), || {
            let mut argv = vec!["cancapp-admin"];
            argv.extend_from_slice(args);
            let matches = commands::new().get_matches_from(argv);
            result = Some(handler(&matches));
        });
        result.context("dispatch did not run")?
    }

    #[test]
    fn login_carries_credentials_and_globals() -> Result<()> {
        let action = dispatch(&[
            "--api-url",
            "https://staging.cancapp.test",
            "login",
            "--email",
            "admin@cancapp.com",
            "--password",
            "admin123",
            "--session-file",
            "/tmp/cancapp-session.json",
            "--timeout",
            "5",
        ])?;

        let Action::Login(args) = action else {
            bail!("expected login");
        };
        assert_eq!(args.email, "admin@cancapp.com");
        assert_eq!(args.password.expose_secret(), "admin123");
        assert_eq!(args.globals.config.api_base_url, "https://staging.cancapp.test");
        assert_eq!(
            args.globals.config.session_file,
            PathBuf::from("/tmp/cancapp-session.json")
        );
        assert_eq!(args.globals.config.timeout, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn users_subcommands() -> Result<()> {
        let Action::Users(args) = dispatch(&["users", "list", "--search", "dr."])? else {
            bail!("expected users");
        };
        assert!(matches!(args.action, UserAction::List { search: Some(ref s) } if s == "dr."));

        let Action::Users(args) = dispatch(&["users", "status", "42", "disabled"])? else {
            bail!("expected users");
        };
        assert!(matches!(
            args.action,
            UserAction::Status { ref id, status: UserStatus::Disabled } if id == "42"
        ));

        let Action::Users(args) = dispatch(&["users", "warn", "42", "--reason", "spam"])? else {
            bail!("expected users");
        };
        assert!(matches!(
            args.action,
            UserAction::Warn { ref id, ref reason } if id == "42" && reason == "spam"
        ));
        Ok(())
    }

    #[test]
    fn verifications_reject_reason_is_optional() -> Result<()> {
        let Action::Verifications(args) = dispatch(&["verifications", "reject", "p-1"])? else {
            bail!("expected verifications");
        };
        assert!(matches!(
            args.action,
            VerificationAction::Reject { ref id, reason: None } if id == "p-1"
        ));
        Ok(())
    }

    #[test]
    fn content_warn_parses_kind() -> Result<()> {
        let Action::Content(args) = dispatch(&[
            "content",
            "warn",
            "u-7",
            "--kind",
            "post",
            "--content-id",
            "9",
        ])?
        else {
            bail!("expected content");
        };
        assert!(matches!(
            args.action,
            ContentAction::Warn {
                ref user_id,
                kind: ContentKind::Post,
                content_id: 9,
            } if user_id == "u-7"
        ));
        Ok(())
    }

    #[test]
    fn overview_and_session_commands() -> Result<()> {
        assert!(matches!(dispatch(&["overview"])?, Action::Overview(_)));
        assert!(matches!(dispatch(&["logout"])?, Action::Logout(_)));
        assert!(matches!(dispatch(&["whoami"])?, Action::Whoami(_)));
        Ok(())
    }
}
