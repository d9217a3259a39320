use crate::config::{Config, ConfigError};
use crate::models::user::User;
use diesel::pg::PgConnection;
use diesel::r2d2::PoolError;
use diesel::result::Error;
use std::collections::HashMap;

pub mod feed_commands;
pub mod user_commands;

pub struct State {
    pub config: Config,
}

pub struct CliCommand {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug)]
pub enum CommandError {
    UsageError { msg: String },
    UnknownCommand { name: String },
    NotLoggedIn,
    UserNotFound { name: String },
    FeedNotFound { url: String },
    ConfigError { msg: String },
    DbError { msg: String },
    SchedulerError { msg: String },
}

impl From<Error> for CommandError {
    fn from(error: Error) -> Self {
        let msg = format!("{:?}", error);

        CommandError::DbError { msg }
    }
}

impl From<PoolError> for CommandError {
    fn from(error: PoolError) -> Self {
        let msg = format!("{:?}", error);

        CommandError::DbError { msg }
    }
}

impl From<ConfigError> for CommandError {
    fn from(error: ConfigError) -> Self {
        let msg = format!("{:?}", error);

        CommandError::ConfigError { msg }
    }
}

pub type Handler = fn(&mut State, &CliCommand) -> Result<(), CommandError>;

/// Explicit command table, built once at startup and passed by reference
/// into dispatch.
pub struct CommandTable {
    handlers: HashMap<&'static str, Handler>,
}

impl CommandTable {
    pub fn new() -> Self {
        let mut table = CommandTable {
            handlers: HashMap::new(),
        };

        table.register("register", user_commands::register);
        table.register("login", user_commands::login);
        table.register("users", user_commands::users);
        table.register("reset", user_commands::reset);
        table.register("addfeed", feed_commands::add_feed);
        table.register("feeds", feed_commands::feeds);
        table.register("follow", feed_commands::follow);
        table.register("following", feed_commands::following);
        table.register("unfollow", feed_commands::unfollow);
        table.register("browse", feed_commands::browse);
        table.register("agg", feed_commands::agg);

        table
    }

    pub fn register(&mut self, name: &'static str, handler: Handler) {
        self.handlers.insert(name, handler);
    }

    pub fn run(&self, state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
        match self.handlers.get(command.name.as_str()) {
            Some(handler) => handler(state, command),
            None => Err(CommandError::UnknownCommand {
                name: command.name.clone(),
            }),
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the configured current user against the store. Commands that
/// operate on "my feeds" go through this.
pub fn signed_in_user(state: &State, conn: &mut PgConnection) -> Result<User, CommandError> {
    let name = state
        .config
        .current_user_name
        .clone()
        .ok_or(CommandError::NotLoggedIn)?;

    crate::db::users::find_by_name(conn, &name).ok_or(CommandError::UserNotFound { name })
}

pub(crate) fn require_arg<'a>(
    command: &'a CliCommand,
    index: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    command
        .args
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| CommandError::UsageError {
            msg: format!("usage: {}", usage),
        })
}

#[cfg(test)]
mod tests {
    use super::{CliCommand, CommandError, CommandTable, State};
    use crate::config::Config;

    fn failing_stub(_state: &mut State, _command: &CliCommand) -> Result<(), CommandError> {
        Err(CommandError::UsageError {
            msg: "stub".to_string(),
        })
    }

    #[test]
    fn it_dispatches_to_a_registered_handler() {
        let mut table = CommandTable::new();
        table.register("stub", failing_stub);

        let mut state = State {
            config: Config::default(),
        };
        let command = CliCommand {
            name: "stub".to_string(),
            args: vec![],
        };

        let result = table.run(&mut state, &command);

        assert!(matches!(result, Err(CommandError::UsageError { .. })));
    }

    #[test]
    fn it_rejects_unknown_commands() {
        let table = CommandTable::new();

        let mut state = State {
            config: Config::default(),
        };
        let command = CliCommand {
            name: "definitely-not-a-command".to_string(),
            args: vec![],
        };

        let result = table.run(&mut state, &command);

        match result {
            Err(CommandError::UnknownCommand { name }) => {
                assert_eq!(name, "definitely-not-a-command");
            }
            other => panic!("Expected an unknown command error, got {:?}", other),
        }
    }

    #[test]
    fn require_arg_reports_usage() {
        let command = CliCommand {
            name: "follow".to_string(),
            args: vec!["https://example.com/rss.xml".to_string()],
        };

        assert_eq!(
            super::require_arg(&command, 0, "follow <url>").unwrap(),
            "https://example.com/rss.xml"
        );
        assert!(matches!(
            super::require_arg(&command, 1, "follow <url>"),
            Err(CommandError::UsageError { .. })
        ));
    }
}
