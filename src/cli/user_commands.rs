use crate::cli::{require_arg, CliCommand, CommandError, State};
use crate::db;
use crate::db::{feeds, users};

pub fn register(state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let name = require_arg(command, 0, "register <name>")?;
    let mut connection = db::pool().get()?;

    let user = users::create(&mut connection, name)?;
    state.config.set_user(&user.name)?;

    println!("Created user '{}'", user.name);
    Ok(())
}

pub fn login(state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let name = require_arg(command, 0, "login <name>")?;
    let mut connection = db::pool().get()?;

    let user = users::find_by_name(&mut connection, name).ok_or_else(|| {
        CommandError::UserNotFound {
            name: name.to_string(),
        }
    })?;
    state.config.set_user(&user.name)?;

    println!("Logged in as '{}'", user.name);
    Ok(())
}

pub fn users(state: &mut State, _command: &CliCommand) -> Result<(), CommandError> {
    let mut connection = db::pool().get()?;

    let current_name = state.config.current_user_name.as_deref();
    for user in users::all(&mut connection)? {
        if Some(user.name.as_str()) == current_name {
            println!("* {} (current)", user.name);
        } else {
            println!("* {}", user.name);
        }
    }

    Ok(())
}

// Development helper: wipes every table. Feeds, follows and posts go away
// with their owners through the cascades.
pub fn reset(_state: &mut State, _command: &CliCommand) -> Result<(), CommandError> {
    let mut connection = db::pool().get()?;

    users::delete_all(&mut connection)?;
    feeds::delete_all(&mut connection)?;

    println!("Database reset");
    Ok(())
}
