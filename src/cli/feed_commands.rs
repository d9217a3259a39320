use crate::aggregator::scheduler;
use crate::cli::{require_arg, signed_in_user, CliCommand, CommandError, State};
use crate::db;
use crate::db::{feed_follows, feeds, posts};

const DEFAULT_BROWSE_LIMIT: i64 = 2;

pub fn add_feed(state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let name = require_arg(command, 0, "addfeed <name> <url>")?;
    let url = require_arg(command, 1, "addfeed <name> <url>")?;
    let mut connection = db::pool().get()?;

    let user = signed_in_user(state, &mut connection)?;
    let feed = feeds::create(&mut connection, name, url, user.id)?;
    feed_follows::create(&mut connection, user.id, feed.id)?;

    println!("Added feed '{}' ({})", feed.name, feed.url);
    println!("'{}' is now following '{}'", user.name, feed.name);
    Ok(())
}

pub fn feeds(_state: &mut State, _command: &CliCommand) -> Result<(), CommandError> {
    let mut connection = db::pool().get()?;

    for (feed, owner) in feeds::all_with_owners(&mut connection)? {
        println!("* {} ({}) added by {}", feed.name, feed.url, owner);
    }

    Ok(())
}

pub fn follow(state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let url = require_arg(command, 0, "follow <url>")?;
    let mut connection = db::pool().get()?;

    let user = signed_in_user(state, &mut connection)?;
    let feed = feeds::find_by_url(&mut connection, url).ok_or_else(|| {
        CommandError::FeedNotFound {
            url: url.to_string(),
        }
    })?;
    feed_follows::create(&mut connection, user.id, feed.id)?;

    println!("'{}' is now following '{}'", user.name, feed.name);
    Ok(())
}

pub fn following(state: &mut State, _command: &CliCommand) -> Result<(), CommandError> {
    let mut connection = db::pool().get()?;

    let user = signed_in_user(state, &mut connection)?;

    println!("'{}' is following:", user.name);
    for name in feed_follows::feed_names_for_user(&mut connection, user.id)? {
        println!("  - {}", name);
    }

    Ok(())
}

pub fn unfollow(state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let url = require_arg(command, 0, "unfollow <url>")?;
    let mut connection = db::pool().get()?;

    let user = signed_in_user(state, &mut connection)?;
    let feed = feeds::find_by_url(&mut connection, url).ok_or_else(|| {
        CommandError::FeedNotFound {
            url: url.to_string(),
        }
    })?;
    feed_follows::delete(&mut connection, user.id, feed.id)?;

    println!("'{}' unfollowed '{}'", user.name, feed.name);
    Ok(())
}

pub fn browse(state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let limit = match command.args.first() {
        Some(raw) => raw.parse::<i64>().map_err(|_| CommandError::UsageError {
            msg: "usage: browse [limit]".to_string(),
        })?,
        None => DEFAULT_BROWSE_LIMIT,
    };
    let mut connection = db::pool().get()?;

    let user = signed_in_user(state, &mut connection)?;

    for post in posts::recent_for_user(&mut connection, user.id, limit)? {
        println!("* {}", post.title);
        println!("  {}", post.url);
        if let Some(published_at) = post.published_at {
            println!("  published {}", published_at);
        }
        if let Some(description) = &post.description {
            println!("  {}", description);
        }
    }

    Ok(())
}

pub fn agg(_state: &mut State, command: &CliCommand) -> Result<(), CommandError> {
    let raw_interval = require_arg(command, 0, "agg <interval, e.g. 1m>")?;

    let interval =
        scheduler::parse_interval(raw_interval).map_err(|error| CommandError::SchedulerError {
            msg: format!("{:?}", error),
        })?;

    println!("Collecting feeds every {}", raw_interval);

    scheduler::start(interval).map_err(|error| CommandError::SchedulerError {
        msg: format!("{:?}", error),
    })
}
