use crate::aggregator::scrape_job::ScrapeFeedJob;
use crate::db;
use crate::db::feeds;
use diesel::result::Error;
use log::{error, info};
use std::thread;
use std::time::Duration;

#[derive(Debug, PartialEq, Eq)]
pub enum SchedulerError {
    InvalidInterval { msg: String },
    NoFeeds,
    DbError { msg: String },
}

impl From<Error> for SchedulerError {
    fn from(error: Error) -> Self {
        match error {
            Error::NotFound => SchedulerError::NoFeeds,
            other => SchedulerError::DbError {
                msg: format!("{:?}", other),
            },
        }
    }
}

/// Parses a Go-style duration string such as `30s`, `5m` or `1h30m`.
/// A unit suffix is required and the total must be positive.
pub fn parse_interval(raw: &str) -> Result<Duration, SchedulerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid_interval("interval is empty"));
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();

    for character in raw.chars() {
        if character.is_ascii_digit() {
            digits.push(character);
            continue;
        }

        if digits.is_empty() {
            return Err(invalid_interval(&format!(
                "unexpected character '{}'",
                character
            )));
        }

        let value = digits.parse::<u64>().map_err(|error| {
            invalid_interval(&format!("bad number '{}': {:?}", digits, error))
        })?;
        digits.clear();

        let unit_seconds = match character {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            other => {
                return Err(invalid_interval(&format!("unknown unit '{}'", other)));
            }
        };

        total += Duration::from_secs(value * unit_seconds);
    }

    if !digits.is_empty() {
        return Err(invalid_interval("missing unit suffix (try 30s, 5m or 1h)"));
    }

    if total.is_zero() {
        return Err(invalid_interval("interval must be positive"));
    }

    Ok(total)
}

/// Runs the polling loop until the process is killed or a fatal error
/// surfaces. Each tick picks exactly one feed, the one that has waited the
/// longest, and runs the ingestion step on it; a failing tick is logged and
/// the loop moves on to the next tick.
pub fn start(interval: Duration) -> Result<(), SchedulerError> {
    if interval.is_zero() {
        return Err(invalid_interval("interval must be positive"));
    }

    let mut connection = db::pool()
        .get()
        .map_err(|error| SchedulerError::DbError {
            msg: format!("{:?}", error),
        })?;

    info!("Collecting feeds every {:?}", interval);

    loop {
        let feed = feeds::find_next_to_fetch(&mut connection)?;
        let url = feed.url.clone();

        match ScrapeFeedJob::new(feed).execute(&mut connection) {
            Ok(summary) => info!(
                "Scraped {}: {} items, {} new posts",
                url, summary.items_seen, summary.posts_created
            ),
            // The feed was already marked fetched, so it sits out until
            // its turn comes back around; the loop keeps polling the rest.
            Err(scrape_error) => error!("Failed to scrape {}: {:?}", url, scrape_error),
        }

        thread::sleep(interval);
    }
}

fn invalid_interval(msg: &str) -> SchedulerError {
    SchedulerError::InvalidInterval {
        msg: msg.to_string(),
    }
}
