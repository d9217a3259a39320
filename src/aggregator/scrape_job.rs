use crate::aggregator::fetcher;
use crate::aggregator::fetcher::FetchError;
use crate::aggregator::pub_date;
use crate::db;
use crate::db::posts::NewPost;
use crate::db::{feeds, posts};
use crate::models::feed::Feed;
use diesel::pg::PgConnection;
use diesel::result::Error;
use log::warn;
use uuid::Uuid;

/// Ingestion of a single feed: fetch, normalize, persist.
#[derive(Debug)]
pub struct ScrapeFeedJob {
    feed: Feed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ScrapeError {
    FeedError { msg: String },
    DbError { msg: String },
}

impl From<Error> for ScrapeError {
    fn from(error: Error) -> Self {
        let msg = format!("{:?}", error);

        ScrapeError::DbError { msg }
    }
}

impl From<FetchError> for ScrapeError {
    fn from(error: FetchError) -> Self {
        let msg = format!("{:?}", error);

        ScrapeError::FeedError { msg }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub items_seen: usize,
    pub posts_created: usize,
}

impl ScrapeFeedJob {
    pub fn new(feed: Feed) -> Self {
        ScrapeFeedJob { feed }
    }

    pub fn execute(&self, conn: &mut PgConnection) -> Result<ScrapeSummary, ScrapeError> {
        // The feed counts as visited from this point, whatever the fetch
        // does; the mark is not rolled back on failure.
        feeds::mark_fetched(conn, self.feed.id, db::current_time())?;

        let fetched_feed = fetcher::fetch(&self.feed.url)?;

        let mut posts_created = 0;
        for item in &fetched_feed.items {
            let link = match item.link.as_deref() {
                Some(link) => link,
                None => {
                    warn!("Skipping an item without a link in feed {}", self.feed.url);
                    continue;
                }
            };

            let now = db::current_time();
            let new_post = NewPost {
                id: Uuid::new_v4(),
                title: item.title.clone(),
                url: link.to_string(),
                description: item.description.clone(),
                published_at: item.pub_date.as_deref().and_then(pub_date::parse_pub_date),
                feed_id: self.feed.id,
                created_at: now,
                updated_at: now,
            };

            // A duplicate URL means the post is already there; the rest
            // of the batch still gets ingested.
            if posts::create(conn, &new_post)?.is_some() {
                posts_created += 1;
            }
        }

        Ok(ScrapeSummary {
            items_seen: fetched_feed.items.len(),
            posts_created,
        })
    }
}
