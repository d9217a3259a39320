use crate::schema::posts;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,

    /// Normalized publish date; null when the feed carried none we could parse.
    pub published_at: Option<DateTime<Utc>>,

    pub feed_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
