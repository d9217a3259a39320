use crate::schema::feeds;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = feeds)]
pub struct Feed {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,

    /// Null until the feed has been visited by the scheduler at least once.
    pub last_fetched_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
