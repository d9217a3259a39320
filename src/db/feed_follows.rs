use crate::db;
use crate::models::feed_follow::FeedFollow;
use crate::schema::{feed_follows, feeds};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use uuid::Uuid;

#[derive(Insertable)]
#[diesel(table_name = feed_follows)]
struct NewFeedFollow {
    id: Uuid,
    user_id: Uuid,
    feed_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub fn create(conn: &mut PgConnection, user_id: Uuid, feed_id: Uuid) -> Result<FeedFollow, Error> {
    let now = db::current_time();
    let new_follow = NewFeedFollow {
        id: Uuid::new_v4(),
        user_id,
        feed_id,
        created_at: now,
        updated_at: now,
    };

    diesel::insert_into(feed_follows::table)
        .values(new_follow)
        .get_result::<FeedFollow>(conn)
}

pub fn delete(conn: &mut PgConnection, user_id: Uuid, feed_id: Uuid) -> Result<usize, Error> {
    let record_query = feed_follows::table
        .filter(feed_follows::user_id.eq(user_id))
        .filter(feed_follows::feed_id.eq(feed_id));

    diesel::delete(record_query).execute(conn)
}

pub fn feed_names_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<String>, Error> {
    feed_follows::table
        .inner_join(feeds::table)
        .filter(feed_follows::user_id.eq(user_id))
        .select(feeds::name)
        .order(feeds::name)
        .load::<String>(conn)
}
