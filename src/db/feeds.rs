use crate::db;
use crate::models::feed::Feed;
use crate::schema::{feeds, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use uuid::Uuid;

#[derive(Insertable)]
#[diesel(table_name = feeds)]
struct NewFeed<'a> {
    id: Uuid,
    name: &'a str,
    url: &'a str,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub fn create(
    conn: &mut PgConnection,
    name: &str,
    url: &str,
    user_id: Uuid,
) -> Result<Feed, Error> {
    let now = db::current_time();
    let new_feed = NewFeed {
        id: Uuid::new_v4(),
        name: name.trim(),
        url: url.trim(),
        user_id,
        created_at: now,
        updated_at: now,
    };

    diesel::insert_into(feeds::table)
        .values(new_feed)
        .get_result::<Feed>(conn)
}

pub fn find_by_url(conn: &mut PgConnection, url: &str) -> Option<Feed> {
    match feeds::table.filter(feeds::url.eq(url)).first::<Feed>(conn) {
        Ok(record) => Some(record),
        _ => None,
    }
}

pub fn all_with_owners(conn: &mut PgConnection) -> Result<Vec<(Feed, String)>, Error> {
    feeds::table
        .inner_join(users::table)
        .select((feeds::all_columns, users::name))
        .order(feeds::created_at)
        .load::<(Feed, String)>(conn)
}

/// Returns the feed whose turn it is: never-fetched feeds first, then the
/// one with the oldest `last_fetched_at`. Fails with `Error::NotFound` when
/// the table is empty.
pub fn find_next_to_fetch(conn: &mut PgConnection) -> Result<Feed, Error> {
    feeds::table
        .order((
            feeds::last_fetched_at.is_null().desc(),
            feeds::last_fetched_at.asc(),
        ))
        .first::<Feed>(conn)
}

pub fn mark_fetched(
    conn: &mut PgConnection,
    feed_id: Uuid,
    time: DateTime<Utc>,
) -> Result<usize, Error> {
    diesel::update(feeds::table.filter(feeds::id.eq(feed_id)))
        .set((feeds::last_fetched_at.eq(time), feeds::updated_at.eq(time)))
        .execute(conn)
}

pub fn delete_all(conn: &mut PgConnection) -> Result<usize, Error> {
    diesel::delete(feeds::table).execute(conn)
}
