use crate::models::post::Post;
use crate::schema::{feed_follows, posts};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use uuid::Uuid;

#[derive(Insertable, Debug)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub feed_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inserts a post. Post URLs are globally unique; a conflicting URL means
/// the post was already ingested, so the insert is a no-op and `Ok(None)`
/// is returned.
pub fn create(conn: &mut PgConnection, new_post: &NewPost) -> Result<Option<Post>, Error> {
    diesel::insert_into(posts::table)
        .values(new_post)
        .on_conflict(posts::url)
        .do_nothing()
        .get_result::<Post>(conn)
        .optional()
}

pub fn recent_for_user(
    conn: &mut PgConnection,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<Post>, Error> {
    let followed_feed_ids = feed_follows::table
        .filter(feed_follows::user_id.eq(user_id))
        .select(feed_follows::feed_id);

    posts::table
        .filter(posts::feed_id.eq_any(followed_feed_ids))
        .order((posts::published_at.is_null().asc(), posts::published_at.desc()))
        .limit(limit)
        .load::<Post>(conn)
}

#[cfg(test)]
mod tests {
    use super::NewPost;
    use crate::db;
    use crate::db::{feed_follows, feeds, users};
    use chrono::Duration;
    use diesel::connection::Connection;
    use diesel::result::Error;
    use uuid::Uuid;

    fn new_post(url: &str, feed_id: Uuid) -> NewPost {
        let now = db::current_time();

        NewPost {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            url: url.to_string(),
            description: Some("Description".to_string()),
            published_at: Some(now),
            feed_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    #[ignore]
    fn create_creates_new_post() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let user = users::create(connection, "ada").unwrap();
            let feed = feeds::create(connection, "Example", "https://example.com/rss.xml", user.id)
                .unwrap();

            let post = super::create(connection, &new_post("https://example.com/a", feed.id))
                .unwrap()
                .unwrap();

            assert_eq!(post.title, "Title");
            assert_eq!(post.url, "https://example.com/a");
            assert_eq!(post.feed_id, feed.id);

            Ok(())
        });
    }

    #[test]
    #[ignore]
    fn create_is_a_noop_on_duplicate_url() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let user = users::create(connection, "ada").unwrap();
            let feed = feeds::create(connection, "Example", "https://example.com/rss.xml", user.id)
                .unwrap();

            let first = super::create(connection, &new_post("https://example.com/a", feed.id))
                .unwrap();
            assert!(first.is_some());

            let second = super::create(connection, &new_post("https://example.com/a", feed.id))
                .unwrap();
            assert!(second.is_none());

            Ok(())
        });
    }

    #[test]
    #[ignore]
    fn recent_for_user_returns_followed_posts_newest_first() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let user = users::create(connection, "ada").unwrap();
            let followed =
                feeds::create(connection, "Followed", "https://example.com/f.xml", user.id)
                    .unwrap();
            let ignored =
                feeds::create(connection, "Ignored", "https://example.com/i.xml", user.id)
                    .unwrap();
            feed_follows::create(connection, user.id, followed.id).unwrap();

            let now = db::current_time();

            let mut older = new_post("https://example.com/older", followed.id);
            older.published_at = Some(now - Duration::hours(1));
            super::create(connection, &older).unwrap();

            let mut newer = new_post("https://example.com/newer", followed.id);
            newer.published_at = Some(now);
            super::create(connection, &newer).unwrap();

            let mut undated = new_post("https://example.com/undated", followed.id);
            undated.published_at = None;
            super::create(connection, &undated).unwrap();

            super::create(connection, &new_post("https://example.com/other", ignored.id))
                .unwrap();

            let posts = super::recent_for_user(connection, user.id, 10).unwrap();
            let urls: Vec<&str> = posts.iter().map(|post| post.url.as_str()).collect();

            assert_eq!(
                urls,
                vec![
                    "https://example.com/newer",
                    "https://example.com/older",
                    "https://example.com/undated",
                ]
            );

            Ok(())
        });
    }
}
