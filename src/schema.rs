diesel::table! {
    feed_follows (id) {
        id -> Uuid,
        user_id -> Uuid,
        feed_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    feeds (id) {
        id -> Uuid,
        name -> Text,
        url -> Text,
        user_id -> Uuid,
        last_fetched_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    posts (id) {
        id -> Uuid,
        title -> Text,
        url -> Text,
        description -> Nullable<Text>,
        published_at -> Nullable<Timestamptz>,
        feed_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(feed_follows -> feeds (feed_id));
diesel::joinable!(feed_follows -> users (user_id));
diesel::joinable!(feeds -> users (user_id));
diesel::joinable!(posts -> feeds (feed_id));

diesel::allow_tables_to_appear_in_same_query!(feed_follows, feeds, posts, users,);
