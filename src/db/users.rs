use crate::db;
use crate::models::user::User;
use crate::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use uuid::Uuid;

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUser<'a> {
    id: Uuid,
    name: &'a str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub fn create(conn: &mut PgConnection, name: &str) -> Result<User, Error> {
    let now = db::current_time();
    let new_user = NewUser {
        id: Uuid::new_v4(),
        name: name.trim(),
        created_at: now,
        updated_at: now,
    };

    diesel::insert_into(users::table)
        .values(new_user)
        .get_result::<User>(conn)
}

pub fn find_by_name(conn: &mut PgConnection, name: &str) -> Option<User> {
    match users::table
        .filter(users::name.eq(name))
        .first::<User>(conn)
    {
        Ok(record) => Some(record),
        _ => None,
    }
}

pub fn all(conn: &mut PgConnection) -> Result<Vec<User>, Error> {
    users::table.order(users::name).load::<User>(conn)
}

pub fn delete_all(conn: &mut PgConnection) -> Result<usize, Error> {
    diesel::delete(users::table).execute(conn)
}
