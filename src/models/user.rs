use crate::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = users)]
pub struct User {
    pub id: Uuid,
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
