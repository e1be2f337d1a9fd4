//! Diesel row structs for the `users` table.
//!
//! These stay inside the persistence layer; the domain only sees [`User`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::user::StoredUserParts;

use super::schema::users;

/// Row read back from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_no: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::restore(StoredUserParts {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            contact_no: row.contact_no,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Values written by a registration insert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub contact_no: &'a str,
    pub address: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
