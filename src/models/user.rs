use serde::Serialize;
use sqlx::FromRow;

/// A row of `SELECT id, email, password FROM users`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password: String,
}

/// Document written to the `users` collection
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: i32,  // PRIMARY KEY from PostgreSQL, reused as-is
    pub email: String,
    pub password: String,  // already hashed upstream, copied verbatim
}

impl From<UserRow> for UserDocument {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password: row.password,
        }
    }
}
