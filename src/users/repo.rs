use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{classify_db_error, AppError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Insert a new user. A duplicate email surfaces as
    /// [`AppError::UniqueViolation`].
    pub async fn create(db: &PgPool, email: &str, name: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(name)
        .fetch_one(db)
        .await
        .map_err(classify_db_error)?;
        Ok(user)
    }

    /// Exact, case-sensitive lookup. No match is a normal outcome, not an
    /// error.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(classify_db_error)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn user_serializes_timestamps_as_rfc3339() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            name: "A".into(),
            created_at: datetime!(2024-05-01 12:30:00 UTC),
            updated_at: datetime!(2024-05-01 12:30:00 UTC),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn user_roundtrips_through_json() {
        let json = r#"{
            "id": 7,
            "email": "demo-1700000000@headshot.studio",
            "name": "Demo User",
            "created_at": "2024-05-01T12:30:00Z",
            "updated_at": "2024-05-02T08:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.updated_at, datetime!(2024-05-02 08:00:00 UTC));
    }
}
