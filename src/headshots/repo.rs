use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{classify_db_error, AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "background_style", rename_all = "snake_case")]
pub enum BackgroundStyle {
    Plain,
    Office,
    Outdoor,
    Studio,
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "attire", rename_all = "snake_case")]
pub enum Attire {
    BusinessCasual,
    Formal,
    Casual,
    SmartCasual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "expression", rename_all = "snake_case")]
pub enum Expression {
    Smiling,
    Serious,
    Confident,
    Friendly,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "headshot_status", rename_all = "snake_case")]
pub enum HeadshotStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HeadshotRequest {
    pub id: i32,
    pub user_id: i32,
    pub original_image_url: String,
    pub background_style: BackgroundStyle,
    pub attire: Attire,
    pub expression: Expression,
    pub status: HeadshotStatus,
    pub generated_image_url: Option<String>,
    pub error_message: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Flat join row; the nested response shape is built from this in dto.rs.
#[derive(Debug, Clone, FromRow)]
pub struct HeadshotWithUserRow {
    pub id: i32,
    pub user_id: i32,
    pub original_image_url: String,
    pub background_style: BackgroundStyle,
    pub attire: Attire,
    pub expression: Expression,
    pub status: HeadshotStatus,
    pub generated_image_url: Option<String>,
    pub error_message: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub u_id: i32,
    pub u_email: String,
    pub u_name: String,
    pub u_created_at: OffsetDateTime,
    pub u_updated_at: OffsetDateTime,
}

/// Partial-update input. `None` leaves a column untouched; for the nullable
/// columns, `Some(None)` = clear, `Some(Some(v))` = set.
#[derive(Debug, Clone, Default)]
pub struct UpdateHeadshotFields {
    pub status: Option<HeadshotStatus>,
    pub generated_image_url: Option<Option<String>>,
    pub error_message: Option<Option<String>>,
}

impl HeadshotRequest {
    /// Insert a new request in `pending` state. A dangling `user_id` surfaces
    /// as [`AppError::ForeignKeyViolation`].
    pub async fn create(
        db: &PgPool,
        user_id: i32,
        original_image_url: &str,
        background_style: BackgroundStyle,
        attire: Attire,
        expression: Expression,
    ) -> Result<HeadshotRequest, AppError> {
        let row = sqlx::query_as::<_, HeadshotRequest>(
            r#"
            INSERT INTO headshot_requests
                (user_id, original_image_url, background_style, attire, expression, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING id, user_id, original_image_url, background_style, attire, expression,
                      status, generated_image_url, error_message, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(original_image_url)
        .bind(background_style)
        .bind(attire)
        .bind(expression)
        .fetch_one(db)
        .await
        .map_err(classify_db_error)?;
        Ok(row)
    }

    pub async fn find_by_id_with_user(
        db: &PgPool,
        id: i32,
    ) -> Result<Option<HeadshotWithUserRow>, AppError> {
        let row = sqlx::query_as::<_, HeadshotWithUserRow>(
            r#"
            SELECT h.id, h.user_id, h.original_image_url, h.background_style, h.attire,
                   h.expression, h.status, h.generated_image_url, h.error_message,
                   h.created_at, h.updated_at,
                   u.id AS u_id, u.email AS u_email, u.name AS u_name,
                   u.created_at AS u_created_at, u.updated_at AS u_updated_at
            FROM headshot_requests h
            JOIN users u ON u.id = h.user_id
            WHERE h.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(classify_db_error)?;
        Ok(row)
    }

    /// All requests of one user, newest first. An unknown user id yields an
    /// empty list, indistinguishable from a user with no requests.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: i32,
    ) -> Result<Vec<HeadshotWithUserRow>, AppError> {
        let rows = sqlx::query_as::<_, HeadshotWithUserRow>(
            r#"
            SELECT h.id, h.user_id, h.original_image_url, h.background_style, h.attire,
                   h.expression, h.status, h.generated_image_url, h.error_message,
                   h.created_at, h.updated_at,
                   u.id AS u_id, u.email AS u_email, u.name AS u_name,
                   u.created_at AS u_created_at, u.updated_at AS u_updated_at
            FROM headshot_requests h
            JOIN users u ON u.id = h.user_id
            WHERE h.user_id = $1
            ORDER BY h.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(classify_db_error)?;
        Ok(rows)
    }

    pub async fn list_all(db: &PgPool) -> Result<Vec<HeadshotWithUserRow>, AppError> {
        let rows = sqlx::query_as::<_, HeadshotWithUserRow>(
            r#"
            SELECT h.id, h.user_id, h.original_image_url, h.background_style, h.attire,
                   h.expression, h.status, h.generated_image_url, h.error_message,
                   h.created_at, h.updated_at,
                   u.id AS u_id, u.email AS u_email, u.name AS u_name,
                   u.created_at AS u_created_at, u.updated_at AS u_updated_at
            FROM headshot_requests h
            JOIN users u ON u.id = h.user_id
            ORDER BY h.created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .map_err(classify_db_error)?;
        Ok(rows)
    }

    /// The worker-facing poll: exactly the rows still in `pending`, oldest
    /// first. No claim or lease is taken here; concurrent pollers may see the
    /// same rows.
    pub async fn list_pending(db: &PgPool) -> Result<Vec<HeadshotRequest>, AppError> {
        let rows = sqlx::query_as::<_, HeadshotRequest>(
            r#"
            SELECT id, user_id, original_image_url, background_style, attire, expression,
                   status, generated_image_url, error_message, created_at, updated_at
            FROM headshot_requests
            WHERE status = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(HeadshotStatus::Pending)
        .fetch_all(db)
        .await
        .map_err(classify_db_error)?;
        Ok(rows)
    }

    /// Apply only the supplied fields and refresh `updated_at`, in one
    /// statement. No status-transition table is enforced: any status may
    /// follow any status.
    pub async fn update(
        db: &PgPool,
        id: i32,
        fields: &UpdateHeadshotFields,
    ) -> Result<HeadshotRequest, AppError> {
        let row = sqlx::query_as::<_, HeadshotRequest>(
            r#"
            UPDATE headshot_requests
            SET status = COALESCE($2, status),
                generated_image_url = CASE WHEN $3 THEN $4 ELSE generated_image_url END,
                error_message = CASE WHEN $5 THEN $6 ELSE error_message END,
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, original_image_url, background_style, attire, expression,
                      status, generated_image_url, error_message, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(fields.status)
        .bind(fields.generated_image_url.is_some())
        .bind(fields.generated_image_url.clone().flatten())
        .bind(fields.error_message.is_some())
        .bind(fields.error_message.clone().flatten())
        .fetch_optional(db)
        .await
        .map_err(classify_db_error)?;

        row.ok_or_else(|| AppError::NotFound(format!("Headshot request {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(BackgroundStyle::Plain).unwrap(),
            "plain"
        );
        assert_eq!(
            serde_json::to_value(Attire::BusinessCasual).unwrap(),
            "business_casual"
        );
        assert_eq!(
            serde_json::to_value(Expression::Professional).unwrap(),
            "professional"
        );
        assert_eq!(
            serde_json::to_value(HeadshotStatus::Processing).unwrap(),
            "processing"
        );
    }

    #[test]
    fn enums_reject_values_outside_the_closed_set() {
        assert!(serde_json::from_value::<BackgroundStyle>(serde_json::json!("beach")).is_err());
        assert!(serde_json::from_value::<Attire>(serde_json::json!("tuxedo")).is_err());
        assert!(serde_json::from_value::<HeadshotStatus>(serde_json::json!("queued")).is_err());
    }

    #[test]
    fn status_parses_every_lifecycle_value() {
        for (s, expected) in [
            ("pending", HeadshotStatus::Pending),
            ("processing", HeadshotStatus::Processing),
            ("completed", HeadshotStatus::Completed),
            ("failed", HeadshotStatus::Failed),
        ] {
            let parsed: HeadshotStatus = serde_json::from_value(serde_json::json!(s)).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn default_update_touches_nothing_but_updated_at() {
        let fields = UpdateHeadshotFields::default();
        assert!(fields.status.is_none());
        assert!(fields.generated_image_url.is_none());
        assert!(fields.error_message.is_none());
    }
}
