use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::headshots::repo::{
    Attire, BackgroundStyle, Expression, HeadshotStatus, HeadshotWithUserRow,
    UpdateHeadshotFields,
};
use crate::users::repo::User;

/// Request body for headshot creation. Enum membership is enforced by
/// deserialization of the closed sets.
#[derive(Debug, Deserialize)]
pub struct CreateHeadshotBody {
    pub user_id: i32,
    pub original_image_url: String,
    pub background_style: BackgroundStyle,
    pub attire: Attire,
    pub expression: Expression,
}

/// Partial-update body. A field that is absent stays untouched; for the
/// nullable fields an explicit `null` clears the column.
/// `Some(Some(v))` = set, `Some(None)` = clear, `None` = no change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHeadshotBody {
    pub status: Option<HeadshotStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub generated_image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub error_message: Option<Option<String>>,
}

// Plain Option<Option<T>> collapses an explicit null into the outer None;
// wrapping the deserialized value keeps "present but null" observable.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

impl From<UpdateHeadshotBody> for UpdateHeadshotFields {
    fn from(body: UpdateHeadshotBody) -> Self {
        Self {
            status: body.status,
            generated_image_url: body.generated_image_url,
            error_message: body.error_message,
        }
    }
}

/// Read-only composite returned by the query-side operations: the request
/// plus its owning user.
#[derive(Debug, Serialize)]
pub struct HeadshotWithUser {
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
    pub user: User,
}

impl From<HeadshotWithUserRow> for HeadshotWithUser {
    fn from(r: HeadshotWithUserRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            original_image_url: r.original_image_url,
            background_style: r.background_style,
            attire: r.attire,
            expression: r.expression,
            status: r.status,
            generated_image_url: r.generated_image_url,
            error_message: r.error_message,
            created_at: r.created_at,
            updated_at: r.updated_at,
            user: User {
                id: r.u_id,
                email: r.u_email,
                name: r.u_name,
                created_at: r.u_created_at,
                updated_at: r.u_updated_at,
            },
        }
    }
}
