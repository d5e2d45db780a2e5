use serde::Deserialize;

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub email: String,
    pub name: String,
}

/// Query string for the by-email lookup.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}
