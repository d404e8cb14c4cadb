use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for `POST /auth/login`. One of `username`/`email` plus the password
/// is expected; presence is checked in the handler so the failure is a
/// domain 400, not a deserialization error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Identifying slice of the authenticated user, returned by login and the
/// landing route.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
}
