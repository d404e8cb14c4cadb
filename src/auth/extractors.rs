use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use tracing::warn;

use crate::auth::session::{self, SessionData};
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// The user resolved by the session gate. Handlers that take this extractor
/// only run with a live, re-validated session; none of them re-derive
/// identity themselves.
pub struct CurrentUser(pub User);

/// Gate failure. The unauthorized variant carries the jar with the session
/// already cleared, so the 401 response also drops the cookie.
pub struct AuthRejection {
    jar: Option<SignedCookieJar>,
    error: ApiError,
}

impl AuthRejection {
    fn unauthorized(jar: SignedCookieJar) -> Self {
        Self {
            jar: Some(session::clear(jar)),
            error: ApiError::Unauthorized("Unauthorized! - You should login first!".into()),
        }
    }
}

// Store failures inside the gate stay 500s and leave the cookie alone:
// a transient database error must not log the user out.
impl From<sqlx::Error> for AuthRejection {
    fn from(err: sqlx::Error) -> Self {
        Self {
            jar: None,
            error: err.into(),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self.jar {
            Some(jar) => (jar, self.error).into_response(),
            None => self.error.into_response(),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = Key::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, key);

        let Some(session) = SessionData::read(&jar) else {
            warn!("request without a valid session");
            return Err(AuthRejection::unauthorized(jar));
        };

        match User::find_by_id(&state.db, session.user_id).await? {
            Some(user) if user.password_hash == session.password_hash => Ok(CurrentUser(user)),
            Some(user) => {
                // Credential changed since the session was issued.
                warn!(user_id = %user.id, "session credential snapshot is stale");
                Err(AuthRejection::unauthorized(jar))
            }
            None => {
                warn!(user_id = %session.user_id, "session references a missing user");
                Err(AuthRejection::unauthorized(jar))
            }
        }
    }
}
