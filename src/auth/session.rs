use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

/// Client-held session state: the user id plus the credential hash captured
/// at login time. The snapshot is re-checked against the stored user on
/// every authenticated request, so a password change invalidates old
/// sessions on their next use.
///
/// There is no server-side session table; the whole bag round-trips through
/// one signed (tamper-evident, not encrypted) cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Uuid,
    pub password_hash: String,
}

impl SessionData {
    pub fn new(user_id: Uuid, password_hash: impl Into<String>) -> Self {
        Self {
            user_id,
            password_hash: password_hash.into(),
        }
    }

    /// Read the session out of the jar. A missing cookie, a bad signature
    /// and an undecodable payload all read as "no session".
    pub fn read(jar: &SignedCookieJar) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;
        serde_json::from_str(cookie.value()).ok()
    }

    /// Serialize into the session cookie, replacing any previous value in
    /// the outgoing response.
    pub fn write(&self, jar: SignedCookieJar) -> SignedCookieJar {
        let value = serde_json::to_string(self).expect("session data serializes to JSON");
        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }
}

/// Drop the session cookie (logout, or a failed gate check). Safe to call
/// when no session exists.
pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap};
    use axum::response::IntoResponse;
    use axum_extra::extract::cookie::Key;

    fn key() -> Key {
        crate::state::derive_session_key("dev-secret")
    }

    /// Render the jar to a Set-Cookie header and mount it back as a request
    /// Cookie header, the way a browser would replay it.
    fn replay(jar: SignedCookieJar, key: Key) -> SignedCookieJar {
        let response = (jar, "ok").into_response();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie is set")
            .to_str()
            .expect("header is ascii");
        let pair = set_cookie.split(';').next().expect("name=value pair");

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, pair.parse().expect("valid cookie header"));
        SignedCookieJar::from_headers(&headers, key)
    }

    #[test]
    fn write_then_read_roundtrips() {
        let session = SessionData::new(Uuid::new_v4(), "aa11");
        let jar = session.write(SignedCookieJar::new(key()));
        assert_eq!(SessionData::read(&jar), Some(session));
    }

    #[test]
    fn session_survives_a_browser_roundtrip() {
        let session = SessionData::new(Uuid::new_v4(), "aa11");
        let jar = session.write(SignedCookieJar::new(key()));
        let replayed = replay(jar, key());
        assert_eq!(SessionData::read(&replayed), Some(session));
    }

    #[test]
    fn cookie_signed_with_another_key_reads_as_no_session() {
        let session = SessionData::new(Uuid::new_v4(), "aa11");
        let jar = session.write(SignedCookieJar::new(key()));
        let other = crate::state::derive_session_key("other-secret");
        let replayed = replay(jar, other);
        assert_eq!(SessionData::read(&replayed), None);
    }

    #[test]
    fn unsigned_cookie_reads_as_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "session=forged-value".parse().expect("valid header"),
        );
        let jar = SignedCookieJar::from_headers(&headers, key());
        assert_eq!(SessionData::read(&jar), None);
    }

    #[test]
    fn clear_removes_the_session() {
        let session = SessionData::new(Uuid::new_v4(), "aa11");
        let jar = session.write(SignedCookieJar::new(key()));
        let jar = clear(jar);
        assert_eq!(SessionData::read(&jar), None);
    }

    #[test]
    fn session_cookie_is_http_only_and_lax() {
        let session = SessionData::new(Uuid::new_v4(), "aa11");
        let jar = session.write(SignedCookieJar::new(key()));
        let response = (jar, "ok").into_response();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie is set")
            .to_str()
            .expect("header is ascii");
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
    }
}
