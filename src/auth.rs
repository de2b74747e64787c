use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::AppError,
    policy::Actor,
    repository::RepositoryState,
};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "forum_session";
/// Name of the one-shot cookie carrying the next flash message.
pub const FLASH_COOKIE: &str = "forum_flash";

/// Session lifetime. Sessions are stateless; expiry is the only revocation.
const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 14;

/// Claims
///
/// Payload of the session token stored in the session cookie. Signed with
/// the configured secret and validated on every request; the user is also
/// re-checked against the database so deleted accounts lose access
/// immediately.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id.
    pub sub: Uuid,
    /// Expiration time, seconds since epoch.
    pub exp: usize,
    /// Issued at, seconds since epoch.
    pub iat: usize,
}

/// Signs a fresh session token for `user_id`.
pub fn issue_session(user_id: Uuid, secret: &str) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: (now + SESSION_TTL_SECS) as usize,
        iat: now as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Actor Extractor
///
/// Resolves the request's `Actor` from the session cookie. Unlike a typical
/// bearer-token extractor this one never rejects: a missing, malformed,
/// expired, or orphaned session simply resolves to `Actor::Guest`, because
/// guests are legitimate readers here and denial is decided per-action by
/// the policy (soft deny), not by a 401 at the door.
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Actor::Guest);
        };

        let decoding_key = DecodingKey::from_secret(config.session_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = match decode::<Claims>(cookie.value(), &decoding_key, &validation) {
            Ok(data) => data,
            // Expired or tampered tokens are not an error condition for a
            // forum reader; the request proceeds unauthenticated.
            Err(_) => return Ok(Actor::Guest),
        };

        match repo.get_user(token_data.claims.sub).await {
            Ok(Some(user)) => Ok(Actor::from_role(&user.role, user.id)),
            Ok(None) => Ok(Actor::Guest),
            Err(e) => {
                tracing::error!("actor resolution lookup failed: {:?}", e);
                Ok(Actor::Guest)
            }
        }
    }
}

// --- Password Hashing ---

/// Hashes a plaintext password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::PasswordHash)
}

/// Verifies a plaintext password against a stored argon2 hash. A hash that
/// fails to parse counts as a failed verification, not a server fault.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// --- Cookie Helpers ---

/// Builds the session cookie for a signed token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

/// Ends the session by sending an expired session cookie. Added
/// unconditionally: `CookieJar::remove` only emits a removal for cookies
/// that arrived with the request, and sign-out must clear the browser's
/// session regardless of how the jar was built.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    jar.add(cookie)
}

/// Queues a flash message for the next rendered page.
pub fn set_flash(jar: CookieJar, message: &str) -> CookieJar {
    let mut cookie = Cookie::new(FLASH_COOKIE, message.to_string());
    cookie.set_path("/");
    jar.add(cookie)
}

/// Consumes the pending flash message, if any. Flash cookies are one-shot:
/// reading one clears it.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            let mut removal = Cookie::new(FLASH_COOKIE, "");
            removal.set_path("/");
            (jar.remove(removal), Some(message))
        }
        None => (jar, None),
    }
}
