//! Signed tokens carried in sign-in links and in the session cookie.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactEmail, OwnerId, TypeConstraintError};
use crate::models::config::ServerConfig;

/// Lifetime of the link mailed to the user.
pub const SIGN_IN_TOKEN_TTL: Duration = Duration::minutes(15);
/// Lifetime of a signed-in session.
pub const SESSION_TOKEN_TTL: Duration = Duration::days(7);

/// What a token may be used for. A link token cannot act as a session and
/// vice versa.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    SignIn,
    Session,
}

/// JWT claims shared by both token kinds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Principal id, derived from the normalized email.
    pub sub: String,
    pub email: String,
    pub purpose: TokenPurpose,
    pub exp: usize,
}

/// The signed-in principal.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Owner id stamped on every record this user writes.
    pub fn owner(&self) -> Result<OwnerId, TypeConstraintError> {
        OwnerId::new(self.sub.as_str())
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            email: claims.email,
            exp: claims.exp,
        }
    }
}

/// Signs a token of the given purpose for `email`.
pub fn issue_token(
    email: &ContactEmail,
    purpose: TokenPurpose,
    ttl: Duration,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + ttl).timestamp().max(0) as usize;
    let claims = Claims {
        sub: email.as_str().to_string(),
        email: email.as_str().to_string(),
        purpose,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies signature, expiry and purpose of a token.
pub fn decode_token(
    token: &str,
    purpose: TokenPurpose,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if data.claims.purpose != purpose {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(data.claims)
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let token = identity
        .id()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorInternalServerError("server configuration is missing"))?;

    decode_token(&token, TokenPurpose::Session, &config.secret)
        .map(AuthenticatedUser::from)
        .map_err(|err| {
            log::warn!("Rejected session token: {err}");
            ErrorUnauthorized("invalid session")
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn session_token_round_trips() {
        let email = ContactEmail::new("Studio@Example.com").unwrap();
        let token = issue_token(&email, TokenPurpose::Session, SESSION_TOKEN_TTL, SECRET).unwrap();

        let claims = decode_token(&token, TokenPurpose::Session, SECRET).unwrap();
        let user = AuthenticatedUser::from(claims);

        assert_eq!(user.email, "studio@example.com");
        assert_eq!(user.owner().unwrap().as_str(), "studio@example.com");
    }

    #[test]
    fn link_token_is_not_a_session() {
        let email = ContactEmail::new("studio@example.com").unwrap();
        let token = issue_token(&email, TokenPurpose::SignIn, SIGN_IN_TOKEN_TTL, SECRET).unwrap();

        assert!(decode_token(&token, TokenPurpose::Session, SECRET).is_err());
        assert!(decode_token(&token, TokenPurpose::SignIn, SECRET).is_ok());
    }

    #[test]
    fn wrong_secret_and_expired_tokens_are_rejected() {
        let email = ContactEmail::new("studio@example.com").unwrap();
        let token = issue_token(&email, TokenPurpose::Session, SESSION_TOKEN_TTL, SECRET).unwrap();
        assert!(decode_token(&token, TokenPurpose::Session, "other").is_err());

        let expired =
            issue_token(&email, TokenPurpose::Session, Duration::hours(-1), SECRET).unwrap();
        assert!(decode_token(&expired, TokenPurpose::Session, SECRET).is_err());
    }
}
