//! Email-link sign-in.
//!
//! The user submits an address, receives a short-lived link, and following
//! that link exchanges it for a session token.

use thiserror::Error;

use crate::domain::types::ContactEmail;
use crate::models::auth::{
    AuthenticatedUser, SESSION_TOKEN_TTL, SIGN_IN_TOKEN_TTL, TokenPurpose, decode_token,
    issue_token,
};
use crate::models::config::ServerConfig;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("sign-in link is invalid or has expired")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("failed to deliver sign-in link: {0}")]
    Delivery(String),
}

/// Delivers sign-in links to users.
pub trait LinkSender: Send + Sync {
    fn send_sign_in_link(&self, email: &ContactEmail, link: &str) -> Result<(), AuthError>;
}

/// Writes the link to the application log instead of mailing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLinkSender;

impl LinkSender for LogLinkSender {
    fn send_sign_in_link(&self, email: &ContactEmail, link: &str) -> Result<(), AuthError> {
        log::info!("Sign-in link for {email}: {link}");
        Ok(())
    }
}

/// Issues a sign-in link for `email` and hands it to `sender`. Returns the
/// normalized address the link was sent to.
pub fn request_sign_in_link(
    config: &ServerConfig,
    sender: &dyn LinkSender,
    email: &str,
) -> Result<ContactEmail, AuthError> {
    let email = ContactEmail::new(email).map_err(|_| AuthError::InvalidEmail)?;
    let token = issue_token(
        &email,
        TokenPurpose::SignIn,
        SIGN_IN_TOKEN_TTL,
        &config.secret,
    )
    .map_err(AuthError::Signing)?;
    let link = format!("{}/auth/callback?token={token}", config.redirect_origin());

    sender.send_sign_in_link(&email, &link)?;
    Ok(email)
}

/// Verifies a link token and returns the session token to store in the
/// identity cookie together with the user it represents.
pub fn complete_sign_in(
    config: &ServerConfig,
    token: &str,
) -> Result<(String, AuthenticatedUser), AuthError> {
    let claims =
        decode_token(token, TokenPurpose::SignIn, &config.secret).map_err(AuthError::InvalidToken)?;
    let email = ContactEmail::new(claims.email).map_err(|_| AuthError::InvalidEmail)?;

    let session = issue_token(
        &email,
        TokenPurpose::Session,
        SESSION_TOKEN_TTL,
        &config.secret,
    )
    .map_err(AuthError::Signing)?;
    let user = decode_token(&session, TokenPurpose::Session, &config.secret)
        .map_err(AuthError::InvalidToken)?
        .into();

    Ok((session, user))
}
