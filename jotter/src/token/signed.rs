#[cfg(test)] mod tests;

use base64ct::{Base64Url, Encoding};
use hmac::{Hmac, Mac};
use log::debug;
use sha2::Sha256;
use time::OffsetDateTime;
use crate::config::app_config::CookieSecret;
use crate::identity::UserId;
use crate::lib_constants::{SIGNED_TOKEN_LIFETIME, SIGNED_TOKEN_SEPARATOR};
use crate::token::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Stateless identity assertion.
///
/// A token is `base64url(user "." expires_at "." base64url(hmac))`, where
/// the HMAC-SHA256 covers the `user "." expires_at` text exactly as it
/// appears in the token. No server-side state is kept: a token stays valid
/// until it expires or the secret changes.
pub struct SignedTokenCodec {
    mac: HmacSha256,
}

impl SignedTokenCodec {
    pub fn new(secret: &CookieSecret) -> Self {
        SignedTokenCodec {
            mac: HmacSha256::new_from_slice(secret.as_bytes())
                .expect("HMAC accepts keys of any length"),
        }
    }

    pub fn issue(&self, user: UserId) -> String {
        self.issue_at(user, OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, user: UserId, now: OffsetDateTime) -> String {
        self.issue_expiring(user, (now + SIGNED_TOKEN_LIFETIME).unix_timestamp())
    }

    fn issue_expiring(&self, user: UserId, expires_at: i64) -> String {
        let payload = format!("{user}{SIGNED_TOKEN_SEPARATOR}{expires_at}");
        let signature = self.sign(&payload);
        Base64Url::encode_string(
            format!("{payload}{SIGNED_TOKEN_SEPARATOR}{signature}").as_bytes()
        )
    }

    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        self.validate_at(token, OffsetDateTime::now_utc())
    }

    /// The signature is checked before any payload field is trusted.
    pub fn validate_at(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<UserId, TokenError> {
        let decoded = Base64Url::decode_vec(token)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(TokenError::MalformedToken)?;

        let mut fields = decoded.split(SIGNED_TOKEN_SEPARATOR);
        let (Some(user), Some(expires_at), Some(signature), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            debug!("signed token does not have exactly three fields");
            return Err(TokenError::MalformedToken);
        };

        let payload = &decoded[..decoded.len() - signature.len() - 1];
        self.verify_signature(payload, signature)?;

        let expires_at: i64 = expires_at.parse()
            .map_err(|_| TokenError::MalformedToken)?;
        if now.unix_timestamp() > expires_at {
            return Err(TokenError::Expired);
        }

        user.parse()
            .map_err(|_| TokenError::MalformedToken)
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        Base64Url::encode_string(&mac.finalize().into_bytes())
    }

    fn verify_signature(
        &self,
        payload: &str,
        signature: &str,
    ) -> Result<(), TokenError> {
        let supplied = Base64Url::decode_vec(signature)
            .map_err(|_| TokenError::InvalidSignature)?;
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        // constant-time comparison
        mac.verify_slice(&supplied)
            .map_err(|_| TokenError::InvalidSignature)
    }
}
