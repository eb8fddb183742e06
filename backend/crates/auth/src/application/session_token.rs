//! Session Token Signing
//!
//! The cookie value is `{session_id}.{signature}` where the signature is
//! HMAC-SHA256 over the session ID string, base64url-encoded without
//! padding. The client never sees a bare session ID, so a stolen database
//! dump cannot be turned into valid cookies without the secret.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::value_object::SessionId;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Sign a session ID into a cookie-ready token
pub fn sign_session_token(session_id: &SessionId, secret: &[u8; 32]) -> String {
    let session_id_str = session_id.to_string();

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{session_id_str}.{signature}")
}

/// Verify a token and extract the session ID
///
/// Any structural or signature failure maps to `Unauthorized`; the caller
/// never learns which part was wrong.
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> AuthResult<SessionId> {
    let Some((session_id_str, signature_b64)) = token.split_once('.') else {
        return Err(AuthError::Unauthorized);
    };

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::Unauthorized)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::Unauthorized)?;

    let uuid: uuid::Uuid = session_id_str
        .parse()
        .map_err(|_| AuthError::Unauthorized)?;

    Ok(SessionId::from_uuid(uuid))
}
