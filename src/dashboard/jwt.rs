use crate::{prelude::Result, Error};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
struct UserMetadata {
    full_name: Option<String>,
    name: Option<String>,
    preferred_username: Option<String>,
    user_name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawClaims {
    sub: String,
    exp: i64,
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

/// Claims read from a dashboard session token. The signature is not checked;
/// the API does that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: i64,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub username: Option<String>,
}

/// Adds the `Bearer ` scheme unless it is already there.
pub fn bearer(token: &str) -> String {
    let token = token.trim();
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

fn validation(check_expiry: bool) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.validate_exp = check_expiry;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

fn decode_raw(token: &str, check_expiry: bool) -> jsonwebtoken::errors::Result<RawClaims> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    jsonwebtoken::decode::<RawClaims>(token, &DecodingKey::from_secret(&[]), &validation(check_expiry))
        .map(|data| data.claims)
}

impl From<RawClaims> for JwtClaims {
    fn from(raw: RawClaims) -> Self {
        let metadata = raw.user_metadata.unwrap_or_default();
        JwtClaims {
            sub: raw.sub,
            exp: raw.exp,
            email: raw.email,
            full_name: metadata.full_name.or(metadata.name),
            username: metadata.preferred_username.or(metadata.user_name),
        }
    }
}

impl JwtClaims {
    /// Reads the claims whether or not the token has expired.
    pub fn decode(token: &str) -> Result<Self> {
        decode_raw(token, false)
            .map(JwtClaims::from)
            .map_err(|e| Error::Jwt(e.to_string()))
    }

    /// Like [`JwtClaims::decode`], but an expired token is [`Error::JwtExpired`].
    pub fn decode_fresh(token: &str) -> Result<Self> {
        match decode_raw(token, true) {
            Ok(raw) => Ok(raw.into()),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(Error::JwtExpired(JwtClaims::decode(token)?.exp))
            }
            Err(e) => Err(Error::Jwt(e.to_string())),
        }
    }

    /// Seconds until expiry, zero once expired.
    pub fn expires_in(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }
}
