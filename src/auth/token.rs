use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity tokens are valid for one hour from issuance.
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Represents the claims encoded within an identity token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Email address of the authenticated user.
    pub email: String,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed, time-limited identity tokens.
///
/// The signing secret is supplied once at construction from [`Config`],
/// never looked up ambiently at call time.
///
/// [`Config`]: crate::config::Config
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed token asserting the given identity, expiring one hour
    /// from now.
    pub fn issue(&self, user_id: i32, email: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            iat: now as usize,
            exp: (now + TOKEN_TTL_SECS) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            log::error!("failed to sign identity token: {}", e);
            AppError::Internal("token signing failed".into())
        })
    }

    /// Verifies a token string against the signing secret and current time.
    ///
    /// Returns the decoded claims on success. Any failure (malformed input,
    /// bad signature, expired token) collapses to `None`. The caller decides
    /// the HTTP consequence and the reason never crosses this boundary.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}
