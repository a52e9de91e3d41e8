use std::env;

use jsonwebtoken::Algorithm;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            // Only HMAC algorithms make sense with a shared secret.
            algorithm: env::var("JWT_ALGORITHM")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|alg| {
                    matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
                })
                .unwrap_or(Algorithm::HS256),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1800), // 30 minutes
        }
    }
}
