//! Authentication service
//!
//! There is a single admin account, configured rather than stored: login
//! compares the submitted credentials against configuration and issues a
//! signed access token. No user table, no roles.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    access_token_expiry: i64,
    admin_email: String,
    admin_password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Admin email
    pub exp: i64,
    pub iat: i64,
}

/// Authentication token issued on login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            admin_email: config.admin.email.clone(),
            admin_password: config.admin.password.clone(),
        }
    }

    /// Check the admin credentials and issue an access token
    pub fn login(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        if email != self.admin_email || password != self.admin_password {
            return Err(AppError::InvalidCredentials);
        }

        self.generate_token(email)
    }

    /// Validate an access token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Generate an access token for the admin
    fn generate_token(&self, email: &str) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let expires = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: email.to_string(),
            exp: expires.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }
}
