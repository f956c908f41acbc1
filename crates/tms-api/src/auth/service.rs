//! Authentication service layer
//!
//! Business logic for account registration and login. Registration enforces
//! unique usernames and emails, stores an Argon2id hash, and signs the new
//! account in immediately; both paths end by issuing a bearer token.

use super::jwt::TokenCodec;
use super::password::{hash_password, verify_password};
use crate::audit::{audit_log, AuditEvent};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tms_core::{NewUser, User, UserStore, ROLE_USER};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Account registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_username"))]
    #[schema(example = "alice")]
    pub username: String,

    #[validate(
        email(message = "Email must be valid"),
        length(max = 50, message = "Email cannot exceed 50 characters")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

// A length check alone lets whitespace-only values through, so both
// fields get the blank check before the range check.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Username is required".into());
        return Err(err);
    }
    if !(3..=20).contains(&username.chars().count()) {
        let mut err = ValidationError::new("length");
        err.message = Some("Username must be between 3 and 20 characters".into());
        return Err(err);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Password is required".into());
        return Err(err);
    }
    if !(6..=40).contains(&password.chars().count()) {
        let mut err = ValidationError::new("length");
        err.message = Some("Password must be between 6 and 40 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful authentication response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT bearer token
    pub token: String,
    /// Token scheme, always "Bearer"
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: String,
    pub email: String,
}

impl TokenResponse {
    fn new(token: String, user: &User) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenCodec,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenCodec) -> Self {
        Self { users, tokens }
    }

    /// Register a new account and sign it in
    ///
    /// # Arguments
    ///
    /// * `request` - Registration details, already validated at the edge
    ///
    /// # Returns
    ///
    /// * `Ok(TokenResponse)` - Bearer token for the new account
    /// * `Err(AppError)` - Conflict when the username or email is taken
    pub async fn register(&self, request: RegisterRequest) -> Result<TokenResponse, AppError> {
        if self.users.exists_by_username(&request.username).await? {
            audit_log(&AuditEvent::RegistrationFailure {
                username: request.username.clone(),
                reason: "Username is already taken".to_string(),
            });
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        if self.users.exists_by_email(&request.email).await? {
            audit_log(&AuditEvent::RegistrationFailure {
                username: request.username.clone(),
                reason: "Email is already in use".to_string(),
            });
            return Err(AppError::Conflict("Email is already in use".to_string()));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;

        let user = self
            .users
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                roles: ROLE_USER.to_string(),
            })
            .await?;

        audit_log(&AuditEvent::Registration {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.roles.clone(),
        });

        let token = self
            .tokens
            .issue(&user.username)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {e}")))?;

        Ok(TokenResponse::new(token, &user))
    }

    /// Authenticate with username and password
    ///
    /// An unknown username and a wrong password both map to the same 401 so
    /// the response does not reveal which accounts exist.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AppError> {
        let Some(user) = self.users.find_by_username(&request.username).await? else {
            audit_log(&AuditEvent::LoginFailure {
                username: request.username.clone(),
                reason: "Unknown username".to_string(),
            });
            return Err(AppError::Unauthorized);
        };

        let password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {e}")))?;

        if !password_valid {
            audit_log(&AuditEvent::LoginFailure {
                username: request.username.clone(),
                reason: "Wrong password".to_string(),
            });
            return Err(AppError::Unauthorized);
        }

        let token = self
            .tokens
            .issue(&user.username)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {e}")))?;

        audit_log(&AuditEvent::LoginSuccess {
            user_id: user.id,
            username: user.username.clone(),
        });

        Ok(TokenResponse::new(token, &user))
    }
}
