//! Authentication and authorization module
//!
//! JWT-based authentication with the following components:
//! - Token issuance and validation
//! - Password hashing with Argon2
//! - Request identity filter and role gates
//! - Authentication service for registration and login

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;

pub use jwt::{Claims, TokenCodec, TokenError};
pub use middleware::{identity_filter, require_auth, require_role, AuthError, CurrentUser};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthService, LoginRequest, RegisterRequest, TokenResponse};
