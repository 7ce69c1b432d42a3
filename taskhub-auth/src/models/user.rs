//! User model - account records and their request/response views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role codes. Serialized in upper case for wire compatibility
/// with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    /// Roles permitted to act on resources they do not own.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "MANAGER" => Ok(Role::Manager),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User account record as held by the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub avatar: Option<String>,
    /// The single currently valid refresh token; `None` after logout.
    /// Overwritten on every issuance, which is the only server-side
    /// revocation mechanism.
    pub refresh_token: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl User {
    /// Create a new account with the default role.
    pub fn new(email: String, password_hash: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            display_name,
            role: Role::User,
            avatar: None,
            refresh_token: None,
            created_utc: now,
            updated_utc: now,
        }
    }

    /// Convert to the sanitized view (no credential material).
    pub fn sanitized(&self) -> SanitizedUser {
        SanitizedUser::from(self.clone())
    }
}

/// User view attached to the request context and returned by the API.
/// Excludes the password hash and the stored refresh token.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl From<User> for SanitizedUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
            avatar: u.avatar,
            created_utc: u.created_utc,
            updated_utc: u.updated_utc,
        }
    }
}

/// Non-destructive partial update applied by `UserStore::update`.
/// `None` leaves a field untouched; the nested `Option` on nullable
/// fields distinguishes "leave alone" from "clear".
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<Option<String>>,
    pub refresh_token: Option<Option<String>>,
}

impl UserPatch {
    /// Patch that only replaces (or clears) the stored refresh token.
    pub fn refresh_token(value: Option<String>) -> Self {
        Self {
            refresh_token: Some(value),
            ..Self::default()
        }
    }
}

/// Request to register a new account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Request to login with email/password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair returned after successful auth.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Auth response with user info and tokens.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: SanitizedUser,
    pub tokens: TokenResponse,
}
