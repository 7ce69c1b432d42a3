use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::{
    models::{AuthResponse, LoginRequest, RegisterRequest, SanitizedUser, TokenResponse, User, UserPatch},
    services::{JwtService, ServiceError},
    store::UserStore,
    utils::{hash_password, verify_password, Password, PasswordHashString},
};

/// Session flows: registration, login, refresh-token exchange, logout.
///
/// Exactly one refresh token is valid per account at any time; it is
/// stored textually on the account record and every issuance overwrites
/// the previous value. Overwriting is the only server-side revocation
/// mechanism - access tokens die by expiry alone.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, ServiceError> {
        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(&Password::new(req.password))?;

        let user = self
            .store
            .create(User::new(
                req.email,
                password_hash.into_string(),
                req.display_name,
            ))
            .await?;

        let tokens = self.issue_session(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(AuthResponse {
            user: user.sanitized(),
            tokens,
        })
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ServiceError> {
        // Unknown email and wrong password collapse into the same failure;
        // the response must not reveal which one it was.
        let user = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        verify_password(
            &Password::new(req.password),
            &PasswordHashString::new(user.password_hash.clone()),
        )
        .map_err(|_| ServiceError::InvalidCredentials)?;

        let tokens = self.issue_session(&user).await?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(AuthResponse {
            user: user.sanitized(),
            tokens,
        })
    }

    /// Exchange a refresh token for a fresh token pair, rotating the
    /// stored value. The presented token must textually equal the stored
    /// one: a token rotated away by a later issuance is rejected here.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ServiceError> {
        let claims = self.jwt.validate_refresh_token(refresh_token)?;

        let user = self
            .store
            .find_by_id(&claims.sub)
            .await?
            .ok_or(ServiceError::UnknownIdentity)?;

        let stored = user.refresh_token.as_deref().ok_or(ServiceError::InvalidToken)?;
        let matches: bool = stored.as_bytes().ct_eq(refresh_token.as_bytes()).into();
        if !matches {
            tracing::warn!(user_id = %user.id, "stale refresh token presented");
            return Err(ServiceError::InvalidToken);
        }

        let tokens = self.issue_session(&user).await?;

        tracing::info!(user_id = %user.id, "token refreshed");

        Ok(tokens)
    }

    /// Clear the stored refresh token; every previously issued refresh
    /// token stops exchanging from this point on.
    pub async fn logout(&self, user_id: &str) -> Result<(), ServiceError> {
        let updated = self
            .store
            .update(user_id, UserPatch::refresh_token(None))
            .await?;

        if updated.is_none() {
            // Account deleted mid-session; nothing left to revoke.
            tracing::debug!(user_id, "logout for unknown account");
        } else {
            tracing::info!(user_id, "user logged out");
        }

        Ok(())
    }

    /// Current identity view for an authenticated request.
    pub async fn profile(&self, user_id: &str) -> Result<SanitizedUser, ServiceError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::UnknownIdentity)?;

        Ok(user.sanitized())
    }

    /// Issue a token pair and persist the refresh token, overwriting any
    /// previously stored value for the account.
    async fn issue_session(&self, user: &User) -> Result<TokenResponse, ServiceError> {
        let (access_token, refresh_token) = self.jwt.generate_token_pair(&user.id, user.role)?;

        self.store
            .update(&user.id, UserPatch::refresh_token(Some(refresh_token.clone())))
            .await?
            .ok_or_else(|| {
                ServiceError::Internal(anyhow::anyhow!(
                    "account {} disappeared while persisting refresh token",
                    user.id
                ))
            })?;

        Ok(TokenResponse::new(
            access_token,
            refresh_token,
            self.jwt.access_token_expiry_seconds(),
        ))
    }
}
