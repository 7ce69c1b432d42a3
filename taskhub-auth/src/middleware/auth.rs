use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use taskhub_core::error::AppError;

use crate::{
    models::SanitizedUser,
    services::{JwtService, ServiceError},
    store::UserStore,
    AppState,
};

/// Resolve a raw Authorization header into a sanitized user record.
///
/// The bearer token is only trusted as far as its signature; the account
/// must still exist in the store. A token for a deleted account fails
/// closed as unauthenticated.
pub async fn resolve_identity(
    jwt: &JwtService,
    store: &dyn UserStore,
    authorization: Option<&str>,
) -> Result<SanitizedUser, ServiceError> {
    let token = authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ServiceError::MissingCredentials)?;

    let claims = jwt.validate_access_token(token)?;

    let user = store
        .find_by_id(&claims.sub)
        .await?
        .ok_or(ServiceError::UnknownIdentity)?;

    Ok(user.sanitized())
}

/// Middleware to require authentication. Attaches the resolved identity
/// to request extensions for handlers and downstream gates.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = resolve_identity(&state.jwt, state.store.as_ref(), authorization)
        .await
        .map_err(|err| {
            if let ServiceError::Store(ref e) = err {
                tracing::error!(error = %e, "user store error during authentication");
            }
            AppError::from(err)
        })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Extractor to easily get the resolved identity in handlers.
pub struct AuthUser(pub SanitizedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<SanitizedUser>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Auth identity missing from request extensions"
            ))
        })?;

        Ok(AuthUser(user.clone()))
    }
}
