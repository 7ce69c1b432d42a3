use taskhub_core::axum::{extract::Request, middleware::Next, response::Response};
use taskhub_core::error::AppError;

use crate::{
    models::{Role, SanitizedUser},
    services::ServiceError,
};

/// Gate a resolved identity on a required role set.
///
/// An empty `required` slice is an authentication-only gate: any resolved
/// identity passes. A gate reached without a resolved identity fails as
/// unauthenticated, not forbidden.
pub fn check_roles(
    identity: Option<&SanitizedUser>,
    required: &[Role],
) -> Result<(), ServiceError> {
    let user = identity.ok_or(ServiceError::AuthenticationRequired)?;

    if !required.is_empty() && !required.contains(&user.role) {
        tracing::warn!(user_id = %user.id, role = %user.role, "insufficient role for request");
        return Err(ServiceError::InsufficientPermissions);
    }

    Ok(())
}

/// Middleware form of the role gate; layer it after `auth_middleware`:
///
/// ```ignore
/// Router::new()
///     .route("/users", get(list_users))
///     .layer(from_fn(|req, next| require_role(vec![Role::Admin, Role::Manager], req, next)))
///     .layer(from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn require_role(
    required: Vec<Role>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_roles(req.extensions().get::<SanitizedUser>(), &required)?;

    Ok(next.run(req).await)
}

/// Ownership gate for mutations on owned resources: the owner may act on
/// their own resource, an elevated role on any. Identity-equality OR
/// elevated role, never both required.
pub fn check_owner(identity: &SanitizedUser, owner_id: &str) -> Result<(), ServiceError> {
    if identity.id == owner_id || identity.role.is_elevated() {
        return Ok(());
    }

    tracing::warn!(user_id = %identity.id, owner_id, "ownership check failed");
    Err(ServiceError::InsufficientPermissions)
}
