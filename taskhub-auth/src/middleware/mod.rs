pub mod auth;
pub mod authz;

pub use auth::{auth_middleware, resolve_identity, AuthUser};
pub use authz::{check_owner, check_roles, require_role};
