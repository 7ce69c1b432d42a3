//! taskhub-auth: bearer-token authentication and role-based authorization.
//!
//! Bootstrap sketch:
//!
//! ```ignore
//! let config = AuthConfig::from_env()?;
//! taskhub_core::observability::init_tracing(&config.service_name, &config.log_level);
//!
//! let state = AppState::new(config, Arc::new(MemoryUserStore::new()));
//! let app = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(from_fn(|req, next| require_role(vec![Role::Admin, Role::Manager], req, next)))
//!     .layer(from_fn_with_state(state.clone(), auth_middleware))
//!     .with_state(state);
//! ```
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::{AuthService, JwtService};
use crate::store::UserStore;

/// Shared state for the authentication pipeline. Cloned into every
/// middleware invocation; all members are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: AuthConfig,
    pub store: Arc<dyn UserStore>,
    pub jwt: JwtService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(config: AuthConfig, store: Arc<dyn UserStore>) -> Self {
        let jwt = JwtService::new(&config.jwt);
        let auth = AuthService::new(store.clone(), jwt.clone());

        Self {
            config,
            store,
            jwt,
            auth,
        }
    }
}
