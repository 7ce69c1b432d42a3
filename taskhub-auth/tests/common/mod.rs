use std::sync::Arc;

use taskhub_auth::{
    config::{AuthConfig, Environment, JwtConfig},
    models::{AuthResponse, RegisterRequest},
    store::MemoryUserStore,
    AppState,
};
use taskhub_core::config::Config;

pub fn test_config() -> AuthConfig {
    AuthConfig {
        common: Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "taskhub-test".to_string(),
        service_version: "0.0.0".to_string(),
        log_level: "error".to_string(),
        jwt: JwtConfig {
            access_token_secret: "test-access-secret-0123456789abcdef".to_string(),
            refresh_token_secret: "test-refresh-secret-0123456789abcdef".to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Fresh state over an empty in-memory store. The store handle is
/// returned so tests can mutate accounts behind the pipeline's back.
pub fn test_state() -> (AppState, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(test_config(), store.clone());
    (state, store)
}

#[allow(dead_code)]
pub async fn register_user(state: &AppState, email: &str, password: &str) -> AuthResponse {
    state
        .auth
        .register(RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: "Test User".to_string(),
        })
        .await
        .expect("registration failed")
}
