mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use taskhub_auth::{
    middleware::{auth_middleware, require_role},
    models::{Role, UserPatch},
    store::UserStore,
    AppState,
};
use tower::util::ServiceExt;

/// Role-gated route behind the full pipeline: resolver first, gate second.
fn admin_app(state: AppState) -> Router {
    Router::new()
        .route("/admin", get(|| async { "admin" }))
        .layer(from_fn(|req, next| {
            require_role(vec![Role::Admin, Role::Manager], req, next)
        }))
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

async fn get_with_token(app: Router, token: &str) -> StatusCode {
    app.oneshot(
        Request::builder()
            .uri("/admin")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
    .status()
}

#[tokio::test]
async fn plain_user_is_forbidden() {
    let (state, _store) = common::test_state();
    let auth = common::register_user(&state, "user@example.com", "s3cret-pass").await;

    let status = get_with_token(admin_app(state), &auth.tokens.access_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn elevated_role_passes() {
    let (state, store) = common::test_state();
    let auth = common::register_user(&state, "manager@example.com", "s3cret-pass").await;

    // The gate reads the role from the resolved identity, not from the
    // token claims, so a promotion applies to tokens already issued.
    store
        .update(
            &auth.user.id,
            UserPatch {
                role: Some(Role::Manager),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();

    let status = get_with_token(admin_app(state), &auth.tokens.access_token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn gate_without_resolved_identity_is_unauthenticated() {
    // The gate wired without the resolver in front: defensive failure is
    // 401, not 403.
    let app: Router = Router::new()
        .route("/admin", get(|| async { "admin" }))
        .layer(from_fn(|req, next| {
            require_role(vec![Role::Admin], req, next)
        }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_role_set_only_requires_authentication() {
    let (state, _store) = common::test_state();
    let auth = common::register_user(&state, "any@example.com", "s3cret-pass").await;

    let app = Router::new()
        .route("/admin", get(|| async { "any" }))
        .layer(from_fn(|req, next| require_role(vec![], req, next)))
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    let status = get_with_token(app, &auth.tokens.access_token).await;
    assert_eq!(status, StatusCode::OK);
}
