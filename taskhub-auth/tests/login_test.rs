mod common;

use taskhub_auth::{
    models::{LoginRequest, RegisterRequest, Role},
    services::ServiceError,
    store::UserStore,
};

#[tokio::test]
async fn register_issues_a_usable_session() {
    let (state, _store) = common::test_state();
    let auth = common::register_user(&state, "new@example.com", "s3cret-pass").await;

    assert_eq!(auth.user.email, "new@example.com");
    assert_eq!(auth.user.role, Role::User);
    assert_eq!(auth.tokens.token_type, "Bearer");

    let claims = state
        .jwt
        .validate_access_token(&auth.tokens.access_token)
        .unwrap();
    assert_eq!(claims.sub, auth.user.id);
    assert_eq!(claims.role, Role::User);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (state, _store) = common::test_state();
    common::register_user(&state, "dup@example.com", "s3cret-pass").await;

    let second = state
        .auth
        .register(RegisterRequest {
            email: "dup@example.com".to_string(),
            password: "another-pass".to_string(),
            display_name: "Someone Else".to_string(),
        })
        .await;

    assert!(matches!(second, Err(ServiceError::EmailAlreadyRegistered)));
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let (state, _store) = common::test_state();
    let registered = common::register_user(&state, "login@example.com", "s3cret-pass").await;

    let auth = state
        .auth
        .login(LoginRequest {
            email: "login@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(auth.user.id, registered.user.id);

    let claims = state
        .jwt
        .validate_access_token(&auth.tokens.access_token)
        .unwrap();
    assert_eq!(claims.sub, registered.user.id);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let (state, _store) = common::test_state();
    common::register_user(&state, "victim@example.com", "s3cret-pass").await;

    let wrong_password = state
        .auth
        .login(LoginRequest {
            email: "victim@example.com".to_string(),
            password: "wrong-pass".to_string(),
        })
        .await;
    assert!(matches!(
        wrong_password,
        Err(ServiceError::InvalidCredentials)
    ));

    let unknown_email = state
        .auth
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await;
    assert!(matches!(
        unknown_email,
        Err(ServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn profile_reflects_the_stored_account() {
    let (state, store) = common::test_state();
    let auth = common::register_user(&state, "me@example.com", "s3cret-pass").await;

    let profile = state.auth.profile(&auth.user.id).await.unwrap();
    assert_eq!(profile.email, "me@example.com");

    store.delete(&auth.user.id).await.unwrap();

    assert!(matches!(
        state.auth.profile(&auth.user.id).await,
        Err(ServiceError::UnknownIdentity)
    ));
}
