mod common;

use taskhub_auth::{services::ServiceError, store::UserStore};

#[tokio::test]
async fn rotation_invalidates_the_previous_refresh_token() {
    let (state, _store) = common::test_state();
    let auth = common::register_user(&state, "rotate@example.com", "s3cret-pass").await;
    let first = auth.tokens.refresh_token;

    let second = state.auth.refresh(&first).await.unwrap().refresh_token;
    assert_ne!(first, second);

    // The first token still carries a valid signature, but it no longer
    // matches the stored value.
    let stale = state.auth.refresh(&first).await;
    assert!(matches!(stale, Err(ServiceError::InvalidToken)));

    // The current token keeps working.
    assert!(state.auth.refresh(&second).await.is_ok());
}

#[tokio::test]
async fn login_overwrites_the_stored_refresh_token() {
    let (state, _store) = common::test_state();
    let registered = common::register_user(&state, "relogin@example.com", "s3cret-pass").await;

    let logged_in = state
        .auth
        .login(taskhub_auth::models::LoginRequest {
            email: "relogin@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .unwrap();

    assert!(matches!(
        state.auth.refresh(&registered.tokens.refresh_token).await,
        Err(ServiceError::InvalidToken)
    ));
    assert!(state.auth.refresh(&logged_in.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn logout_revokes_every_outstanding_refresh_token() {
    let (state, _store) = common::test_state();
    let auth = common::register_user(&state, "logout@example.com", "s3cret-pass").await;

    state.auth.logout(&auth.user.id).await.unwrap();

    assert!(matches!(
        state.auth.refresh(&auth.tokens.refresh_token).await,
        Err(ServiceError::InvalidToken)
    ));
}

#[tokio::test]
async fn refresh_for_deleted_account_fails_closed() {
    let (state, store) = common::test_state();
    let auth = common::register_user(&state, "gone@example.com", "s3cret-pass").await;

    store.delete(&auth.user.id).await.unwrap();

    assert!(matches!(
        state.auth.refresh(&auth.tokens.refresh_token).await,
        Err(ServiceError::UnknownIdentity)
    ));
}

#[tokio::test]
async fn malformed_refresh_token_is_rejected() {
    let (state, _store) = common::test_state();

    assert!(matches!(
        state.auth.refresh("not-a-jwt").await,
        Err(ServiceError::InvalidToken)
    ));
}

#[tokio::test]
async fn access_token_does_not_exchange_as_refresh_token() {
    let (state, _store) = common::test_state();
    let auth = common::register_user(&state, "cross@example.com", "s3cret-pass").await;

    assert!(matches!(
        state.auth.refresh(&auth.tokens.access_token).await,
        Err(ServiceError::InvalidToken)
    ));
}
