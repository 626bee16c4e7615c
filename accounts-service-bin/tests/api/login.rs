use accounts_core::UserStore;
use serde_json::{Value, json};

use crate::helpers::{TestApp, get_random_email, signup_user};

#[tokio::test]
async fn login_with_correct_credentials_succeeds() {
    let app = TestApp::new().await;
    let email = get_random_email();
    signup_user(&app, &email, "Str0ng!Pass").await;

    let response = app
        .post_login(&json!({ "email": email, "password": "Str0ng!Pass" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Login successful."));
    assert_eq!(body["data"]["user"]["email"], json!(email));
    assert!(body["data"]["tokens"]["access"].is_string());
    assert!(body["data"]["tokens"]["refresh"].is_string());
}

#[tokio::test]
async fn login_normalizes_the_submitted_email() {
    let app = TestApp::new().await;
    signup_user(&app, "case@example.com", "Str0ng!Pass").await;

    let response = app
        .post_login(&json!({ "email": " CASE@Example.COM ", "password": "Str0ng!Pass" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::new().await;
    let email = get_random_email();
    signup_user(&app, &email, "Str0ng!Pass").await;

    let wrong_password = app
        .post_login(&json!({ "email": email, "password": "not-the-password" }))
        .await;
    let unknown_email = app
        .post_login(&json!({ "email": get_random_email(), "password": "Str0ng!Pass" }))
        .await;

    assert_eq!(wrong_password.status().as_u16(), 400);
    assert_eq!(unknown_email.status().as_u16(), 400);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password["errors"]["non_field_errors"][0],
        json!("Invalid email or password.")
    );
}

#[tokio::test]
async fn disabled_account_fails_even_with_correct_password() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let (user_id, _, _) = signup_user(&app, &email, "Str0ng!Pass").await;

    app.user_store.set_active(&[user_id], false).await.unwrap();

    let response = app
        .post_login(&json!({ "email": email, "password": "Str0ng!Pass" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["non_field_errors"][0],
        json!("User account is disabled.")
    );
}
