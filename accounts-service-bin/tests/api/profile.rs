use serde_json::{Value, json};

use crate::helpers::{TestApp, get_random_email, signup_user};

#[tokio::test]
async fn profile_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.get_profile(None).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn profile_rejects_a_garbage_token() {
    let app = TestApp::new().await;

    let response = app.get_profile(Some("not-a-token")).await;
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Token is invalid or expired."));
}

#[tokio::test]
async fn profile_rejects_a_refresh_token_used_as_access_token() {
    let app = TestApp::new().await;
    let (_, _, refresh) = signup_user(&app, &get_random_email(), "Str0ng!Pass").await;

    let response = app.get_profile(Some(&refresh)).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn profile_returns_the_callers_public_fields() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let (user_id, access, _) = signup_user(&app, &email, "Str0ng!Pass").await;

    let response = app.get_profile(Some(&access)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Profile retrieved successfully."));
    let user = &body["data"]["user"];
    assert_eq!(user["id"], json!(user_id.to_string()));
    assert_eq!(user["email"], json!(email));
    assert_eq!(user["is_active"], json!(true));
    assert!(user["date_joined"].is_string());
    // Internal flags are not exposed.
    assert!(user.get("is_staff").is_none());
    assert!(user.get("is_superuser").is_none());
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let (_, access, _) = signup_user(&app, &email, "Str0ng!Pass").await;

    let response = app
        .put_profile(&access, &json!({ "first_name": "Grace" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Profile updated successfully."));
    assert_eq!(body["data"]["user"]["first_name"], json!("Grace"));
    assert_eq!(body["data"]["user"]["email"], json!(email));
}

#[tokio::test]
async fn update_normalizes_a_new_email() {
    let app = TestApp::new().await;
    let (_, access, _) = signup_user(&app, &get_random_email(), "Str0ng!Pass").await;

    let response = app
        .put_profile(&access, &json!({ "email": " New.Address@Example.COM " }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["user"]["email"], json!("new.address@example.com"));
}

#[tokio::test]
async fn update_to_an_email_owned_by_another_user_fails() {
    let app = TestApp::new().await;
    let other_email = get_random_email();
    signup_user(&app, &other_email, "Str0ng!Pass").await;
    let (_, access, _) = signup_user(&app, &get_random_email(), "Str0ng!Pass").await;

    let response = app.put_profile(&access, &json!({ "email": other_email })).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["email"][0],
        json!("A user with this email already exists.")
    );
}

#[tokio::test]
async fn update_keeping_own_email_is_allowed() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let (_, access, _) = signup_user(&app, &email, "Str0ng!Pass").await;

    let response = app
        .put_profile(&access, &json!({ "email": email, "last_name": "Hopper" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["user"]["last_name"], json!("Hopper"));
}
