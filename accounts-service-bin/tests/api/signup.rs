use serde_json::{Value, json};

use crate::helpers::{TestApp, signup_body};

#[tokio::test]
async fn signup_stores_lowercase_trimmed_email() {
    let app = TestApp::new().await;

    let body = json!({
        "email": "Foo@Bar.com ",
        "password": "Str0ng!Pass",
        "password_confirm": "Str0ng!Pass",
        "first_name": "A",
        "last_name": "B",
    });
    let response = app.post_signup(&body).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User registered successfully."));
    assert_eq!(body["data"]["user"]["email"], json!("foo@bar.com"));
    assert!(body["data"]["tokens"]["access"].is_string());
    assert!(body["data"]["tokens"]["refresh"].is_string());
}

#[tokio::test]
async fn second_signup_with_same_email_fails_regardless_of_casing() {
    let app = TestApp::new().await;

    let response = app
        .post_signup(&signup_body("taken@example.com", "Str0ng!Pass"))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app
        .post_signup(&signup_body("  TAKEN@Example.COM ", "Other!Pass1"))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["errors"]["email"][0],
        json!("A user with this email already exists.")
    );
}

#[tokio::test]
async fn signup_rejects_mismatched_passwords() {
    let app = TestApp::new().await;

    let body = json!({
        "email": "mismatch@example.com",
        "password": "Str0ng!Pass",
        "password_confirm": "Different!Pass",
        "first_name": "A",
        "last_name": "B",
    });
    let response = app.post_signup(&body).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["password"][0], json!("Password fields didn't match."));
}

#[tokio::test]
async fn signup_rejects_weak_passwords() {
    let app = TestApp::new().await;

    for (password, expected) in [
        ("short1!", "This password is too short. It must contain at least 8 characters."),
        ("2468013579", "This password is entirely numeric."),
        ("password123", "This password is too common."),
    ] {
        let response = app
            .post_signup(&signup_body("weak@example.com", password))
            .await;
        assert_eq!(response.status().as_u16(), 400, "{password}");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errors"]["password"][0], json!(expected), "{password}");
    }
}

#[tokio::test]
async fn signup_requires_names() {
    let app = TestApp::new().await;

    let body = json!({
        "email": "names@example.com",
        "password": "Str0ng!Pass",
        "password_confirm": "Str0ng!Pass",
        "first_name": "",
        "last_name": "B",
    });
    let response = app.post_signup(&body).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["first_name"][0], json!("This field is required."));
}

#[tokio::test]
async fn signup_requires_a_nonempty_email() {
    let app = TestApp::new().await;

    let body = json!({
        "email": "   ",
        "password": "Str0ng!Pass",
        "password_confirm": "Str0ng!Pass",
        "first_name": "A",
        "last_name": "B",
    });
    let response = app.post_signup(&body).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["email"][0], json!("Email is required."));
}
