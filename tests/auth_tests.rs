mod test_utils;

use serde_json::Value;
use test_utils::{factories::DEFAULT_PASSWORD, location, TestApp};

fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("access_token="))
        .map(str::to_string)
}

#[actix_rt::test]
async fn public_routes_are_open() {
    let app = TestApp::spawn().await;

    for path in ["/", "/health", "/sign-in"] {
        let response = app.get(path).await;
        assert_eq!(response.status().as_u16(), 200, "{path}");
    }

    let health: Value = app.get("/health").await.json().await.unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "OK");
}

#[actix_rt::test]
async fn sign_in_page_echoes_next() {
    let app = TestApp::spawn().await;

    let body: Value = app
        .get("/sign-in?next=/talent/get-skills")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["next"], "/talent/get-skills");
}

#[actix_rt::test]
async fn form_sign_in_sets_the_session_cookie() {
    let app = TestApp::spawn().await;
    app.create_person("jane");

    let form = [
        ("username", "jane"),
        ("password", DEFAULT_PASSWORD),
        ("next", "/talent/get-skills"),
    ];
    let response = app.post_form_as(None, "/sign-in", &form).await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), "/talent/get-skills");

    let cookie = session_cookie(&response).expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    let pair = cookie.split(';').next().unwrap().to_string();

    let response = app
        .client
        .get(app.url("/talent/get-skills"))
        .header("Cookie", pair)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_rt::test]
async fn foreign_next_falls_back_to_home() {
    let app = TestApp::spawn().await;
    app.create_person("jane");

    let form = [
        ("username", "jane"),
        ("password", DEFAULT_PASSWORD),
        ("next", "https://evil.example.com/"),
    ];
    let response = app.post_form_as(None, "/sign-in", &form).await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), "/");
}

#[actix_rt::test]
async fn json_sign_in_returns_a_bearer_token() {
    let app = TestApp::spawn().await;
    app.create_person("jane");

    let response = app
        .client
        .post(app.url("/sign-in"))
        .json(&serde_json::json!({"username": "jane", "password": DEFAULT_PASSWORD}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token_type"], "Bearer");
    let token = body["access_token"].as_str().unwrap();

    let response = app
        .client
        .get(app.url("/talent/get-current-skills"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_rt::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    app.create_person("jane");

    for username in ["jane", "nobody"] {
        let form = [("username", username), ("password", "not-the-password")];
        let response = app.post_form_as(None, "/sign-in", &form).await;
        assert_eq!(response.status().as_u16(), 401, "{username}");
        assert!(session_cookie(&response).is_none());
    }
}

#[actix_rt::test]
async fn inactive_accounts_cannot_sign_in() {
    let app = TestApp::spawn().await;
    let jane = app.create_person("jane");
    app.store
        .tables
        .lock()
        .users
        .iter_mut()
        .filter(|u| u.id == jane.user.id)
        .for_each(|u| u.is_active = false);

    let form = [("username", "jane"), ("password", DEFAULT_PASSWORD)];
    let response = app.post_form_as(None, "/sign-in", &form).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[actix_rt::test]
async fn sign_out_clears_the_cookie() {
    let app = TestApp::spawn().await;

    let response = app.post_form_as(None, "/sign-out", &[]).await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), "/sign-in");
    let cookie = session_cookie(&response).expect("removal cookie");
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[actix_rt::test]
async fn repeated_sign_in_attempts_are_rate_limited() {
    let app = TestApp::spawn_with(|config| config.sign_in_rate_limit = 2).await;
    app.create_person("jane");

    let form = [("username", "jane"), ("password", "wrong")];
    for _ in 0..2 {
        let response = app.post_form_as(None, "/sign-in", &form).await;
        assert_eq!(response.status().as_u16(), 401);
    }

    let response = app.post_form_as(None, "/sign-in", &form).await;
    assert_eq!(response.status().as_u16(), 429);
    assert!(response.headers().contains_key("retry-after"));
}

#[actix_rt::test]
async fn forged_tokens_are_sent_to_sign_in() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/talent/get-skills"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), "/sign-in?next=/talent/get-skills");
}
