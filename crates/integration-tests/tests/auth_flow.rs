//! Sign-in, sign-out and session cookie behaviour.

#![allow(clippy::unwrap_used)]

use reqwest::{StatusCode, header::SET_COOKIE};

use affiliate_crm_integration_tests::{ADMIN, AGENT, TestServer, location};

#[tokio::test]
async fn test_login_page_renders() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = server.get(&client, "/login?from=%2Fagents").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Sign in"));
    assert!(body.contains(r#"name="from""#));
    assert!(body.contains("agents"));
    assert!(body.contains("admin@crm.com / admin123"));
}

#[tokio::test]
async fn test_admin_login_lands_on_dashboard_with_welcome() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = server.submit_login(&client, ADMIN.0, ADMIN.1).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");

    let body = server.get(&client, "/dashboard").await.text().await.unwrap();
    assert!(body.contains("Welcome back!"));
    assert!(body.contains("John"));
    assert!(body.contains("Total Agents"));

    // Notices are shown once.
    let body = server.get(&client, "/dashboard").await.text().await.unwrap();
    assert!(!body.contains("Welcome back!"));
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = server.submit_login(&client, "  Agent@CRM.com ", AGENT.1).await;
    assert_eq!(location(&resp), "/dashboard");

    let body = server.get(&client, "/dashboard").await.text().await.unwrap();
    assert!(body.contains("Assigned Customers"));
}

#[tokio::test]
async fn test_wrong_password_shows_login_failed() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = server.submit_login(&client, ADMIN.0, "wrong").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Login Failed"));
    assert!(body.contains("Invalid email or password"));

    let resp = server.submit_login(&client, "nobody@crm.com", ADMIN.1).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Still signed out.
    let resp = server.get(&client, "/dashboard").await;
    assert_eq!(location(&resp), "/login?from=%2Fdashboard");
}

#[tokio::test]
async fn test_blank_fields_fail_validation() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = server.submit_login(&client, ADMIN.0, "").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Validation Error"));
    assert!(body.contains("Please enter both email and password."));
    assert!(body.contains(r#"value="admin@crm.com""#));
}

#[tokio::test]
async fn test_login_returns_to_requested_page() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = client
        .post(server.url("/login"))
        .form(&[
            ("email", ADMIN.0),
            ("password", ADMIN.1),
            ("from", "/customers?status=pending"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/customers?status=pending");
}

#[tokio::test]
async fn test_login_ignores_external_return_location() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = client
        .post(server.url("/login"))
        .form(&[("email", ADMIN.0), ("password", ADMIN.1), ("from", "//evil.example")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/dashboard");
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let resp = server.submit_login(&client, ADMIN.0, ADMIN.1).await;
    let cookie = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("crm_session="))
        .unwrap()
        .to_string();

    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_logout_requires_login_again() {
    let server = TestServer::spawn().await;
    let client = server.client();
    server.login(&client, ADMIN).await;

    let resp = client.post(server.url("/logout")).send().await.unwrap();
    assert_eq!(location(&resp), "/login");

    let resp = server.get(&client, "/dashboard").await;
    assert_eq!(location(&resp), "/login?from=%2Fdashboard");
}

#[tokio::test]
async fn test_sessions_are_per_client() {
    let server = TestServer::spawn().await;
    let admin = server.client();
    let other = server.client();
    server.login(&admin, ADMIN).await;

    assert_eq!(server.get(&admin, "/agents").await.status(), StatusCode::OK);
    assert_eq!(
        location(&server.get(&other, "/agents").await),
        "/login?from=%2Fagents"
    );
}
