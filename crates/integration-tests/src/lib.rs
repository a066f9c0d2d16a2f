//! End-to-end test harness for the Affiliate CRM dashboard.
//!
//! Each test spawns the dashboard in-process on an ephemeral port with the
//! demo credentials, seeded CRM data and no simulated latency, then drives it
//! over HTTP with a cookie-keeping client that does not follow redirects.
//!
//! ```rust,ignore
//! let server = TestServer::spawn().await;
//! let client = server.client();
//! server.login(&client, ADMIN).await;
//! let resp = client.get(server.url("/agents")).send().await?;
//! ```

use std::net::SocketAddr;

use reqwest::{Client, Response, StatusCode, header::LOCATION, redirect::Policy};
use tokio::net::TcpListener;

use affiliate_crm_admin::config::{AdminConfig, LatencyConfig};
use affiliate_crm_admin::state::AppState;

/// Demo admin credentials.
pub const ADMIN: (&str, &str) = ("admin@crm.com", "admin123");
/// Demo agent credentials.
pub const AGENT: (&str, &str) = ("agent@crm.com", "agent123");

/// A dashboard running on a background task.
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    /// Start a dashboard with the default test configuration.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn() -> Self {
        let config = AdminConfig {
            port: 0,
            latency: LatencyConfig::none(),
            ..AdminConfig::default()
        };
        let state = AppState::new(config).expect("Failed to create application state");
        let app = affiliate_crm_admin::app(state);

        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self { addr }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A client with its own cookie jar that reports redirects instead of
    /// following them.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Submit the login form.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn submit_login(&self, client: &Client, email: &str, password: &str) -> Response {
        client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("Failed to submit login form")
    }

    /// Sign in and assert the login succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the login is not answered with a redirect.
    pub async fn login(&self, client: &Client, (email, password): (&str, &str)) {
        let resp = self.submit_login(client, email, password).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login as {email} failed");
    }

    /// GET `path` with `client`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the response is not a redirect.
#[must_use]
pub fn location(resp: &Response) -> String {
    assert!(
        resp.status().is_redirection(),
        "expected a redirect, got {}",
        resp.status()
    );
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
