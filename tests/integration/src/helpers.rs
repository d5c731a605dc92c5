//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, provisioning users,
//! making HTTP requests, and managing test data cleanup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use duck_api::{create_app, create_app_state, create_scheduler, AppState};
use duck_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig as DbSettings, Environment, JwtConfig,
    JwtService, LeaderboardConfig, NotifierConfig, RateLimitConfig, ServerConfig,
};
use duck_core::{DuckId, UserId};
use duck_db::{create_pool, run_migrations, DatabaseConfig, PgPool};
use duck_service::RunOutcome;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::fixtures::unique_suffix;

/// Secret shared by the server under test and the token helper
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Reconciliation ranks the whole `ducks` table; tests that assert on
/// ranks hold this lock so their counters are not reconciled mid-test.
static RANK_LOCK: Mutex<()> = Mutex::const_new(());

/// Hold the rank lock for the rest of a test
pub async fn lock_ranks() -> MutexGuard<'static, ()> {
    RANK_LOCK.lock().await
}

/// A user row plus a bearer token for it
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub display_name: String,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    state: AppState,
    jwt: JwtService,
    users: std::sync::Mutex<Vec<UserId>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let pool = create_pool(&DatabaseConfig::from(&config.database))
            .await
            .context("connecting to DATABASE_URL")?;
        run_migrations(&pool).await?;

        let jwt = JwtService::new(&config.jwt.secret);
        let state = create_app_state(pool.clone(), config)?;
        let app = create_app(state.clone());

        // Bind to an ephemeral port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            pool,
            state,
            jwt,
            users: std::sync::Mutex::new(Vec::new()),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the live WebSocket endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}/api/ws", self.addr)
    }

    /// Insert a user row and issue a token for it.
    ///
    /// Accounts belong to another service, so they are written straight to
    /// the database here.
    pub async fn create_user(&self) -> Result<TestUser> {
        let suffix = unique_suffix();
        let display_name = format!("duck fan {suffix}");
        let email = format!("duckfan{}_{suffix}@example.com", std::process::id());

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(&email)
        .bind(&display_name)
        .fetch_one(&self.pool)
        .await?;
        let id = UserId::new(id);

        if let Ok(mut users) = self.users.lock() {
            users.push(id);
        }

        let token = self.jwt.issue(id, &email, 3600)?;
        Ok(TestUser {
            id,
            display_name,
            token,
        })
    }

    /// Overwrite a duck's counters without going through reactions
    pub async fn set_counters(&self, duck_id: DuckId, likes: i64, dislikes: i64) -> Result<()> {
        sqlx::query("UPDATE ducks SET likes_count = $2, dislikes_count = $3 WHERE id = $1")
            .bind(duck_id.into_inner())
            .bind(likes)
            .bind(dislikes)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Run one leaderboard reconciliation in the foreground
    pub async fn reconcile(&self) -> RunOutcome {
        create_scheduler(&self.state).run_once().await
    }

    /// Delete every user created through this server; ducks and reactions
    /// cascade.
    pub async fn cleanup(&self) -> Result<()> {
        let ids: Vec<i64> = match self.users.lock() {
            Ok(mut users) => users.drain(..).map(UserId::into_inner).collect(),
            Err(_) => return Ok(()),
        };
        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodiless PUT request with auth token
    pub async fn put_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.put(&url).bearer_auth(token).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a PUT request with auth token and JSON body
    pub async fn put_auth_json<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).bearer_auth(token).send().await?)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

    Ok(AppConfig {
        app: AppSettings {
            name: "duck-party-integration".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DbSettings {
            url,
            max_connections: 10,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        leaderboard: LeaderboardConfig::default(),
        notifier: NotifierConfig::default(),
    })
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
