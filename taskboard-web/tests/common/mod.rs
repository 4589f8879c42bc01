/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation with a known password
/// - Session cookie issuance
/// - Request and response helpers
///
/// Tests that need a database call [`TestContext::new`] and return early
/// when it yields `None`, so the suite stays runnable on machines with
/// no `DATABASE_URL` configured.

use axum::body::Body;
use axum::http::{header, Request, Response};
use sqlx::PgPool;
use taskboard_shared::auth::password::hash_password;
use taskboard_shared::models::session::Session;
use taskboard_shared::models::task::{CreateTask, Task};
use taskboard_shared::models::user::{CreateUser, User};
use taskboard_web::app::{build_router, AppState, SESSION_COOKIE};
use taskboard_web::config::{Config, DatabaseConfig, SessionConfig, WebConfig};
use uuid::Uuid;

/// Password every test user is created with
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub user: User,
    pub cookie: String,
}

impl TestContext {
    /// Creates a new test context with a fresh user and a live session
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("DATABASE_URL").ok()?;

        let db = PgPool::connect(&database_url).await.unwrap();

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../taskboard-shared/migrations")
            .run(&db)
            .await
            .unwrap();

        let config = Config {
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                production: false,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            session: SessionConfig { ttl_hours: 1 },
        };

        let user = create_user(&db, TEST_PASSWORD).await;
        let cookie = issue_session(&db, user.id).await;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext {
            db,
            app,
            user,
            cookie,
        })
    }

    /// Cleans up test data
    ///
    /// Deleting the user cascades to their sessions and tasks.
    pub async fn cleanup(&self) {
        User::delete(&self.db, self.user.id).await.unwrap();
    }
}

/// Creates a user with a unique username and the given password
pub async fn create_user(db: &PgPool, password: &str) -> User {
    User::create(
        db,
        CreateUser {
            username: format!("test-{}", Uuid::new_v4()),
            password_hash: hash_password(password).unwrap(),
        },
    )
    .await
    .unwrap()
}

/// Issues a session for the user and returns the Cookie header value
pub async fn issue_session(db: &PgPool, user_id: Uuid) -> String {
    let session = Session::create(db, user_id, chrono::Duration::hours(1))
        .await
        .unwrap();
    format!("{}={}", SESSION_COOKIE, session.token)
}

/// Creates a task owned by the given user, straight through the store
pub async fn create_task(db: &PgPool, owner: Uuid, title: &str, complete: bool) -> Task {
    Task::create(
        db,
        owner,
        CreateTask {
            title: title.to_string(),
            description: String::new(),
            complete,
        },
    )
    .await
    .unwrap()
}

/// Builds a GET request carrying the session cookie
pub fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Builds a form POST request carrying the session cookie
pub fn post_form(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a form POST request with no cookie
pub fn post_form_anonymous(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Reads the full response body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Extracts the session cookie pair from a Set-Cookie header, if present
pub fn session_cookie_from_response(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = value.split(';').next()?.trim();
    pair.starts_with(SESSION_COOKIE).then(|| pair.to_string())
}
