/// Application state and router builder
///
/// This module defines the shared application state, the session-cookie
/// authentication middleware, and the function assembling the axum
/// router with all routes and middleware.
///
/// # Router
///
/// ```text
/// /
/// ├── GET  /health              # health check (public)
/// ├── GET/POST /login/          # auth pages (public)
/// ├── GET  /logout/
/// ├── GET/POST /register/
/// ├── GET  /                    # task pages (session required)
/// ├── GET/POST /task-create/
/// ├── GET/POST /task-update/:id/
/// └── GET/POST /task-delete/:id/
/// ```
///
/// A request to a protected route without a valid session never reaches
/// a handler: the middleware answers with a redirect to `/login/`.

use crate::{config::Config, error::PageError, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::models::{session::Session, user::User};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "taskboard_session";

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; `Arc` keeps the
/// clone cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// The authenticated identity, injected into request extensions
///
/// Handlers receive this via `Extension<CurrentUser>`; the core task
/// operations always take the owner id explicitly from here, never from
/// any ambient context.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID
    pub id: Uuid,

    /// Login name, for display
    pub username: String,
}

/// Extracts the session token from the Cookie header, if any
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .map(|token| token.to_string())
    })
}

/// Resolves the current user from the request's session cookie
///
/// Returns `None` for a missing, unknown, or expired session, or when
/// the session's user row has gone away.
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = session_token_from_headers(headers)?;

    let session = Session::find_valid(&state.db, &token).await.ok()??;
    let user = User::find_by_id(&state.db, session.user_id).await.ok()??;

    Some(CurrentUser {
        id: user.id,
        username: user.username,
    })
}

/// Session authentication middleware
///
/// Resolves the cookie to a user and injects `CurrentUser`, or rejects
/// the request with a redirect to the login page before any task store
/// or query service call happens.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, PageError> {
    let user = resolve_user(&state, req.headers())
        .await
        .ok_or(PageError::Unauthenticated)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Public: health check and the auth gateway pages.
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/login/",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route("/logout/", get(routes::auth::logout))
        .route(
            "/register/",
            get(routes::auth::register_form).post(routes::auth::register),
        );

    // Protected: every task page requires a resolved session.
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list))
        .route(
            "/task-create/",
            get(routes::tasks::create_form).post(routes::tasks::create),
        )
        .route(
            "/task-update/:id/",
            get(routes::tasks::update_form).post(routes::tasks::update),
        )
        .route(
            "/task-delete/:id/",
            get(routes::tasks::delete_form).post(routes::tasks::delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.web.production))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_session_token_missing() {
        assert_eq!(session_token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_token_single_cookie() {
        let headers = headers_with_cookie("taskboard_session=abc123");
        assert_eq!(
            session_token_from_headers(&headers),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; taskboard_session=abc123; lang=en");
        assert_eq!(
            session_token_from_headers(&headers),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_session_token_prefix_cookie_does_not_match() {
        // A cookie whose name merely starts with ours must not be picked up.
        let headers = headers_with_cookie("taskboard_session_old=zzz");
        assert_eq!(session_token_from_headers(&headers), None);
    }
}
