/// Authentication page handlers
///
/// The auth gateway of the application: registration, login, and logout.
/// These pages are public; the task pages never see a request that did
/// not pass through a session issued here.
///
/// # Routes
///
/// - `GET/POST /login/` — login form; redirects authenticated users home
/// - `GET /logout/` — revokes the session and clears the cookie
/// - `GET/POST /register/` — registration form; logs the new user in
///
/// Failed logins re-render the form with a single generic message so the
/// response does not reveal whether the username exists.

use crate::{
    app::{resolve_user, AppState, SESSION_COOKIE},
    error::{PageError, PageResult},
    routes::form_errors,
    views,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use taskboard_shared::auth::password::{hash_password, validate_password, verify_password};
use taskboard_shared::models::{
    session::Session,
    user::{CreateUser, User, UserError},
};
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login form body
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login name
    pub username: String,

    /// Plaintext password (only ever held for the duration of this request)
    pub password: String,
}

/// Registration form body
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Desired login name
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,

    /// Password
    pub password1: String,

    /// Password confirmation
    pub password2: String,
}

/// Builds the Set-Cookie value for a fresh session
fn session_cookie(token: &str, ttl: chrono::Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.num_seconds()
    )
}

/// Builds the Set-Cookie value that removes the session cookie
fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Attaches a Set-Cookie header to a redirect response
fn redirect_with_cookie(location: &str, cookie: &str) -> PageResult<Response> {
    let mut response = Redirect::to(location).into_response();
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| PageError::Internal(format!("Invalid cookie value: {}", e)))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}

/// Issues a session for `user` and redirects home with the cookie set
async fn start_session(state: &AppState, user: &User) -> PageResult<Response> {
    let ttl = state.config.session_ttl();
    let session = Session::create(&state.db, user.id, ttl)
        .await
        .map_err(PageError::from)?;

    tracing::info!(user_id = %user.id, "session issued");

    redirect_with_cookie("/", &session_cookie(&session.token, ttl))
}

/// `GET /login/` — the login form
///
/// Already-authenticated users are sent straight home.
pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if resolve_user(&state, &headers).await.is_some() {
        return Redirect::to("/").into_response();
    }

    Html(views::login_page("", &[])).into_response()
}

/// `POST /login/` — verify credentials and issue a session
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    let Some(user) = User::find_by_username(&state.db, &form.username).await? else {
        return Ok(Html(views::login_page(
            &form.username,
            &[INVALID_CREDENTIALS.to_string()],
        ))
        .into_response());
    };

    if !verify_password(&form.password, &user.password_hash)? {
        return Ok(Html(views::login_page(
            &form.username,
            &[INVALID_CREDENTIALS.to_string()],
        ))
        .into_response());
    }

    User::touch_last_login(&state.db, user.id).await?;

    start_session(&state, &user).await
}

/// `GET /logout/` — revoke the session and clear the cookie
///
/// Safe to hit without a session; it just redirects to the login page.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    if let Some(token) = crate::app::session_token_from_headers(&headers) {
        Session::delete(&state.db, &token).await?;
    }

    redirect_with_cookie("/login/", &clear_session_cookie())
}

/// `GET /register/` — the registration form
pub async fn register_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if resolve_user(&state, &headers).await.is_some() {
        return Redirect::to("/").into_response();
    }

    Html(views::register_page("", &[])).into_response()
}

/// `POST /register/` — create the account and log the new user in
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> PageResult<Response> {
    let mut errors = Vec::new();

    if let Err(validation) = form.validate() {
        errors.extend(form_errors(&validation));
    }

    if form.password1 != form.password2 {
        errors.push("The two password fields didn't match".to_string());
    } else if let Err(msg) = validate_password(&form.password1) {
        errors.push(msg);
    }

    if !errors.is_empty() {
        return Ok(Html(views::register_page(&form.username, &errors)).into_response());
    }

    let password_hash = hash_password(&form.password1)?;

    let user = match User::create(
        &state.db,
        CreateUser {
            username: form.username.clone(),
            password_hash,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(UserError::DuplicateUsername) => {
            return Ok(Html(views::register_page(
                &form.username,
                &["That username is already taken".to_string()],
            ))
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, "user registered");

    // A fresh registrant goes straight in, no separate login step.
    start_session(&state, &user).await
}
