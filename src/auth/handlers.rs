use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        extractors::SESSION_COOKIE,
        password::{hash_password, verify_password},
        repo_types::User,
        token::{Principal, SessionKeys},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/logout", get(logout))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn session_cookie(token: String, secure: bool, ttl: std::time::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::seconds(ttl.as_secs() as i64))
        .build()
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required.".into(),
        ));
    }

    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let principal = Principal {
        user_id: user.id,
        username: user.username.clone(),
    };
    let keys = SessionKeys::from_ref(&state);
    let token = keys.issue(&principal).map_err(ApiError::Internal)?;
    let cookie = session_cookie(token, state.config.auth.cookie_secure, keys.ttl());

    info!(user_id = %user.id, "user logged in");
    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            message: "Login successful!".into(),
            redirect_url: "/dashboard".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if payload.username.is_empty()
        || payload.password.is_empty()
        || payload.email.is_empty()
        || payload.full_name.is_empty()
    {
        return Err(ApiError::Validation("All fields are required.".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "register invalid email");
        return Err(ApiError::Validation("Invalid email format.".into()));
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    // Duplicate username/email surfaces as a unique violation and maps to 409
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &payload.full_name,
        &hash,
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully!".into(),
            redirect_url: "/login".into(),
        }),
    ))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    let location = format!(
        "/login?message={}",
        urlencoding::encode("Logged out successfully!")
    );
    (jar, Redirect::to(&location))
}
