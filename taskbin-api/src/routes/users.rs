/// User endpoints: registration, login, and lookups
///
/// # Endpoints
///
/// - `POST /users` - Register a new user
/// - `POST /login` - Verify credentials and issue a session token
/// - `GET /users/:id` - Look up a user by id
/// - `GET /users/by-username/:username` - Look up a user by username

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskbin_shared::{
    auth::token::{issue_token, Claims},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Public view of a user: never includes the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: Uuid,

    /// Session token (24h); task routes require it as a Bearer token
    pub access_token: String,
}

/// Register a new user
///
/// # Errors
///
/// - `409 Conflict`: username already taken
/// - `422 Unprocessable Entity`: validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password: req.password,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Login endpoint
///
/// Verifies credentials and issues a session token. Unknown username and
/// wrong password produce the same 401 response, so this endpoint cannot be
/// used to probe which usernames exist.
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = User::authenticate(&state.db, &req.username, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let access_token = issue_token(&Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        access_token,
    }))
}

/// Look up a user by id
///
/// # Errors
///
/// - `404 Not Found`: no such user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
    }))
}

/// Look up a user by username
///
/// # Errors
///
/// - `404 Not Found`: no such user
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
    }))
}
