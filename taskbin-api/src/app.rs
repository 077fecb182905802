/// Router assembly
///
/// Wires the route handlers to shared state and stacks the middleware:
/// request tracing, CORS, and the bearer-token layer guarding every task
/// route. User registration, login, lookups, and the health probe stay
/// public.

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskbin_shared::{auth::token, models::user::User};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

/// State every handler sees
///
/// Cloned per request by the `State` extractor; the pool clones by
/// reference count, the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Signing key for session tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// The verified caller, stashed in request extensions
///
/// Only [`bearer_auth_layer`] constructs this, after the token checks out
/// and the account still exists; task handlers take it via
/// `Extension<AuthContext>` and pass `user_id` into every store call.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
}

/// Assembles the full router
///
/// ```text
/// GET  /health                        public
/// POST /users                         public   register
/// POST /login                         public   authenticate, issue token
/// GET  /users/:id                     public   lookup
/// GET  /users/by-username/:username   public   lookup
/// POST /tasks                         bearer   create
/// GET  /tasks                         bearer   list own, newest first
/// DELETE /tasks/:id                   bearer   delete
/// PUT  /tasks/:id/title               bearer   rename
/// PUT  /tasks/:id/description         bearer   re-describe
/// PUT  /tasks/:id/status              bearer   change status
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, tasks, users};

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/users", post(users::register))
        .route("/login", post(users::login))
        .route("/users/:id", get(users::get_user))
        .route("/users/by-username/:username", get(users::get_user_by_username));

    let authed = Router::new()
        .route("/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route("/tasks/:id", delete(tasks::delete_task))
        .route("/tasks/:id/title", put(tasks::update_title))
        .route("/tasks/:id/description", put(tasks::update_description))
        .route("/tasks/:id/status", put(tasks::update_status))
        .layer(from_fn_with_state(state.clone(), bearer_auth_layer));

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(public)
        .merge(authed)
        .layer(trace)
        .layer(cors_layer(&state.config.api.cors_origins))
        .with_state(state)
}

/// CORS policy from the configured origin list
///
/// A literal `*` anywhere in the list means development mode and a fully
/// permissive layer; otherwise only the listed origins are allowed, with
/// credentials.
fn cors_layer(configured: &[String]) -> CorsLayer {
    if configured.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Resolves `Authorization: Bearer <token>` into an [`AuthContext`]
///
/// Rejects missing or malformed headers, tokens that fail verification,
/// and tokens whose account no longer exists.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    let raw_token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::BadRequest("expected a Bearer token".to_string()))?;

    let claims = token::verify_token(raw_token, state.jwt_secret())?;

    // A token can outlive its account; the caller must still exist
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("unknown user".to_string()))?;

    req.extensions_mut().insert(AuthContext { user_id: user.id });

    Ok(next.run(req).await)
}
