pub mod admin;
pub mod appresult;
pub mod body;
pub mod config;
pub mod limit;
pub mod santa;
pub mod session;
pub mod store;
pub mod user;

use std::sync::Arc;

use axum::{extract::{DefaultBodyLimit, FromRef}, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;
pub use limit::LoginLimiter;
pub use store::{DynStore, ParticipantStore};

const BODY_LIMIT: usize = 10 * 1024;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: DynStore,
    pub config: Arc<Config>,
    pub limiter: LoginLimiter,
}

impl AppState {
    pub fn new(store: DynStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
            limiter: LoginLimiter::default(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(tower_sessions::MemoryStore::default())
        .with_secure(state.config.cookie_secure)
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(session::SESSION_TTL));

    Router::new()
        .nest("/api/admin", admin::router())
        .merge(user::router())
        .with_state(state)
        .layer(session_layer)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
