use std::sync::Arc;

use axum::{debug_handler, extract::State, Json};
use serde::Serialize;
use tower_sessions::Session;
use tracing::info;

use crate::{santa::assign, session::require_admin, AppResult, Config, DynStore};

use super::participants::with_recipient_names;

#[derive(Debug, Serialize)]
pub(crate) struct Drawn {
    name: String,
    code: String,
    gives_to_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegenerateResponse {
    success: bool,
    participants: Vec<Drawn>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn regenerate(
    State(store): State<DynStore>,
    State(config): State<Arc<Config>>,
    session: Session,
) -> AppResult<Json<RegenerateResponse>> {
    require_admin(&session).await?;

    info!("admin requested a new draw");
    let participants = assign::regenerate(store.as_ref(), &config.roster).await?;

    Ok(Json(RegenerateResponse {
        success: true,
        participants: with_recipient_names(participants)
            .into_iter()
            .map(|(p, gives_to_name)| Drawn {
                name: p.name,
                code: p.code,
                gives_to_name,
            })
            .collect(),
    }))
}
