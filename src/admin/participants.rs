use std::collections::HashMap;

use axum::{debug_handler, extract::State, Json};
use serde::Serialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{santa::{HintSlot, Participant}, session::require_admin, AppResult, DynStore};

#[derive(Debug, Serialize)]
pub(crate) struct ParticipantRow {
    id: Uuid,
    name: String,
    code: String,
    gives_to_name: Option<String>,
    hint1: Option<String>,
    hint2: Option<String>,
    hint3: Option<String>,
}

/// Pairs each participant with their recipient's name. Unassigned rows
/// (mid-regeneration) get `None`.
pub(crate) fn with_recipient_names(participants: Vec<Participant>) -> Vec<(Participant, Option<String>)> {
    let names: HashMap<Uuid, String> = participants
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();

    participants
        .into_iter()
        .map(|p| {
            let gives_to_name = p.gives_to.and_then(|id| names.get(&id).cloned());
            (p, gives_to_name)
        })
        .collect()
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn participants(
    State(store): State<DynStore>,
    session: Session,
) -> AppResult<Json<Vec<ParticipantRow>>> {
    require_admin(&session).await?;

    let rows = with_recipient_names(store.list().await?)
        .into_iter()
        .map(|(p, gives_to_name)| ParticipantRow {
            id: p.id,
            hint1: p.hint(HintSlot::One).map(str::to_owned),
            hint2: p.hint(HintSlot::Two).map(str::to_owned),
            hint3: p.hint(HintSlot::Three).map(str::to_owned),
            name: p.name,
            code: p.code,
            gives_to_name,
        })
        .collect();

    Ok(Json(rows))
}
