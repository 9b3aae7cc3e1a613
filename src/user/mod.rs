//! What a participant can do with their code.

mod hints;
mod logout;
mod reveal;
mod verify;

use axum::{routing::{get, post}, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    santa::{lookup::Redemption, valid_code, HintSlot, Participant},
    AppError, AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/verify-code", post(verify::verify_code))
        .route("/api/check-session", get(verify::check_session))
        .route("/api/logout", post(logout::logout))
        .route("/api/save-hint", post(hints::save_hint))
        .route("/api/get-hints", post(hints::get_hints).get(hints::get_hints_query))
        .route("/api/reveal-santa", post(reveal::reveal_santa))
}

/// The holder and the person they give to.
#[derive(Debug, Serialize)]
pub(crate) struct GiveData {
    id: Uuid,
    name: String,
    code: String,
    gives_to_name: String,
    gives_to_id: Uuid,
}

impl From<&Redemption> for GiveData {
    fn from(redemption: &Redemption) -> Self {
        Self {
            id: redemption.holder.id,
            name: redemption.holder.name.clone(),
            code: redemption.holder.code.clone(),
            gives_to_name: redemption.gives_to.name.clone(),
            gives_to_id: redemption.gives_to.id,
        }
    }
}

/// A santa as their recipient sees them.
#[derive(Debug, Serialize)]
pub(crate) struct SantaData {
    santa_name: String,
    hint1: Option<String>,
    hint2: Option<String>,
    hint3: Option<String>,
    santa_code: String,
}

impl From<Participant> for SantaData {
    fn from(santa: Participant) -> Self {
        let [hint1, hint2, hint3] = santa.hints;
        Self {
            santa_name: santa.name,
            hint1,
            hint2,
            hint3,
            santa_code: santa.code,
        }
    }
}

pub(crate) fn receive_data(given_by: Option<Participant>) -> Value {
    given_by
        .map(|santa| json!(SantaData::from(santa)))
        .unwrap_or_else(|| json!({}))
}

pub(crate) fn invalid_code() -> Json<Value> {
    Json(json!({ "success": false, "message": "Invalid code" }))
}

pub(crate) fn checked_code(code: Option<String>) -> AppResult<String> {
    code.filter(|code| valid_code(code))
        .ok_or(AppError::BadRequest("Invalid code format"))
}

pub(crate) fn checked_slot(hint_number: Option<&Value>) -> AppResult<HintSlot> {
    hint_number
        .and_then(HintSlot::from_json)
        .ok_or(AppError::BadRequest("Invalid hint number"))
}
