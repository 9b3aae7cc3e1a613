use axum::{debug_handler, extract::{Query, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    body::{GetField, JsonBody},
    santa::{hints, valid_hint_text},
    AppError, AppResult, DynStore,
};

use super::{checked_code, checked_slot, invalid_code, SantaData};

#[derive(Deserialize)]
pub(crate) struct CodeQuery {
    code: Option<String>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn save_hint(
    State(store): State<DynStore>,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    let code = checked_code(body.str_field("code"))?;
    let Some(text) = body.str_field("hintText").filter(|text| valid_hint_text(text)) else {
        return Err(AppError::BadRequest("Hint must be between 1 and 500 characters"));
    };
    let slot = checked_slot(body.field("hintNumber"))?;

    if !hints::save_hint(store.as_ref(), &code, slot, &text).await? {
        return Ok(invalid_code());
    }

    Ok(Json(json!({ "success": true, "message": format!("Hint {slot} saved!") })))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn get_hints(
    State(store): State<DynStore>,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    hints_response(&store, body.str_field("code")).await
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn get_hints_query(
    State(store): State<DynStore>,
    Query(CodeQuery { code }): Query<CodeQuery>,
) -> AppResult<Json<Value>> {
    hints_response(&store, code).await
}

async fn hints_response(store: &DynStore, code: Option<String>) -> AppResult<Json<Value>> {
    let code = checked_code(code)?;

    let Some(santa) = hints::hints_for(store.as_ref(), &code).await? else {
        return Ok(invalid_code());
    };

    Ok(Json(json!({ "success": true, "data": SantaData::from(santa) })))
}
