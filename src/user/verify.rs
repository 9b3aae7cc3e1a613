use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::info;

use crate::{
    body::{GetField, JsonBody},
    santa::lookup::resolve_by_code,
    session::USER_CODE,
    AppResult, DynStore,
};

use super::{checked_code, invalid_code, receive_data, GiveData};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn verify_code(
    State(store): State<DynStore>,
    session: Session,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    let code = checked_code(body.str_field("code"))?;

    let Some(redemption) = resolve_by_code(store.as_ref(), &code).await? else {
        return Ok(invalid_code());
    };

    session.cycle_id().await?;
    session.insert(USER_CODE, &code).await?;
    info!("{} opened their assignment", redemption.holder.name);

    Ok(Json(json!({
        "success": true,
        "giveData": GiveData::from(&redemption),
        "receiveData": receive_data(redemption.given_by),
    })))
}

/// Never fails: anything short of a live code reads as logged out.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn check_session(
    State(store): State<DynStore>,
    session: Session,
) -> Json<Value> {
    let logged_out = Json(json!({ "authenticated": false }));

    let Ok(Some(code)) = session.get::<String>(USER_CODE).await else {
        return logged_out;
    };
    let Ok(Some(redemption)) = resolve_by_code(store.as_ref(), &code).await else {
        return logged_out;
    };

    Json(json!({
        "authenticated": true,
        "giveData": GiveData::from(&redemption),
        "receiveData": receive_data(redemption.given_by),
    }))
}
