use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::{
    body::{GetField, JsonBody},
    santa::lookup::reveal_santa_for,
    AppResult, DynStore,
};

use super::{checked_code, invalid_code};

/// Who the owner of a found code gives to.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn reveal_santa(
    State(store): State<DynStore>,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    let code = checked_code(body.str_field("code"))?;

    let Some(reveal) = reveal_santa_for(store.as_ref(), &code).await? else {
        return Ok(invalid_code());
    };

    Ok(Json(json!({
        "success": true,
        "santa": reveal.santa_name,
        "recipient": reveal.recipient_name,
    })))
}
