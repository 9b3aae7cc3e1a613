use axum::{debug_handler, Json};
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::{session::USER_CODE, AppResult};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Json<Value>> {
    session.remove_value(USER_CODE).await?;
    Ok(Json(json!({ "success": true })))
}
