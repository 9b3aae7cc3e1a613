use axum::{debug_handler, Json};
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::{session::{is_admin, ADMIN}, AppResult};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Json<Value>> {
    session.remove_value(ADMIN).await?;
    Ok(Json(json!({ "success": true })))
}

#[debug_handler]
pub(crate) async fn check_session(session: Session) -> Json<Value> {
    let authenticated = is_admin(&session).await.unwrap_or(false);
    Json(json!({ "authenticated": authenticated }))
}
