use std::{net::SocketAddr, sync::Arc};

use axum::{
    debug_handler,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Extension, Json,
};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    body::{GetField, JsonBody},
    session::{AdminSession, ADMIN},
    AppError, AppResult, AppState, Config, LoginLimiter,
};

const PASSWORD_MAX_LEN: usize = 100;

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(config): State<Arc<Config>>,
    State(limiter): State<LoginLimiter>,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
    headers: HeaderMap,
    session: Session,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    let peer = connect_info.map(|Extension(ConnectInfo(addr))| addr);
    let client = client_key(&headers, peer, config.trust_proxy);
    if !limiter.check(&client) {
        warn!("admin login rate limited for {client}");
        return Err(AppError::TooManyRequests);
    }

    let password = body
        .str_field("password")
        .filter(|p| !p.is_empty() && p.chars().count() <= PASSWORD_MAX_LEN);
    let Some(password) = password else {
        return Err(AppError::BadRequest("Invalid password format"));
    };

    if !password_matches(&password, config.admin_pass_hash.as_deref()) {
        warn!("failed admin login from {client}");
        return Ok(Json(json!({ "success": false, "message": "Invalid password" })));
    }

    session.cycle_id().await?;
    session.insert(ADMIN, AdminSession::issue()).await?;

    info!("admin logged in from {client}");
    Ok(Json(json!({ "success": true })))
}

fn password_matches(password: &str, expected_hash: Option<&str>) -> bool {
    let Some(expected_hash) = expected_hash else {
        return false;
    };
    hex::encode(Sha256::digest(password.as_bytes())) == expected_hash
}

/// The peer address, or with a trusted proxy in front, the hop that proxy
/// appended last to `X-Forwarded-For`. Earlier hops are client supplied.
fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    let forwarded = trust_proxy
        .then(|| headers.get("x-forwarded-for"))
        .flatten()
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.rsplit(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn hash_comparison() {
        // sha256("hunter2")
        let hash = "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7";
        assert!(password_matches("hunter2", Some(hash)));
        assert!(!password_matches("hunter3", Some(hash)));
        assert!(!password_matches("hunter2", None));
    }

    #[test]
    fn client_key_without_a_proxy_is_the_peer() {
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_key(&headers, Some(peer), false), "10.0.0.1");
        assert_eq!(client_key(&headers, None, false), "unknown");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_key(&headers, Some(peer), false), "10.0.0.1");
    }

    #[test]
    fn client_key_behind_a_proxy_is_the_last_hop() {
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_key(&headers, Some(peer), true), "10.0.0.1");

        headers.insert("x-forwarded-for", HeaderValue::from_static("1.1.1.1, 203.0.113.9"));
        assert_eq!(client_key(&headers, Some(peer), true), "203.0.113.9");
    }
}
