use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tower_sessions::Session;

use crate::{AppError, AppResult};

pub const ADMIN: &str = "admin";
pub const USER_CODE: &str = "user_code";

pub const ADMIN_TTL: Duration = Duration::days(7);
pub const SESSION_TTL: Duration = Duration::days(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub issued_at: OffsetDateTime,
}

impl AdminSession {
    pub fn issue() -> Self {
        let token: [u8; 32] = rand::random();
        Self {
            token: hex::encode(token),
            issued_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn is_live(&self, now: OffsetDateTime) -> bool {
        now - self.issued_at < ADMIN_TTL
    }
}

pub async fn is_admin(session: &Session) -> AppResult<bool> {
    Ok(session
        .get::<AdminSession>(ADMIN)
        .await?
        .is_some_and(|admin| admin.is_live(OffsetDateTime::now_utc())))
}

pub async fn require_admin(session: &Session) -> AppResult<()> {
    if is_admin(session).await? {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
