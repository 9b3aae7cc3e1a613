use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use uuid::Uuid;

use crate::santa::{HintSlot, Participant, ParticipantId};

use super::ParticipantStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS participants (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    code TEXT UNIQUE NOT NULL,
    gives_to_id TEXT,
    hint1 TEXT,
    hint2 TEXT,
    hint3 TEXT,
    FOREIGN KEY (gives_to_id) REFERENCES participants(id)
)
"#;

const SELECT_PARTICIPANT: &str = "SELECT id,name,code,gives_to_id,hint1,hint2,hint3 FROM participants";

type ParticipantRow = (String, String, String, Option<String>, Option<String>, Option<String>, Option<String>);

#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(16)
            .connect_with(options)
            .await?;

        Self::from_pool(db_pool).await
    }

    pub async fn from_pool(db_pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(SCHEMA).execute(&db_pool).await?;
        Ok(Self { db_pool })
    }

    async fn fetch_one_where(&self, clause: &str, value: String) -> anyhow::Result<Option<Participant>> {
        let row: Option<ParticipantRow> = sqlx::query_as(&format!("{SELECT_PARTICIPANT} WHERE {clause}"))
            .bind(value)
            .fetch_optional(&self.db_pool)
            .await?;

        row.map(to_participant).transpose()
    }
}

fn to_participant((id, name, code, gives_to_id, hint1, hint2, hint3): ParticipantRow) -> anyhow::Result<Participant> {
    Ok(Participant {
        id: Uuid::parse_str(&id)?,
        name,
        code,
        gives_to: match gives_to_id {
            Some(x) => Some(Uuid::parse_str(&x)?),
            None => None,
        },
        hints: [hint1, hint2, hint3],
    })
}

#[async_trait]
impl ParticipantStore for SqliteStore {
    async fn clear(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM participants")
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, name: &str, code: &str) -> anyhow::Result<ParticipantId> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO participants (id,name,code) VALUES (?,?,?)")
            .bind(id.to_string())
            .bind(name)
            .bind(code)
            .execute(&self.db_pool)
            .await?;
        Ok(id)
    }

    async fn set_gives_to(&self, id: ParticipantId, gives_to: ParticipantId) -> anyhow::Result<()> {
        sqlx::query("UPDATE participants SET gives_to_id=? WHERE id=?")
            .bind(gives_to.to_string())
            .bind(id.to_string())
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Participant>> {
        self.fetch_one_where("code=?", code.to_owned()).await
    }

    async fn find_by_id(&self, id: ParticipantId) -> anyhow::Result<Option<Participant>> {
        self.fetch_one_where("id=?", id.to_string()).await
    }

    async fn find_by_gives_to(&self, id: ParticipantId) -> anyhow::Result<Option<Participant>> {
        self.fetch_one_where("gives_to_id=?", id.to_string()).await
    }

    async fn update_hint(&self, code: &str, slot: HintSlot, text: &str) -> anyhow::Result<bool> {
        // slot.column() is one of three fixed names, never client input
        let result = sqlx::query(&format!("UPDATE participants SET {}=? WHERE code=?", slot.column()))
            .bind(text)
            .bind(code)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> anyhow::Result<Vec<Participant>> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(&format!("{SELECT_PARTICIPANT} ORDER BY name"))
            .fetch_all(&self.db_pool)
            .await?;

        rows.into_iter().map(to_participant).collect()
    }
}
