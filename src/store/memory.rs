use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use uuid::Uuid;

use crate::santa::{HintSlot, Participant, ParticipantId};

use super::ParticipantStore;

/// Keeps the roster in a `Vec`. Used by tests and local runs without a db.
#[derive(Debug, Default)]
pub struct MemoryStore {
    participants: Mutex<Vec<Participant>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Participant>> {
        self.participants.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn clear(&self) -> anyhow::Result<()> {
        self.rows().clear();
        Ok(())
    }

    async fn insert(&self, name: &str, code: &str) -> anyhow::Result<ParticipantId> {
        let mut rows = self.rows();
        if rows.iter().any(|p| p.code == code) {
            return Err(anyhow!("UNIQUE constraint failed: participants.code"));
        }

        let id = Uuid::now_v7();
        rows.push(Participant {
            id,
            name: name.to_owned(),
            code: code.to_owned(),
            gives_to: None,
            hints: Default::default(),
        });
        Ok(id)
    }

    async fn set_gives_to(&self, id: ParticipantId, gives_to: ParticipantId) -> anyhow::Result<()> {
        if let Some(participant) = self.rows().iter_mut().find(|p| p.id == id) {
            participant.gives_to = Some(gives_to);
        }
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Participant>> {
        Ok(self.rows().iter().find(|p| p.code == code).cloned())
    }

    async fn find_by_id(&self, id: ParticipantId) -> anyhow::Result<Option<Participant>> {
        Ok(self.rows().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_gives_to(&self, id: ParticipantId) -> anyhow::Result<Option<Participant>> {
        Ok(self.rows().iter().find(|p| p.gives_to == Some(id)).cloned())
    }

    async fn update_hint(&self, code: &str, slot: HintSlot, text: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows();
        let Some(participant) = rows.iter_mut().find(|p| p.code == code) else {
            return Ok(false);
        };
        participant.hints[slot.index()] = Some(text.to_owned());
        Ok(true)
    }

    async fn list(&self) -> anyhow::Result<Vec<Participant>> {
        let mut rows = self.rows().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
