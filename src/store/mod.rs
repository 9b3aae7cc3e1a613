mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::santa::{HintSlot, Participant, ParticipantId};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type DynStore = Arc<dyn ParticipantStore>;

/// Storage for the live roster.
///
/// Every call is atomic on its own. Nothing groups several calls into one
/// transaction, so a regeneration interrupted halfway leaves a partial roster
/// behind until the next full regeneration.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Deletes every participant, hints included.
    async fn clear(&self) -> anyhow::Result<()>;

    /// Creates a participant with no recipient yet.
    async fn insert(&self, name: &str, code: &str) -> anyhow::Result<ParticipantId>;

    async fn set_gives_to(&self, id: ParticipantId, gives_to: ParticipantId) -> anyhow::Result<()>;

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Participant>>;

    async fn find_by_id(&self, id: ParticipantId) -> anyhow::Result<Option<Participant>>;

    /// The participant whose recipient is `id`.
    async fn find_by_gives_to(&self, id: ParticipantId) -> anyhow::Result<Option<Participant>>;

    /// Overwrites one hint slot. Returns `false` when no participant has `code`.
    async fn update_hint(&self, code: &str, slot: HintSlot, text: &str) -> anyhow::Result<bool>;

    /// Every participant, ordered by name.
    async fn list(&self) -> anyhow::Result<Vec<Participant>>;
}
