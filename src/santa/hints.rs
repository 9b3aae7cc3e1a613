use crate::store::ParticipantStore;

use super::{HintSlot, Participant};

/// Overwrites one of the giver's hint slots. Last write wins.
///
/// Returns `false` when `code` belongs to nobody.
pub async fn save_hint(store: &dyn ParticipantStore, code: &str, slot: HintSlot, text: &str) -> anyhow::Result<bool> {
    store.update_hint(code, slot, text).await
}

/// The hints left for the holder of `code`, i.e. by their own santa.
pub async fn hints_for(store: &dyn ParticipantStore, code: &str) -> anyhow::Result<Option<Participant>> {
    let Some(holder) = store.find_by_code(code).await? else {
        return Ok(None);
    };
    store.find_by_gives_to(holder.id).await
}
