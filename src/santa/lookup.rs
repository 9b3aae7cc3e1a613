use crate::store::ParticipantStore;

use super::Participant;

/// Everything a code unlocks: its holder, who they give to, and who gives to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub holder: Participant,
    pub gives_to: Participant,
    /// `None` only while a regeneration is half done.
    pub given_by: Option<Participant>,
}

/// Resolves a code to its place in the cycle, one hop forward and one back.
///
/// A holder without a recipient yet counts as unknown, the same as a code
/// that was never issued.
pub async fn resolve_by_code(store: &dyn ParticipantStore, code: &str) -> anyhow::Result<Option<Redemption>> {
    let Some(holder) = store.find_by_code(code).await? else {
        return Ok(None);
    };
    let Some(gives_to_id) = holder.gives_to else {
        return Ok(None);
    };
    let Some(gives_to) = store.find_by_id(gives_to_id).await? else {
        return Ok(None);
    };

    let given_by = store.find_by_gives_to(holder.id).await?;

    Ok(Some(Redemption {
        holder,
        gives_to,
        given_by,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub santa_name: String,
    pub recipient_name: String,
}

/// Reads the forward edge of whoever owns `code`: the owner is the santa,
/// their recipient the one they give to.
pub async fn reveal_santa_for(store: &dyn ParticipantStore, code: &str) -> anyhow::Result<Option<Reveal>> {
    Ok(resolve_by_code(store, code).await?.map(|redemption| Reveal {
        santa_name: redemption.holder.name,
        recipient_name: redemption.gives_to.name,
    }))
}
