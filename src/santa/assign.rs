use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use tracing::info;

use crate::store::ParticipantStore;

use super::{Participant, ParticipantId};

pub const CODE_BYTES: usize = 3;

/// Six lowercase hex chars from three random bytes.
pub fn generate_code<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Pairs every id with its successor in `order`, the last wrapping to the
/// first. For two or more distinct ids this is a single cycle with no fixed
/// points; a lone id is paired with itself.
pub fn cycle_edges(order: &[ParticipantId]) -> Vec<(ParticipantId, ParticipantId)> {
    order
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, order[(i + 1) % order.len()]))
        .collect()
}

/// Wipes the live roster and draws a new one from `roster`.
pub async fn regenerate(store: &dyn ParticipantStore, roster: &[String]) -> anyhow::Result<Vec<Participant>> {
    // seeded from the thread rng so the future stays Send
    let mut rng = StdRng::from_rng(&mut rand::rng());
    regenerate_with(store, roster, &mut rng).await
}

pub async fn regenerate_with<R: Rng + Send>(
    store: &dyn ParticipantStore,
    roster: &[String],
    rng: &mut R,
) -> anyhow::Result<Vec<Participant>> {
    anyhow::ensure!(!roster.is_empty(), "cannot draw names for an empty roster");

    store.clear().await?;

    let codes: Vec<String> = roster.iter().map(|_| generate_code(rng)).collect();
    let mut ids = Vec::with_capacity(roster.len());
    for (name, code) in roster.iter().zip(&codes) {
        ids.push(store.insert(name, code).await?);
    }

    ids.shuffle(rng);
    for (id, gives_to) in cycle_edges(&ids) {
        store.set_gives_to(id, gives_to).await?;
    }

    info!("drew names for {} participants", roster.len());
    store.list().await
}
