//! Copy every record from one backend to another.

use crate::guild_storage::GuildStorage;
use crate::persistence::PersistenceError;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationReport {
    pub arenas: u64,
    pub challenges: u64,
}

/// Copy all arenas and challenges from `source` into `target`.
///
/// Containers are created on the target first. Records are written through
/// the target's adapters, so a read-only target stays untouched and arenas
/// already on the target but absent from the source are pruned. The source
/// is never modified.
///
/// Fails before writing any record if a stored source record cannot be
/// decoded, since pruning would otherwise drop it from the target.
pub async fn migrate_records(
    source: &GuildStorage,
    target: &GuildStorage,
) -> Result<MigrationReport, PersistenceError> {
    info!("Starting record migration");

    target.create_containers().await?;

    let arena_ids = source.arenas.get_all_arena_ids().await?;
    let arenas = source.arenas.get_all_arenas().await?;
    ensure_complete("arena", arena_ids.len(), arenas.len())?;

    let challenge_ids = source.challenges.get_all_challenge_ids().await?;
    let challenges = source.challenges.get_all_challenges().await?;
    ensure_complete("challenge", challenge_ids.len(), challenges.len())?;
    info!(
        arenas = arenas.len(),
        challenges = challenges.len(),
        "Loaded records from source"
    );

    target.arenas.save_arenas(&arenas).await?;
    target.challenges.save_challenges(&challenges).await?;

    let report = MigrationReport {
        arenas: arenas.len() as u64,
        challenges: challenges.len() as u64,
    };
    info!(
        arenas = report.arenas,
        challenges = report.challenges,
        "Record migration completed"
    );
    Ok(report)
}

fn ensure_complete(kind: &'static str, stored: usize, decoded: usize) -> Result<(), PersistenceError> {
    if decoded == stored {
        return Ok(());
    }
    warn!(kind, stored, decoded, "Source holds undecodable records, aborting migration");
    Err(PersistenceError::IncompleteRead {
        kind,
        stored,
        decoded,
    })
}
