use crate::db::Repository;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Updated,
    /// The record already carried exactly this subtitle.
    Unchanged,
}

/// Persist a computed subtitle onto the record it was read from, stamping
/// `updateddt`, and log whether the row actually changed.
pub async fn write_subtitle(
    repo: &Repository,
    id: i64,
    title: &str,
    subtitle: &str,
) -> Result<WriteOutcome> {
    let modified = repo.set_subtitle(id, subtitle).await?;
    if modified > 0 {
        tracing::info!("'{}' -> '{}'", title, subtitle);
        Ok(WriteOutcome::Updated)
    } else {
        tracing::info!("no change for '{}'", title);
        Ok(WriteOutcome::Unchanged)
    }
}
