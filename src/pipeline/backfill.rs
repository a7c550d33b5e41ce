use crate::config::Config;
use crate::convert::{transliterate_to_english, TitleConverter};
use crate::db::Repository;
use crate::error::Result;

use super::pager::Pager;
use super::writer::{write_subtitle, WriteOutcome};

/// Aggregate outcome of one backfill run. A record is "processed" once the
/// pipeline attempted a transliteration for it; "skipped" covers empty titles
/// and exhausted fallback chains.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BackfillReport {
    pub processed: u64,
    pub updated: u64,
    pub skipped: u64,
    pub errored: u64,
}

/// Backfill missing subtitles for every pending record in `source_lang`.
/// Strictly sequential; every per-record failure is logged and the loop
/// continues.
pub async fn run_backfill(
    repo: &Repository,
    converter: &dyn TitleConverter,
    config: &Config,
    source_lang: &str,
) -> Result<BackfillReport> {
    let mut pager = Pager::new(repo, source_lang, config.batch_size).await?;
    tracing::info!(
        "[{}] Pending stotras without subtitle: {}. Batches of {}.",
        source_lang,
        pager.total(),
        config.batch_size
    );

    let mut report = BackfillReport::default();
    while let Some(batch) = pager.next_batch().await? {
        tracing::info!("==== [{}] Batch {} (skip={}) ====", source_lang, batch.number, batch.skip);
        let mut batch_updated = 0u64;
        let batch_len = batch.records.len();

        for (i, record) in batch.records.iter().enumerate() {
            let position = i + 1;
            let title = record.title.trim();
            if title.is_empty() {
                report.skipped += 1;
                tracing::info!("- {}/{}: empty title, skipped", position, batch_len);
                continue;
            }

            report.processed += 1;
            let english = transliterate_to_english(converter, source_lang, title).await;
            if english.is_empty() {
                report.skipped += 1;
                tracing::warn!("- {}/{}: no transliteration for '{}'", position, batch_len, title);
                continue;
            }

            match write_subtitle(repo, record.id, title, &english).await {
                Ok(WriteOutcome::Updated) => {
                    report.updated += 1;
                    batch_updated += 1;
                }
                Ok(WriteOutcome::Unchanged) => {}
                Err(e) => {
                    report.errored += 1;
                    tracing::error!("- {}/{}: error for '{}': {}", position, batch_len, title, e);
                }
            }
        }

        tracing::info!(
            "[{}] Batch updated {}. Total updated so far {}.",
            source_lang,
            batch_updated,
            report.updated
        );
    }

    tracing::info!(
        "[{}] Done. Processed {}, updated {}, skipped {}, errored {}.",
        source_lang,
        report.processed,
        report.updated,
        report.skipped,
        report.errored
    );
    Ok(report)
}
