use crate::config::Config;
use crate::convert::TitleConverter;
use crate::db::Repository;
use crate::error::Result;

use super::writer::{write_subtitle, WriteOutcome};

/// Cross-link source set: the canonical records are the Devanagari ones.
const SOURCE_LANG: &str = "Devanagari";
const LATIN_TARGET: &str = "Latin";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrosslinkReport {
    pub processed: u64,
    pub updated: u64,
    pub skipped: u64,
    pub errored: u64,
}

enum LinkOutcome {
    Updated,
    Unchanged,
    Skipped(&'static str),
}

/// For every Devanagari title, convert it to `target_lang` and Latin in one
/// round trip, find the `target_lang` record titled exactly the converted
/// form, and write the Latin form as its subtitle.
///
/// Unlike the backfill pipeline this overwrites already-populated subtitles
/// by default; `crosslink_overwrite = false` turns that into a skip.
pub async fn run_crosslink(
    repo: &Repository,
    converter: &dyn TitleConverter,
    config: &Config,
    target_lang: &str,
) -> Result<CrosslinkReport> {
    let titles = repo.titles_by_lang(SOURCE_LANG).await?;
    tracing::info!("Found {} {} stotras to convert", titles.len(), SOURCE_LANG);

    let mut report = CrosslinkReport::default();
    for title in &titles {
        let title = title.trim();
        if title.is_empty() {
            report.skipped += 1;
            continue;
        }

        report.processed += 1;
        match link_one(repo, converter, config, target_lang, title).await {
            Ok(LinkOutcome::Updated) => report.updated += 1,
            Ok(LinkOutcome::Unchanged) => {}
            Ok(LinkOutcome::Skipped(reason)) => {
                report.skipped += 1;
                tracing::info!("skipping '{}': {}", title, reason);
            }
            Err(e) => {
                report.errored += 1;
                tracing::error!("conversion/update error for '{}': {}", title, e);
            }
        }
    }

    tracing::info!(
        "Done. Updated {} {} stotras with subtitles.",
        report.updated,
        target_lang
    );
    Ok(report)
}

async fn link_one(
    repo: &Repository,
    converter: &dyn TitleConverter,
    config: &Config,
    target_lang: &str,
    title: &str,
) -> Result<LinkOutcome> {
    let targets = [target_lang, LATIN_TARGET];
    let results = converter.convert_multi(SOURCE_LANG, &targets, title).await?;

    let target_title = results.get(target_lang).map(|s| s.trim()).unwrap_or("");
    let english_title = results.get(LATIN_TARGET).map(|s| s.trim()).unwrap_or("");
    if target_title.is_empty() || english_title.is_empty() {
        return Ok(LinkOutcome::Skipped("converter returned an empty result"));
    }

    let ids = repo.find_ids_by_title(target_lang, target_title).await?;
    let Some(&id) = ids.first() else {
        return Ok(LinkOutcome::Skipped("no counterpart in target script"));
    };
    if ids.len() > 1 {
        tracing::warn!(
            "{} {} records share title '{}'; linking the first",
            ids.len(),
            target_lang,
            target_title
        );
    }

    if !config.crosslink_overwrite {
        if let Some(existing) = repo.get_subtitle(id).await? {
            if !existing.is_empty() {
                return Ok(LinkOutcome::Skipped("subtitle already present"));
            }
        }
    }

    match write_subtitle(repo, id, target_title, english_title).await? {
        WriteOutcome::Updated => Ok(LinkOutcome::Updated),
        WriteOutcome::Unchanged => Ok(LinkOutcome::Unchanged),
    }
}
