use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::PendingTitle;

use super::schema::SCHEMA;

/// A record is pending iff its language matches (case-insensitively) and its
/// subtitle has never been populated.
const PENDING_PREDICATE: &str = "lang = ?1 COLLATE NOCASE AND (subtitle IS NULL OR subtitle = '')";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Count records still awaiting a subtitle for the given language tag.
    pub async fn count_pending(&self, lang: &str) -> Result<i64> {
        let lang = lang.to_string();
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM stotras WHERE {}", PENDING_PREDICATE),
                    params![lang],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    /// Fetch one page of pending records, id and title only, in store order.
    pub async fn pending_page(&self, lang: &str, skip: u32, limit: u32) -> Result<Vec<PendingTitle>> {
        let lang = lang.to_string();
        let page = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT id, title FROM stotras WHERE {} LIMIT ?2 OFFSET ?3",
                    PENDING_PREDICATE
                ))?;
                let rows = stmt
                    .query_map(params![lang, limit, skip], |row| {
                        Ok(PendingTitle {
                            id: row.get(0)?,
                            title: row.get(1)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;
        Ok(page)
    }

    /// Set a record's subtitle and stamp `updateddt`. Returns the number of
    /// rows modified: 0 when the stored subtitle already equals the new value,
    /// so callers can tell a first-time write from a no-op.
    pub async fn set_subtitle(&self, id: i64, subtitle: &str) -> Result<usize> {
        let subtitle = subtitle.to_string();
        let updateddt = Utc::now().to_rfc3339();
        let modified = self
            .conn
            .call(move |conn| {
                let modified = conn.execute(
                    "UPDATE stotras SET subtitle = ?2, updateddt = ?3
                     WHERE id = ?1 AND (subtitle IS NULL OR subtitle <> ?2)",
                    params![id, subtitle, updateddt],
                )?;
                Ok(modified)
            })
            .await?;
        Ok(modified)
    }

    /// All titles in the given language, pending or not. Source set for the
    /// cross-link pipeline.
    pub async fn titles_by_lang(&self, lang: &str) -> Result<Vec<String>> {
        let lang = lang.to_string();
        let titles = self
            .conn
            .call(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT title FROM stotras WHERE lang = ?1 COLLATE NOCASE")?;
                let titles = stmt
                    .query_map(params![lang], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(titles)
            })
            .await?;
        Ok(titles)
    }

    /// Ids of records in `lang` whose title exactly equals `title`. More than
    /// one id means the converted title is ambiguous; the caller decides.
    pub async fn find_ids_by_title(&self, lang: &str, title: &str) -> Result<Vec<i64>> {
        let lang = lang.to_string();
        let title = title.to_string();
        let ids = self
            .conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare("SELECT id FROM stotras WHERE lang = ?1 COLLATE NOCASE AND title = ?2")?;
                let ids = stmt
                    .query_map(params![lang, title], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(ids)
            })
            .await?;
        Ok(ids)
    }

    pub async fn get_subtitle(&self, id: i64) -> Result<Option<String>> {
        let subtitle = self
            .conn
            .call(move |conn| {
                let subtitle: Option<Option<String>> = conn
                    .query_row(
                        "SELECT subtitle FROM stotras WHERE id = ?1",
                        params![id],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(subtitle.flatten())
            })
            .await?;
        Ok(subtitle)
    }

    #[cfg(test)]
    pub async fn insert_record(
        &self,
        title: &str,
        lang: &str,
        subtitle: Option<&str>,
    ) -> Result<i64> {
        let title = title.to_string();
        let lang = lang.to_string();
        let subtitle = subtitle.map(|s| s.to_string());
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO stotras (title, lang, subtitle) VALUES (?1, ?2, ?3)",
                    params![title, lang, subtitle],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }
}
