use crate::db::Repository;
use crate::error::Result;
use crate::models::PendingTitle;

/// One page of pending records.
pub struct Batch {
    /// 1-based batch number, for log lines.
    pub number: u32,
    pub skip: u32,
    pub records: Vec<PendingTitle>,
}

/// Pages through the pending records for one language tag.
///
/// `total` is counted once at construction and bounds the iteration; the
/// predicate itself is re-run for every page, so records that gain a subtitle
/// mid-run drop out of later pages and the pending set is allowed to shrink.
/// Re-invoking the whole pager is idempotent: finished records no longer
/// match the predicate.
pub struct Pager<'a> {
    repo: &'a Repository,
    lang: String,
    batch_size: u32,
    total: i64,
    skip: u32,
    batches_yielded: u32,
}

impl<'a> Pager<'a> {
    pub async fn new(repo: &'a Repository, lang: &str, batch_size: u32) -> Result<Pager<'a>> {
        let total = repo.count_pending(lang).await?;
        Ok(Self {
            repo,
            lang: lang.to_string(),
            batch_size,
            total,
            skip: 0,
            batches_yielded: 0,
        })
    }

    /// Pending count at the start of the run. Progress reporting only; the
    /// real pending set may shrink while batches are processed.
    pub fn total(&self) -> i64 {
        self.total
    }

    pub async fn next_batch(&mut self) -> Result<Option<Batch>> {
        if i64::from(self.skip) >= self.total {
            return Ok(None);
        }

        let records = self
            .repo
            .pending_page(&self.lang, self.skip, self.batch_size)
            .await?;
        let batch = Batch {
            number: self.batches_yielded + 1,
            skip: self.skip,
            records,
        };
        self.batches_yielded += 1;
        self.skip += self.batch_size;
        Ok(Some(batch))
    }
}
