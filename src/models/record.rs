/// Projection of a stotra record yielded by the pending-record pager. The
/// full record (title, lang, text, subtitle, updateddt) lives in the admin
/// console's store; the pipelines only ever need the id and the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTitle {
    pub id: i64,
    pub title: String,
}
