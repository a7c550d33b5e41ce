mod record;

pub use record::PendingTitle;
