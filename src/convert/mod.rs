mod client;
mod romanize;

pub use client::{AksharamukhaClient, TitleConverter};
pub use romanize::{to_plain_english, transliterate_to_english};
