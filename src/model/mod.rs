//! Domain types shared by the crawler, the accumulator and the output layer

mod record;
mod target;

pub use record::{ProfileRecord, RECORD_HEADERS};
pub use target::{Category, CrawlTarget, PageRequest, Place, ProfileLink};
