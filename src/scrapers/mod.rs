use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use crate::error::Result;
use crate::models::Snapshot;

mod droplist;
mod target;

pub use droplist::DroplistScraper;
pub use target::{date_slug, next_drop_day, season_label, DroplistTarget, DROP_WEEKDAY};

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// One fresh attempt at the droplist for the drop on or after `reference`.
    async fn fetch_snapshot(&self, client: &Client, reference: NaiveDate) -> Result<Snapshot>;
}
