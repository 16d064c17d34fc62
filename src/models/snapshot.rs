use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CatalogEntry;

/// The result of one successful droplist fetch. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<CatalogEntry>,
    pub source_url: String,
    pub retrieved_for_date: NaiveDate,
    pub season_label: String,
}

impl Snapshot {
    pub fn subtotal_usd(&self) -> f64 {
        self.items.iter().map(|item| item.price_usd).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
