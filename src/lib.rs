//! Landed-cost estimates in CAD for USD-priced items, and a scraper for the
//! upcoming droplist whose items get the same treatment.

pub mod calculator;
pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod report;
pub mod scrapers;
pub mod utils;

pub use calculator::{compute_fees, convert_to_cad, parse_usd_list, FeeSchedule};
pub use cart::{load_droplist, quote_price_list, CartQuote, ItemQuote};
pub use error::{Error, Result};
pub use models::{Availability, CatalogEntry, Category, FeeBreakdown, Fees, Snapshot};
pub use scrapers::{DroplistScraper, SnapshotSource};
