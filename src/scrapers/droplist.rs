use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{AttemptError, AttemptFailure, Error, Result};
use crate::models::Snapshot;
use crate::parsers::parse_droplist;
use crate::scrapers::{DroplistTarget, SnapshotSource};
use crate::utils::http::fetch_page;

pub struct DroplistScraper {
    catalog: CatalogConfig,
    origin: String,
}

impl DroplistScraper {
    pub fn new(catalog: CatalogConfig) -> Self {
        let origin = Url::parse(&catalog.base_url)
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|_| catalog.base_url.trim_end_matches('/').to_string());

        Self { catalog, origin }
    }

    pub fn target(&self, reference: NaiveDate) -> DroplistTarget {
        DroplistTarget::for_date(&self.catalog.base_url, reference)
    }

    /// URLs to try, in order: direct page, direct JSON, proxied page, proxied JSON.
    pub fn candidate_urls(&self, page_url: &str) -> Vec<String> {
        let mut direct = vec![page_url.to_string()];
        if self.catalog.try_json_variants {
            direct.push(format!("{}json", page_url));
        }

        let mut candidates = direct.clone();
        if self.catalog.use_proxy {
            candidates.extend(
                direct
                    .iter()
                    .map(|url| format!("{}{}", self.catalog.proxy_prefix, url)),
            );
        }

        candidates
    }
}

#[async_trait]
impl SnapshotSource for DroplistScraper {
    async fn fetch_snapshot(&self, client: &Client, reference: NaiveDate) -> Result<Snapshot> {
        let target = self.target(reference);
        info!("Fetching droplist for {} ({})", target.date, target.season);

        let mut attempts = Vec::new();

        for url in self.candidate_urls(&target.url) {
            let failure = match fetch_page(client, &url).await {
                Ok(page) => {
                    let items = parse_droplist(&page.body, page.content_type.as_deref(), &self.origin);
                    if !items.is_empty() {
                        info!("Found {} droplist items at {}", items.len(), url);
                        return Ok(Snapshot {
                            items,
                            source_url: url,
                            retrieved_for_date: target.date,
                            season_label: target.season,
                        });
                    }
                    AttemptFailure::NoEntries
                }
                Err(failure) => failure,
            };

            debug!("Abandoning candidate {}: {}", url, failure);
            attempts.push(AttemptError { url, reason: failure });
        }

        warn!(
            "No droplist candidate produced entries: {}",
            attempts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );

        if attempts.iter().any(|attempt| attempt.reason.retrieved()) {
            Err(Error::NoEntriesFound { url: target.url, attempts })
        } else {
            Err(Error::FetchFailed { url: target.url, attempts })
        }
    }
}
