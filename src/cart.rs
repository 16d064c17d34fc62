use chrono::NaiveDate;
use reqwest::Client;
use tracing::info;

use crate::calculator::{parse_usd_list, FeeSchedule};
use crate::error::Result;
use crate::models::{CatalogEntry, FeeBreakdown, Snapshot};
use crate::scrapers::SnapshotSource;
use crate::utils::exchange_rate::RateSource;

/// One droplist item with its own landed cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuote {
    pub entry: CatalogEntry,
    pub breakdown: FeeBreakdown,
}

/// Every item priced on its own, plus the whole list bought as one order.
#[derive(Debug, Clone, PartialEq)]
pub struct CartQuote {
    pub snapshot: Snapshot,
    pub items: Vec<ItemQuote>,
    pub total: FeeBreakdown,
}

impl CartQuote {
    pub fn build(snapshot: Snapshot, conversion_rate: f64, schedule: &FeeSchedule) -> Self {
        let items = snapshot
            .items
            .iter()
            .map(|entry| ItemQuote {
                entry: entry.clone(),
                breakdown: schedule.compute_fees(entry.price_usd).convert(conversion_rate),
            })
            .collect();

        let total = schedule
            .compute_fees(snapshot.subtotal_usd())
            .convert(conversion_rate);

        Self { snapshot, items, total }
    }
}

/// Quote a comma-separated price list. Input is validated before the rate is fetched.
pub async fn quote_price_list(
    raw: &str,
    rates: &dyn RateSource,
    schedule: &FeeSchedule,
) -> Result<FeeBreakdown> {
    let subtotal = parse_usd_list(raw)?;
    let rate = rates.usd_to_cad().await?;
    Ok(schedule.compute_fees(subtotal).convert(rate))
}

/// Fetch the rate, then the droplist, and price the result.
pub async fn load_droplist(
    client: &Client,
    rates: &dyn RateSource,
    source: &dyn SnapshotSource,
    reference: NaiveDate,
    schedule: &FeeSchedule,
) -> Result<CartQuote> {
    let rate = rates.usd_to_cad().await?;
    let snapshot = source.fetch_snapshot(client, reference).await?;
    info!(
        "Pricing {} droplist items at rate {:.4}",
        snapshot.len(),
        rate
    );
    Ok(CartQuote::build(snapshot, rate, schedule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::Availability;
    use crate::utils::exchange_rate::FixedRate;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn snapshot(prices: &[f64]) -> Snapshot {
        Snapshot {
            items: prices
                .iter()
                .enumerate()
                .map(|(i, price)| {
                    CatalogEntry::new(format!("Item {}", i), *price, "", Availability::Unknown)
                        .unwrap()
                })
                .collect(),
            source_url: "https://www.supremecommunity.com/season/spring-summer2024/droplist/2024-05-02/"
                .to_string(),
            retrieved_for_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            season_label: "spring-summer2024".to_string(),
        }
    }

    struct CountingRate {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RateSource for CountingRate {
        async fn usd_to_cad(&self) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(1.35)
        }
    }

    struct StaticSource(Snapshot);

    #[async_trait]
    impl SnapshotSource for StaticSource {
        async fn fetch_snapshot(&self, _client: &Client, _reference: NaiveDate) -> Result<Snapshot> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn cart_total_crosses_free_shipping() {
        let quote = CartQuote::build(snapshot(&[49.0, 150.0, 60.0]), 1.35, &FeeSchedule::default());

        assert!(approx(quote.total.subtotal_usd, 259.0));
        assert_eq!(quote.total.shipping_usd, 0.0);
        assert!(approx(quote.total.duty_usd, 38.85));
        assert!(approx(quote.total.total_usd, 297.85));
        assert!(approx(quote.total.total_cad, 402.0975));
    }

    #[test]
    fn items_are_priced_individually() {
        let quote = CartQuote::build(snapshot(&[49.0, 300.0]), 1.35, &FeeSchedule::default());

        assert_eq!(quote.items.len(), 2);
        assert_eq!(quote.items[0].breakdown.shipping_usd, 20.0);
        assert!(approx(quote.items[0].breakdown.total_usd, 49.0 + 20.0 + 7.35));
        assert!(quote.items[1].breakdown.is_free_shipping());
        assert_eq!(quote.items[1].entry.name, "Item 1");
    }

    #[tokio::test]
    async fn quote_validates_before_fetching_rate() {
        let rates = CountingRate {
            calls: AtomicUsize::new(0),
        };

        let err = quote_price_list("10,abc", &rates, &FeeSchedule::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(rates.calls.load(Ordering::SeqCst), 0);

        let err = quote_price_list("1e308, 1e308", &rates, &FeeSchedule::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(rates.calls.load(Ordering::SeqCst), 0);

        let breakdown = quote_price_list("100", &rates, &FeeSchedule::default())
            .await
            .unwrap();
        assert_eq!(rates.calls.load(Ordering::SeqCst), 1);
        assert_eq!(breakdown.total_usd, 135.0);
        assert!(approx(breakdown.total_cad, 135.0 * 1.35));
    }

    #[tokio::test]
    async fn load_droplist_prices_snapshot() {
        let client = Client::new();
        let source = StaticSource(snapshot(&[49.0, 150.0, 60.0]));
        let reference = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let quote = load_droplist(&client, &FixedRate(1.35), &source, reference, &FeeSchedule::default())
            .await
            .unwrap();

        assert_eq!(quote.items.len(), 3);
        assert!(approx(quote.total.total_cad, 402.0975));
        assert_eq!(quote.total.conversion_rate, 1.35);
    }
}
