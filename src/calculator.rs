//! Shipping, duty and currency arithmetic for a USD subtotal.
//!
//! Nothing here rounds. Amounts are carried at full precision and only
//! rounded when rendered in [`crate::report`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Fees;

pub const DUTY_RATE: f64 = 0.15;
pub const SHIPPING_COST: f64 = 20.0;
pub const FREE_SHIPPING_THRESHOLD: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub duty_rate: f64,
    pub shipping_cost: f64,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            duty_rate: DUTY_RATE,
            shipping_cost: SHIPPING_COST,
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
        }
    }
}

impl FeeSchedule {
    /// Callers validate that `subtotal_usd` is finite and positive.
    pub fn compute_fees(&self, subtotal_usd: f64) -> Fees {
        let shipping_usd = if subtotal_usd > self.free_shipping_threshold {
            0.0
        } else {
            self.shipping_cost
        };
        let duty_usd = subtotal_usd * self.duty_rate;

        Fees {
            subtotal_usd,
            shipping_usd,
            duty_usd,
            total_usd: subtotal_usd + shipping_usd + duty_usd,
        }
    }

    pub fn duty_percent(&self) -> f64 {
        self.duty_rate * 100.0
    }
}

/// Fees under the default schedule.
pub fn compute_fees(subtotal_usd: f64) -> Fees {
    FeeSchedule::default().compute_fees(subtotal_usd)
}

pub fn convert_to_cad(total_usd: f64, conversion_rate: f64) -> f64 {
    total_usd * conversion_rate
}

/// Sum a comma-separated list of USD prices.
///
/// Empty tokens are skipped. Any token that is not a finite positive number
/// rejects the whole list, as does a list with no tokens at all or one whose
/// sum overflows.
pub fn parse_usd_list(raw: &str) -> Result<f64> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(Error::InvalidInput(raw.to_string()));
    }

    let mut sum = 0.0;
    for token in tokens {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => sum += value,
            _ => return Err(Error::InvalidInput(raw.to_string())),
        }
    }

    if !sum.is_finite() {
        return Err(Error::InvalidInput(raw.to_string()));
    }

    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_and_sums_price_lists() {
        assert!(approx(parse_usd_list("10, 20.5, 30").unwrap(), 60.5));
        assert!(approx(parse_usd_list("10, 20.50").unwrap(), 30.5));
        assert!(approx(parse_usd_list(" 10 ,, 5 ,").unwrap(), 15.0));
    }

    #[test]
    fn rejects_invalid_price_lists() {
        for raw in ["", " , ,", "10,abc", "10,,abc", "-5", "0", "10, inf", "NaN"] {
            assert!(
                matches!(parse_usd_list(raw), Err(Error::InvalidInput(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn rejects_lists_whose_sum_overflows() {
        assert!(matches!(
            parse_usd_list("1e308, 1e308"),
            Err(Error::InvalidInput(_))
        ));
        assert!(parse_usd_list("1e308").is_ok());
    }

    #[test]
    fn under_threshold_pays_flat_shipping() {
        let fees = compute_fees(100.0);
        assert_eq!(fees.shipping_usd, 20.0);
        assert_eq!(fees.duty_usd, 15.0);
        assert_eq!(fees.total_usd, 135.0);
    }

    #[test]
    fn threshold_itself_is_not_free() {
        let fees = compute_fees(250.0);
        assert_eq!(fees.shipping_usd, 20.0);
        assert_eq!(fees.duty_usd, 37.5);
        assert_eq!(fees.total_usd, 307.5);
    }

    #[test]
    fn over_threshold_ships_free() {
        let fees = compute_fees(300.0);
        assert!(fees.is_free_shipping());
        assert_eq!(fees.duty_usd, 45.0);
        assert_eq!(fees.total_usd, 345.0);
    }

    #[test]
    fn total_is_sum_of_parts() {
        for subtotal in [0.01, 1.0, 19.99, 249.99, 250.0, 250.01, 1234.56, 1e6] {
            let fees = compute_fees(subtotal);
            assert_eq!(fees.total_usd, subtotal + fees.shipping_usd + fees.duty_usd);
        }
    }

    #[test]
    fn conversion_is_plain_multiplication() {
        assert_eq!(convert_to_cad(100.0, 1.35), 100.0 * 1.35);
        let breakdown = compute_fees(100.0).convert(1.4);
        assert_eq!(breakdown.total_cad, breakdown.total_usd * 1.4);
        assert_eq!(breakdown.conversion_rate, 1.4);
    }

    #[test]
    fn custom_schedule_is_respected() {
        let schedule = FeeSchedule {
            duty_rate: 0.1,
            shipping_cost: 30.0,
            free_shipping_threshold: 100.0,
        };
        let fees = schedule.compute_fees(50.0);
        assert_eq!(fees.shipping_usd, 30.0);
        assert!(approx(fees.duty_usd, 5.0));
        assert!(schedule.compute_fees(100.5).is_free_shipping());
        assert!(approx(schedule.duty_percent(), 10.0));
    }
}
