use serde::{Deserialize, Serialize};

use crate::calculator::convert_to_cad;

/// Shipping and duty on a USD subtotal, before currency conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    pub subtotal_usd: f64,
    pub shipping_usd: f64,
    pub duty_usd: f64,
    pub total_usd: f64,
}

impl Fees {
    pub fn is_free_shipping(&self) -> bool {
        self.shipping_usd == 0.0
    }

    pub fn convert(self, conversion_rate: f64) -> FeeBreakdown {
        FeeBreakdown {
            subtotal_usd: self.subtotal_usd,
            shipping_usd: self.shipping_usd,
            duty_usd: self.duty_usd,
            total_usd: self.total_usd,
            total_cad: convert_to_cad(self.total_usd, conversion_rate),
            conversion_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub subtotal_usd: f64,
    pub shipping_usd: f64,
    pub duty_usd: f64,
    pub total_usd: f64,
    pub total_cad: f64,
    pub conversion_rate: f64,
}

impl FeeBreakdown {
    pub fn is_free_shipping(&self) -> bool {
        self.shipping_usd == 0.0
    }
}
