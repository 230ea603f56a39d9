//! Order summary and price display

use serde::{Deserialize, Serialize};

use crate::cart;
use crate::config::PricingConfig;
use crate::model::CartEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: u64,
    pub shipping: u64,
    pub tax: u64,
    pub total: u64,
}

impl OrderSummary {
    pub fn compute(entries: &[CartEntry], pricing: &PricingConfig) -> Self {
        let subtotal = cart::subtotal(entries);
        let shipping = if subtotal > pricing.free_shipping_threshold {
            0
        } else {
            pricing.flat_shipping
        };
        // rounded half up to whole units
        let tax = subtotal
            .saturating_mul(pricing.vat_per_mille)
            .saturating_add(500)
            / 1000;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }
}

/// `25000` → `₦25,000`
pub fn format_price(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{symbol}{grouped}")
}
