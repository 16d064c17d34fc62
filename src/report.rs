//! Plain-text rendering of quotes and droplists for the terminal.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::calculator::FeeSchedule;
use crate::cart::{CartQuote, ItemQuote};
use crate::models::{Availability, FeeBreakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Cad,
}

impl Currency {
    fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cad => "CA$",
        }
    }
}

/// en-US style: symbol, thousands separators, two decimals.
///
/// Non-finite amounts are printed as-is (`$inf`, `$NaN`) rather than as a number.
pub fn format_currency(value: f64, currency: Currency) -> String {
    if !value.is_finite() {
        return format!("{}{}", currency.symbol(), value);
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, currency.symbol(), grouped, fraction)
}

/// e.g. `Thursday, May 2, 2024`
pub fn format_drop_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn shipping_line(breakdown: &FeeBreakdown) -> String {
    if breakdown.is_free_shipping() {
        "Shipping: Free".to_string()
    } else {
        format!("Shipping: {}", format_currency(breakdown.shipping_usd, Currency::Usd))
    }
}

/// Up to two decimals, trailing zeros dropped: `15`, `7`, `12.5`.
pub fn format_percent(percent: f64) -> String {
    let fixed = format!("{:.2}", percent);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Marker for the display tone of an availability label.
fn availability_marker(availability: &Availability) -> &'static str {
    if availability.is_sold_out() {
        "✗ "
    } else if availability.is_available() {
        "✓ "
    } else {
        ""
    }
}

fn duty_line(breakdown: &FeeBreakdown, schedule: &FeeSchedule) -> String {
    format!(
        "Duty ({}%): {}",
        format_percent(schedule.duty_percent()),
        format_currency(breakdown.duty_usd, Currency::Usd)
    )
}

pub fn render_quote(breakdown: &FeeBreakdown, schedule: &FeeSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} CAD", format_currency(breakdown.total_cad, Currency::Cad));
    let _ = writeln!(
        out,
        "Subtotal from items: {}",
        format_currency(breakdown.subtotal_usd, Currency::Usd)
    );
    let _ = writeln!(out, "{}", shipping_line(breakdown));
    let _ = writeln!(out, "{}", duty_line(breakdown, schedule));
    let _ = writeln!(out, "USD → CAD rate: {:.4}", breakdown.conversion_rate);
    out
}

fn render_item(out: &mut String, item: &ItemQuote, schedule: &FeeSchedule) {
    let _ = writeln!(out, "{}", item.entry.name);
    let _ = writeln!(
        out,
        "  [{}] {}{}",
        item.entry.category,
        availability_marker(&item.entry.availability),
        item.entry.availability
    );
    if !item.entry.image.is_empty() {
        let _ = writeln!(out, "  {}", item.entry.image);
    }
    let _ = writeln!(
        out,
        "  {} USD price",
        format_currency(item.entry.price_usd, Currency::Usd)
    );
    let _ = writeln!(out, "  {}", shipping_line(&item.breakdown));
    let _ = writeln!(out, "  {}", duty_line(&item.breakdown, schedule));
    let _ = writeln!(
        out,
        "  {} CAD est.",
        format_currency(item.breakdown.total_cad, Currency::Cad)
    );
}

pub fn render_droplist(quote: &CartQuote, schedule: &FeeSchedule) -> String {
    let mut out = String::new();

    for item in &quote.items {
        render_item(&mut out, item, schedule);
        out.push('\n');
    }

    let total = &quote.total;
    let _ = writeln!(out, "Cart totals ({} items)", quote.items.len());
    let _ = writeln!(
        out,
        "Subtotal: {} USD",
        format_currency(total.subtotal_usd, Currency::Usd)
    );
    let _ = writeln!(out, "{}", shipping_line(total));
    let _ = writeln!(out, "{}", duty_line(total, schedule));
    let _ = writeln!(out, "Total: {}", format_currency(total.total_cad, Currency::Cad));
    let _ = writeln!(out, "Conversion rate applied: {:.4}", total.conversion_rate);
    out
}

pub fn droplist_status(quote: &CartQuote) -> String {
    format!(
        "Droplist for {} ({}) loaded. Source: {}",
        format_drop_date(quote.snapshot.retrieved_for_date),
        quote.snapshot.season_label,
        quote.snapshot.source_url
    )
}
