use once_cell::sync::Lazy;
use regex::Regex;

static PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$?(\d+(?:\.\d+)?)")
        .expect("Invalid price regex")
});

/// Parse a USD amount out of scraped price text.
///
/// Commas and whitespace are stripped first, so `"$1, 299.00"` reads as 1299.
/// Returns `None` when no amount is present.
pub fn parse_price(raw_text: &str) -> Option<f64> {
    if raw_text.is_empty() {
        return None;
    }

    let clean: String = raw_text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let captures = PRICE_REGEX.captures(&clean)?;
    let value = captures.get(1)?.as_str().parse::<f64>().ok()?;

    value.is_finite().then_some(value)
}
