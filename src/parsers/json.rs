use serde_json::Value;

use super::{clean_text, normalize_image_url, parse_price};
use crate::models::{Availability, CatalogEntry};

/// Extract catalog entries from a droplist JSON payload.
///
/// Entries are read from a top-level `products` or `items` array, or from the
/// payload itself when it is an array.
pub fn parse_json_droplist(payload: &Value, origin: &str) -> Vec<CatalogEntry> {
    let list = payload
        .get("products")
        .and_then(Value::as_array)
        .or_else(|| payload.get("items").and_then(Value::as_array))
        .or_else(|| payload.as_array());

    let Some(list) = list else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|item| parse_json_entry(item, origin))
        .collect()
}

fn parse_json_entry(item: &Value, origin: &str) -> Option<CatalogEntry> {
    let name = string_field(item, &["name", "title"])?;
    let price = json_price(item)?;
    let image = string_field(item, &["image", "img"])
        .map(|src| normalize_image_url(&src, origin))
        .unwrap_or_default();

    CatalogEntry::new(name, price, image, json_availability(item))
}

fn string_field(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let text = clean_text(item.get(*key)?.as_str()?);
        (!text.is_empty()).then_some(text)
    })
}

fn json_price(item: &Value) -> Option<f64> {
    let price = item.get("price");

    price
        .and_then(|p| p.get("usd"))
        .and_then(Value::as_f64)
        .or_else(|| price.and_then(Value::as_f64))
        .or_else(|| price.and_then(Value::as_str).and_then(parse_price))
        .or_else(|| {
            item.get("price_text")
                .and_then(Value::as_str)
                .and_then(parse_price)
        })
}

fn json_availability(item: &Value) -> Availability {
    let flag = |key: &str| item.get(key).and_then(Value::as_bool) == Some(true);

    if flag("available") || flag("in_stock") {
        Availability::Available
    } else if flag("sold_out") || flag("soldOut") {
        Availability::SoldOut
    } else {
        Availability::Unknown
    }
}
