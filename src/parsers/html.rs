use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{clean_text, normalize_image_url, parse_price};
use crate::models::{Availability, CatalogEntry};

/// Item containers. Matches are unioned, not prioritised.
pub const ITEM_SELECTORS: &[&str] = &[
    ".catalog-item",
    ".masonry__item",
    ".card-block",
    ".view_detail_box",
    ".droplist-item",
];

/// How a matched element yields its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Text,
    Attr(&'static str),
}

pub const NAME_FIELDS: &[(&str, Accessor)] = &[
    ("[itemprop=\"name\"]", Accessor::Text),
    (".name", Accessor::Text),
    (".card__title", Accessor::Text),
    (".catalog-item__title", Accessor::Text),
    ("h3", Accessor::Text),
    ("h4", Accessor::Text),
];

pub const PRICE_FIELDS: &[(&str, Accessor)] = &[
    ("[data-price]", Accessor::Text),
    (".price", Accessor::Text),
    (".label-price", Accessor::Text),
    (".catalog-item__price", Accessor::Text),
    (".card__price", Accessor::Text),
    (".sc-price", Accessor::Text),
    ("[data-price]", Accessor::Attr("data-price")),
];

pub const AVAILABILITY_FIELDS: &[(&str, Accessor)] = &[
    (".sold-out", Accessor::Text),
    (".label", Accessor::Text),
    (".badge", Accessor::Text),
    (".status", Accessor::Text),
    (".availability", Accessor::Text),
];

/// An ordered list of extraction strategies; the first non-empty result wins.
pub struct FieldChain {
    steps: Vec<(Selector, Accessor)>,
}

impl FieldChain {
    /// Selectors that fail to parse are skipped.
    pub fn new(fields: &[(&str, Accessor)]) -> Self {
        let steps = fields
            .iter()
            .filter_map(|(css, accessor)| match Selector::parse(css) {
                Ok(selector) => Some((selector, *accessor)),
                Err(_) => {
                    debug!("Skipping unparseable selector {}", css);
                    None
                }
            })
            .collect();
        Self { steps }
    }

    pub fn first_match(&self, element: &ElementRef<'_>) -> Option<String> {
        self.steps.iter().find_map(|(selector, accessor)| {
            let node = element.select(selector).next()?;
            let value = match accessor {
                Accessor::Text => clean_text(&node.text().collect::<String>()),
                Accessor::Attr(name) => clean_text(node.value().attr(name)?),
            };
            (!value.is_empty()).then_some(value)
        })
    }
}

struct DroplistSelectors {
    items: Selector,
    image: Selector,
    name: FieldChain,
    price: FieldChain,
    availability: FieldChain,
}

impl DroplistSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            items: Selector::parse(&ITEM_SELECTORS.join(", ")).ok()?,
            image: Selector::parse("img").ok()?,
            name: FieldChain::new(NAME_FIELDS),
            price: FieldChain::new(PRICE_FIELDS),
            availability: FieldChain::new(AVAILABILITY_FIELDS),
        })
    }
}

/// Extract catalog entries from droplist markup.
///
/// Items without a name or a positive price are dropped silently.
pub fn parse_html_droplist(html: &str, origin: &str) -> Vec<CatalogEntry> {
    let Some(selectors) = DroplistSelectors::new() else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    let mut dropped = 0;

    for element in document.select(&selectors.items) {
        let name = selectors.name.first_match(&element).unwrap_or_default();
        let price = selectors
            .price
            .first_match(&element)
            .and_then(|text| parse_price(&text));
        let image = find_image(&element, &selectors.image, origin);
        let availability = selectors
            .availability
            .first_match(&element)
            .map(|label| Availability::from_label(&label))
            .unwrap_or_default();

        match price.and_then(|price| CatalogEntry::new(name, price, image, availability)) {
            Some(entry) => entries.push(entry),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("Dropped {} droplist elements without a name or price", dropped);
    }

    entries
}

fn find_image(element: &ElementRef<'_>, image: &Selector, origin: &str) -> String {
    element
        .select(image)
        .next()
        .and_then(|img| {
            img.value()
                .attr("data-src")
                .filter(|src| !src.trim().is_empty())
                .or_else(|| img.value().attr("src"))
        })
        .map(|src| normalize_image_url(src, origin))
        .unwrap_or_default()
}
