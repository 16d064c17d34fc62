use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    Available,
    SoldOut,
    #[default]
    Unknown,
    Label(String),
}

impl Availability {
    /// Build from scraped status text. Empty text is `Unknown`.
    pub fn from_label(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Availability::Unknown;
        }

        match trimmed.to_lowercase().as_str() {
            "available" => Availability::Available,
            "sold out" | "sold-out" | "soldout" => Availability::SoldOut,
            "unknown" => Availability::Unknown,
            _ => Availability::Label(trimmed.to_string()),
        }
    }

    pub fn is_sold_out(&self) -> bool {
        match self {
            Availability::SoldOut => true,
            Availability::Label(label) => label.to_lowercase().contains("sold"),
            _ => false,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            Availability::Available => true,
            Availability::Label(label) => {
                let lower = label.to_lowercase();
                !lower.contains("sold") && (lower.contains("available") || lower.contains("in stock"))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::SoldOut => write!(f, "Sold out"),
            Availability::Unknown => write!(f, "Unknown"),
            Availability::Label(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Upcoming,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// One item scraped from a droplist page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price_usd: f64,
    pub image: String,
    pub availability: Availability,
    pub category: Category,
}

impl CatalogEntry {
    /// Returns `None` unless the name is non-empty and the price is finite and positive.
    pub fn new(
        name: impl Into<String>,
        price_usd: f64,
        image: impl Into<String>,
        availability: Availability,
    ) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() || !price_usd.is_finite() || price_usd <= 0.0 {
            return None;
        }

        Some(Self {
            name,
            price_usd,
            image: image.into(),
            availability,
            category: Category::Upcoming,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_normalises_known_states() {
        assert_eq!(Availability::from_label(""), Availability::Unknown);
        assert_eq!(Availability::from_label("  Sold Out "), Availability::SoldOut);
        assert_eq!(Availability::from_label("AVAILABLE"), Availability::Available);
        assert_eq!(
            Availability::from_label("Online only"),
            Availability::Label("Online only".to_string())
        );
    }

    #[test]
    fn label_tone_follows_keywords() {
        assert!(Availability::Label("Sold out online".to_string()).is_sold_out());
        assert!(Availability::Label("In Stock".to_string()).is_available());
        assert!(!Availability::Label("Online only".to_string()).is_available());
        assert!(!Availability::Unknown.is_sold_out());
    }

    #[test]
    fn entries_require_name_and_positive_price() {
        assert!(CatalogEntry::new("Box Logo Tee", 48.0, "", Availability::Unknown).is_some());
        assert!(CatalogEntry::new("  ", 48.0, "", Availability::Unknown).is_none());
        assert!(CatalogEntry::new("Box Logo Tee", 0.0, "", Availability::Unknown).is_none());
        assert!(CatalogEntry::new("Box Logo Tee", f64::NAN, "", Availability::Unknown).is_none());
    }

    #[test]
    fn entries_are_tagged_upcoming() {
        let entry = CatalogEntry::new("Beanie", 40.0, "", Availability::SoldOut).unwrap();
        assert_eq!(entry.category, Category::Upcoming);
        assert_eq!(entry.category.to_string(), "upcoming");
        assert_eq!(entry.availability.to_string(), "Sold out");
    }
}
