use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DROP_WEEKDAY: Weekday = Weekday::Thu;

/// The droplist page expected for a given drop date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroplistTarget {
    pub url: String,
    pub date: NaiveDate,
    pub season: String,
}

impl DroplistTarget {
    pub fn for_date(base_url: &str, reference: NaiveDate) -> Self {
        let date = next_drop_day(reference);
        let season = season_label(date);
        let url = format!(
            "{}/season/{}/droplist/{}/",
            base_url.trim_end_matches('/'),
            season,
            date_slug(date)
        );

        Self { url, date, season }
    }
}

/// The drop weekday on or after `reference`.
pub fn next_drop_day(reference: NaiveDate) -> NaiveDate {
    let target = DROP_WEEKDAY.num_days_from_sunday();
    let current = reference.weekday().num_days_from_sunday();
    let distance = (target + 7 - current) % 7;
    reference + Duration::days(i64::from(distance))
}

/// February through August is spring-summer; the rest of the year is fall-winter.
pub fn season_label(date: NaiveDate) -> String {
    let season = if (1..=7).contains(&date.month0()) {
        "spring-summer"
    } else {
        "fall-winter"
    };
    format!("{}{}", season, date.year())
}

pub fn date_slug(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
