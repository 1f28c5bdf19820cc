use chrono::{DateTime, Utc};

/// Width of the star bar, one star is 20%
pub fn rating_width(rating: f32) -> String {
    let stars = rating.round().clamp(0.0, 5.0) as u32;
    format!("{}%", stars * 20)
}

pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// e.g. "April 2019"
pub fn format_month_year(date: &DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}
