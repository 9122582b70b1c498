//! Read-model helpers for blogs and projects: dates, reading time, excerpts and
//! feature lists. Pure functions; the views built from them live in [`views`].

pub mod views;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const WORDS_PER_MINUTE: usize = 200;
pub const EXCERPT_CHARS: usize = 200;
pub const SUMMARY_CHARS: usize = 160;
pub const HIGHLIGHTED_FEATURES: usize = 3;

/// Minutes to read `content`, rounded up, never below one.
#[must_use]
pub fn reading_minutes(content: &str) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[must_use]
pub fn reading_time(content: &str) -> String {
    format!("{} min read", reading_minutes(content))
}

/// `March 5, 2024`
#[must_use]
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `March 2024`
#[must_use]
pub fn format_month_year(date: &DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}

/// First `max` characters, plus `...` when anything was cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> (String, bool) {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        (format!("{head}..."), true)
    } else {
        (head, false)
    }
}

#[must_use]
pub fn excerpt(content: &str) -> String {
    truncate_chars(content, EXCERPT_CHARS).0
}

/// Summary used for page metadata; cut without an ellipsis.
#[must_use]
pub fn summary(content: &str) -> String {
    content.chars().take(SUMMARY_CHARS).collect()
}

#[must_use]
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits the stored comma-separated feature string into trimmed, non-empty entries.
#[must_use]
pub fn split_features(features: &str) -> Vec<String> {
    features
        .split(',')
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Commerce,
    Payments,
    Auth,
    Mobile,
    Data,
    Cloud,
    General,
}

impl FeatureCategory {
    const KEYWORDS: [(Self, &'static [&'static str]); 6] = [
        (Self::Commerce, &["cart", "ecommerce"]),
        (Self::Payments, &["payment", "stripe"]),
        (Self::Auth, &["auth", "user", "login"]),
        (Self::Mobile, &["mobile", "responsive"]),
        (Self::Data, &["database", "db"]),
        (Self::Cloud, &["cloud", "deploy"]),
    ];

    /// First category whose keyword appears in the feature, case-insensitively.
    #[must_use]
    pub fn classify(feature: &str) -> Self {
        let lower = feature.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
            .map_or(Self::General, |(category, _)| *category)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_minutes(""), 1);
        assert_eq!(reading_minutes(&"word ".repeat(200)), 1);
        assert_eq!(reading_minutes(&"word ".repeat(201)), 2);
        assert_eq!(reading_time(&"word ".repeat(450)), "3 min read");
    }

    #[test]
    fn dates_use_month_names() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(format_long_date(&date), "March 5, 2024");
        assert_eq!(format_month_year(&date), "March 2024");
    }

    #[test]
    fn excerpt_appends_ellipsis_only_when_cut() {
        assert_eq!(excerpt("short"), "short");
        let long = "é".repeat(250);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
        assert_eq!(summary(&long).chars().count(), SUMMARY_CHARS);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            paragraphs("One.\n\nTwo\nlines.\n\n\n\nThree."),
            vec!["One.", "Two\nlines.", "Three."]
        );
    }

    #[test]
    fn features_are_trimmed_and_classified() {
        let features = split_features(" Shopping cart , Stripe payments,, User login, Postgres db ");
        assert_eq!(
            features,
            vec!["Shopping cart", "Stripe payments", "User login", "Postgres db"]
        );
        let categories: Vec<_> = features.iter().map(|f| FeatureCategory::classify(f)).collect();
        assert_eq!(
            categories,
            vec![
                FeatureCategory::Commerce,
                FeatureCategory::Payments,
                FeatureCategory::Auth,
                FeatureCategory::Data
            ]
        );
        assert_eq!(FeatureCategory::classify("Dark mode"), FeatureCategory::General);
    }
}
