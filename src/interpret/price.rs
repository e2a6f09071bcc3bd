//! Price-range extraction from comparison phrases.
//!
//! Four patterns are tried in order and the first match wins:
//! "under/below/less than N", "over/above/more than N",
//! "between N and M", and "N-M". Currency symbols (₹, $) are optional.
//! No match means no price filter.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::query::Constraint;

lazy_static! {
    static ref UNDER_RE: Regex =
        Regex::new(r"(?:under|below|less than)\s+[₹$]?(\d+(?:\.\d+)?)").unwrap();
    static ref OVER_RE: Regex =
        Regex::new(r"(?:over|above|more than)\s+[₹$]?(\d+(?:\.\d+)?)").unwrap();
    static ref BETWEEN_RE: Regex =
        Regex::new(r"between\s+[₹$]?(\d+(?:\.\d+)?)\s+and\s+[₹$]?(\d+(?:\.\d+)?)").unwrap();
    static ref SPAN_RE: Regex =
        Regex::new(r"[₹$]?(\d+(?:\.\d+)?)\s*-\s*[₹$]?(\d+(?:\.\d+)?)").unwrap();
}

/// A numeric price range; at least one bound is always set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

impl PriceRange {
    /// Range with only an upper bound.
    pub fn at_most(max: f64) -> Self {
        PriceRange {
            min: None,
            max: Some(max),
        }
    }

    /// Range with only a lower bound.
    pub fn at_least(min: f64) -> Self {
        PriceRange {
            min: Some(min),
            max: None,
        }
    }

    /// Closed range.
    pub fn between(min: f64, max: f64) -> Self {
        PriceRange {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Convert to a filter constraint on the price field.
    pub fn to_constraint(self) -> Constraint {
        Constraint::Range {
            min: self.min,
            max: self.max,
        }
    }

    /// Whether a price satisfies the range.
    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Extract a price range from a normalized query, if it contains a
/// comparison phrase.
pub fn extract(query: &str) -> Option<PriceRange> {
    if let Some(caps) = UNDER_RE.captures(query) {
        return parse_amount(&caps[1]).map(PriceRange::at_most);
    }
    if let Some(caps) = OVER_RE.captures(query) {
        return parse_amount(&caps[1]).map(PriceRange::at_least);
    }
    if let Some(caps) = BETWEEN_RE.captures(query) {
        if let (Some(min), Some(max)) = (parse_amount(&caps[1]), parse_amount(&caps[2])) {
            return Some(PriceRange::between(min, max));
        }
        return None;
    }
    if let Some(caps) = SPAN_RE.captures(query) {
        if let (Some(min), Some(max)) = (parse_amount(&caps[1]), parse_amount(&caps[2])) {
            return Some(PriceRange::between(min, max));
        }
    }
    None
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under() {
        assert_eq!(extract("shoes under 500"), Some(PriceRange::at_most(500.0)));
        assert_eq!(extract("shoes below ₹500"), Some(PriceRange::at_most(500.0)));
        assert_eq!(
            extract("laptop less than $1200"),
            Some(PriceRange::at_most(1200.0))
        );
    }

    #[test]
    fn test_over() {
        assert_eq!(extract("watch over 2000"), Some(PriceRange::at_least(2000.0)));
        assert_eq!(
            extract("phone more than 300"),
            Some(PriceRange::at_least(300.0))
        );
    }

    #[test]
    fn test_between() {
        assert_eq!(
            extract("shoes between 100 and 500"),
            Some(PriceRange::between(100.0, 500.0))
        );
        assert_eq!(
            extract("shoes between ₹100 and ₹500"),
            Some(PriceRange::between(100.0, 500.0))
        );
    }

    #[test]
    fn test_span() {
        assert_eq!(extract("shoes 100-500"), Some(PriceRange::between(100.0, 500.0)));
        assert_eq!(
            extract("shoes $100 - $500"),
            Some(PriceRange::between(100.0, 500.0))
        );
    }

    #[test]
    fn test_no_price_phrase() {
        assert_eq!(extract("nike shoes"), None);
        assert_eq!(extract("under pressure"), None);
    }

    #[test]
    fn test_pattern_order_first_match_wins() {
        // "under" outranks the span pattern even when both could match.
        assert_eq!(
            extract("shoes under 500 or 100-200"),
            Some(PriceRange::at_most(500.0))
        );
    }

    #[test]
    fn test_range_contains() {
        let range = PriceRange::between(100.0, 500.0);
        assert!(range.contains(100.0));
        assert!(range.contains(500.0));
        assert!(!range.contains(99.9));
        assert!(!range.contains(500.1));

        assert!(PriceRange::at_most(500.0).contains(0.0));
        assert!(PriceRange::at_least(100.0).contains(1e9));
    }
}
