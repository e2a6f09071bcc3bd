//! Intent classification: mapping query keywords to a sort preference.
//!
//! Rules live in an ordered list evaluated top-down and the FIRST matching
//! rule wins. (The earlier storefront implementation reassigned the sort on
//! every matching rule, so whichever rule happened to run last silently
//! won; the ordered list makes the priority explicit.)

use serde::{Deserialize, Serialize};

use crate::query::{SortField, SortOrder, SortSpec};

/// A single intent rule: keyword set, resulting sort, and the tag folded
/// into the search terms.
#[derive(Debug, Clone)]
struct IntentRule {
    keywords: &'static [&'static str],
    sort: SortSpec,
    tag: &'static str,
}

/// Ordered rule list; first match wins.
const RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &["cheap", "affordable", "budget"],
        sort: SortSpec {
            field: SortField::Price,
            order: SortOrder::Asc,
        },
        tag: "affordable",
    },
    IntentRule {
        keywords: &["best", "top", "rated"],
        sort: SortSpec {
            field: SortField::Rating,
            order: SortOrder::Desc,
        },
        tag: "rated",
    },
    IntentRule {
        keywords: &["latest", "new", "recent"],
        sort: SortSpec {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        },
        tag: "new",
    },
    IntentRule {
        keywords: &["expensive", "premium", "luxury"],
        sort: SortSpec {
            field: SortField::Price,
            order: SortOrder::Desc,
        },
        tag: "premium",
    },
];

/// The inferred sort preference and keyword tags for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIntent {
    /// Sort to apply to the catalog query.
    pub sort: SortSpec,
    /// Keyword tags contributed to the combined search terms.
    pub keywords: Vec<String>,
}

impl Default for ExtractedIntent {
    fn default() -> Self {
        ExtractedIntent {
            sort: SortSpec::price_ascending(),
            keywords: Vec::new(),
        }
    }
}

/// Detect intent from the query's tokens. Falls back to ascending price
/// when no rule matches.
pub fn detect<S: AsRef<str>>(tokens: &[S]) -> ExtractedIntent {
    for rule in RULES {
        let hit = tokens
            .iter()
            .any(|t| rule.keywords.contains(&t.as_ref()));
        if hit {
            return ExtractedIntent {
                sort: rule.sort,
                keywords: vec![rule.tag.to_string()],
            };
        }
    }
    ExtractedIntent::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_cheap_sorts_price_ascending() {
        let intent = detect(&tokens("cheap shoes"));
        assert_eq!(intent.sort, SortSpec::new(SortField::Price, SortOrder::Asc));
        assert_eq!(intent.keywords, vec!["affordable"]);
    }

    #[test]
    fn test_best_sorts_rating_descending() {
        let intent = detect(&tokens("best rated shoes"));
        assert_eq!(intent.sort, SortSpec::new(SortField::Rating, SortOrder::Desc));
        assert_eq!(intent.keywords, vec!["rated"]);
    }

    #[test]
    fn test_latest_sorts_date_descending() {
        let intent = detect(&tokens("latest shoes"));
        assert_eq!(
            intent.sort,
            SortSpec::new(SortField::CreatedAt, SortOrder::Desc)
        );
    }

    #[test]
    fn test_premium_sorts_price_descending() {
        let intent = detect(&tokens("luxury watch"));
        assert_eq!(intent.sort, SortSpec::new(SortField::Price, SortOrder::Desc));
        assert_eq!(intent.keywords, vec!["premium"]);
    }

    #[test]
    fn test_no_keyword_defaults_to_price_ascending() {
        let intent = detect(&tokens("running shoes"));
        assert_eq!(intent.sort, SortSpec::price_ascending());
        assert!(intent.keywords.is_empty());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Both "cheap" (rule 1) and "best" (rule 2) appear; the earlier
        // rule takes priority regardless of word order.
        let intent = detect(&tokens("best cheap shoes"));
        assert_eq!(intent.sort, SortSpec::new(SortField::Price, SortOrder::Asc));
    }
}
