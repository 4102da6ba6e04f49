//! In-memory search over a loaded policy set.
//!
//! The listing surface fetches the full result set once and re-derives a
//! filtered view from the search term on every request, mirroring a
//! keystroke-driven search box. The filter is a plain case-insensitive
//! substring match over title and content; it never touches the datastore.

use crate::store::Policy;

/// Derive the filtered view for a search term.
///
/// A trimmed-empty term yields the full set unchanged. Otherwise the result
/// is the subset whose title or content contains the lowercased term as a
/// substring. Trimming is only for the emptiness test: a padded term like
/// `" water "` requires the padding in the haystack too. Absent fields are
/// non-matching, never a panic. Input order (date descending, as fetched) is
/// preserved.
pub fn filter_policies(policies: &[Policy], term: &str) -> Vec<Policy> {
    if term.trim().is_empty() {
        return policies.to_vec();
    }

    let needle = term.to_lowercase();
    policies
        .iter()
        .filter(|p| {
            field_matches(p.title.as_deref(), &needle)
                || field_matches(p.content.as_deref(), &needle)
        })
        .cloned()
        .collect()
}

fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn policy(id: i64, title: &str, content: &str) -> Policy {
        Policy {
            id,
            title: Some(title.to_string()),
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            category: Some("General".to_string()),
            region: Some("North".to_string()),
            content: Some(content.to_string()),
            link: None,
        }
    }

    fn sparse_policy(id: i64) -> Policy {
        Policy {
            id,
            title: None,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            category: None,
            region: None,
            content: None,
            link: None,
        }
    }

    fn fixture() -> Vec<Policy> {
        vec![
            policy(3, "Housing subsidy reform", "Expands eligibility for renters"),
            policy(2, "Transport levy", "A new levy on commercial housing transport"),
            policy(1, "Water standards", "Updated drinking water limits"),
        ]
    }

    #[test]
    fn test_empty_term_returns_full_set() {
        let all = fixture();
        assert_eq!(filter_policies(&all, ""), all);
    }

    #[test]
    fn test_whitespace_term_returns_full_set() {
        let all = fixture();
        assert_eq!(filter_policies(&all, "   \t"), all);
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let all = fixture();
        let filtered = filter_policies(&all, "HOUSING");
        // "housing" appears in one title and one content field.
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 3);
        assert_eq!(filtered[1].id, 2);
    }

    #[test]
    fn test_matches_content_only() {
        let all = fixture();
        let filtered = filter_policies(&all, "drinking");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_absent_fields_are_non_matching() {
        let mut all = fixture();
        all.push(sparse_policy(4));

        // The sparse row is part of the unfiltered view...
        let unfiltered = filter_policies(&all, "");
        assert_eq!(unfiltered.len(), 4);

        // ...but never matches a term, and never panics.
        let filtered = filter_policies(&all, "housing");
        assert!(filtered.iter().all(|p| p.id != 4));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_padded_term_requires_padding_in_haystack() {
        let all = vec![
            policy(1, "The water mains", "maintenance schedule"),
            policy(2, "Waterfront zoning", "harbour district"),
        ];

        // " water " needs the surrounding spaces in the haystack.
        let filtered = filter_policies(&all, " water ");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);

        // Unpadded, both rows match.
        assert_eq!(filter_policies(&all, "water").len(), 2);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let all = fixture();
        assert!(filter_policies(&all, "pension").is_empty());
    }

    #[test]
    fn test_term_matching_everything_returns_full_set() {
        let all = fixture();
        // Every fixture title or content contains the letter "a".
        assert_eq!(filter_policies(&all, "a"), all);
    }

    #[test]
    fn test_order_is_preserved() {
        let all = fixture();
        let filtered = filter_policies(&all, "e");
        let ids: Vec<i64> = filtered.iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_empty_set_always_yields_empty() {
        assert!(filter_policies(&[], "anything").is_empty());
        assert!(filter_policies(&[], "").is_empty());
    }

    proptest! {
        /// Filtering twice with the same term equals filtering once.
        #[test]
        fn prop_filter_is_idempotent(term in ".{0,16}", titles in proptest::collection::vec(".{0,24}", 0..8)) {
            let set: Vec<Policy> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| policy(i as i64, t, "fixed content"))
                .collect();
            let once = filter_policies(&set, &term);
            let twice = filter_policies(&once, &term);
            prop_assert_eq!(once, twice);
        }

        /// The filtered view is always a subsequence of the input.
        #[test]
        fn prop_filter_returns_subsequence(term in "[a-z]{0,6}", titles in proptest::collection::vec("[a-z ]{0,12}", 0..8)) {
            let set: Vec<Policy> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| policy(i as i64, t, ""))
                .collect();
            let filtered = filter_policies(&set, &term);
            let mut cursor = set.iter();
            for kept in &filtered {
                prop_assert!(cursor.any(|p| p == kept));
            }
        }
    }
}
