//! Property-based tests for catalog core types
//!
//! Uses proptest to verify invariants across many random inputs.

use catalog_core::types::{contains_pattern, CreateMusic, Page, PageRequest, MAX_TITLE_LEN};
use catalog_core::{Sort, SortDirection, SortField};
use proptest::prelude::*;

fn arbitrary_sort() -> impl Strategy<Value = Sort> {
    (
        prop::sample::select(SortField::ALL.to_vec()),
        prop::bool::ANY,
    )
        .prop_map(|(field, desc)| if desc { Sort::desc(field) } else { Sort::asc(field) })
}

proptest! {
    /// Property: every page but the last is full, and the pages cover the total
    #[test]
    fn total_pages_cover_total_elements(total in 0u64..10_000, size in 1u32..200) {
        let page: Page<()> = Page::new(vec![], total, PageRequest::new(0, size));
        let capacity = u64::from(page.total_pages) * u64::from(size);

        prop_assert!(capacity >= total);
        prop_assert!(capacity < total + u64::from(size));
    }

    /// Property: the displayed sort string parses back to the same sort
    #[test]
    fn sort_display_is_parseable(sort in arbitrary_sort()) {
        let parsed: Sort = sort.to_string().parse().unwrap();
        prop_assert_eq!(parsed, sort);
    }

    /// Property: ORDER BY clauses only ever contain known column names
    #[test]
    fn order_by_only_contains_known_columns(sort in arbitrary_sort()) {
        let clause = sort.order_by();
        for part in clause.split(", ") {
            let mut words = part.split(' ');
            let column = words.next().unwrap();
            let keyword = words.next().unwrap();
            prop_assert!(SortField::ALL.iter().any(|f| f.column() == column));
            prop_assert!(keyword == SortDirection::Asc.keyword() || keyword == SortDirection::Desc.keyword());
        }
    }

    /// Property: the LIKE pattern never contains an unescaped wildcard inside the delimiters
    #[test]
    fn contains_pattern_escapes_every_wildcard(value in ".{0,40}") {
        let pattern = contains_pattern(&value);
        let inner: Vec<char> = pattern[1..pattern.len() - 1].chars().collect();

        let mut i = 0;
        while i < inner.len() {
            if inner[i] == '\\' {
                prop_assert!(i + 1 < inner.len());
                prop_assert!(matches!(inner[i + 1], '%' | '_' | '\\'));
                i += 2;
            } else {
                prop_assert!(inner[i] != '%' && inner[i] != '_');
                i += 1;
            }
        }
    }

    /// Property: any non-blank title within the limit validates
    #[test]
    fn titles_within_limit_validate(title in "[A-Za-z0-9][A-Za-z0-9 ]{0,199}") {
        prop_assume!(title.chars().count() <= MAX_TITLE_LEN);
        let music = CreateMusic::new(title, "Artist").normalized();
        prop_assert!(music.validate().is_ok());
    }
}
