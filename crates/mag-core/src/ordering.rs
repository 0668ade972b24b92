//! Deterministic edition ordering.

use std::cmp::Ordering;

use crate::collation::compare_titles;
use crate::entities::Edition;

/// Return the editions ordered most recent first.
///
/// Editions without a `published` timestamp sort after every dated edition.
/// Equal timestamps fall back to [`compare_titles`]; titles that still compare
/// equal keep their input order (the sort is stable). The input is not
/// modified.
#[must_use]
pub fn sort_editions(editions: &[Edition]) -> Vec<Edition> {
    let mut sorted = editions.to_vec();
    sorted.sort_by(compare_editions);
    sorted
}

/// Total order used by [`sort_editions`].
#[must_use]
pub fn compare_editions(a: &Edition, b: &Edition) -> Ordering {
    // `None < Some(_)`, so reversing puts undated editions last.
    b.published
        .cmp(&a.published)
        .then_with(|| compare_titles(&a.title, &b.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edition(path: &str, title: &str, published: Option<i64>) -> Edition {
        Edition {
            path: path.into(),
            href: format!("https://example.test{path}"),
            title: title.into(),
            published,
            num_articles: None,
            lang: None,
            tags: Vec::new(),
            description: None,
            custom_image_src: None,
            screenshot_src: None,
        }
    }

    fn paths(editions: &[Edition]) -> Vec<&str> {
        editions.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn empty_and_single_are_unchanged() {
        assert!(sort_editions(&[]).is_empty());

        let one = vec![edition("/a", "A", None)];
        assert_eq!(sort_editions(&one), one);
    }

    #[test]
    fn undated_editions_sort_last() {
        let input = vec![
            edition("/draft", "Draft", None),
            edition("/old", "Old", Some(1)),
            edition("/new", "New", Some(2)),
        ];
        assert_eq!(paths(&sort_editions(&input)), ["/new", "/old", "/draft"]);
    }

    #[test]
    fn negative_timestamps_still_beat_undated() {
        let input = vec![
            edition("/draft", "A", None),
            edition("/ancient", "B", Some(-100)),
        ];
        assert_eq!(paths(&sort_editions(&input)), ["/ancient", "/draft"]);
    }

    #[test]
    fn equal_titles_keep_input_order() {
        let input = vec![
            edition("/first", "Édition", Some(5)),
            edition("/second", "edition", Some(5)),
            edition("/third", "EDITION", Some(5)),
        ];
        assert_eq!(
            paths(&sort_editions(&input)),
            ["/first", "/second", "/third"]
        );
    }

    #[test]
    fn sorting_is_idempotent() {
        let input = vec![
            edition("/c", "Part 10", Some(7)),
            edition("/a", "Part 2", Some(7)),
            edition("/b", "zeta", None),
            edition("/d", "Alpha", Some(9)),
        ];
        let once = sort_editions(&input);
        let twice = sort_editions(&once);
        assert_eq!(once, twice);
        assert_eq!(paths(&once), ["/d", "/a", "/c", "/b"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![edition("/a", "A", Some(1)), edition("/b", "B", Some(2))];
        let snapshot = input.clone();
        let _ = sort_editions(&input);
        assert_eq!(input, snapshot);
    }
}
