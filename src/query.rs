use crate::storage::link::{Link, SortOption};

/// Category filter value meaning "no category restriction"
pub const ALL_CATEGORIES: &str = "all";

/// Predicate for the category-and-search filter. The search term matches
/// case-insensitively as a substring of title, description, URL, or any tag.
pub fn matches(link: &Link, category_filter: &str, search_term: &str) -> bool {
    let matches_category = category_filter == ALL_CATEGORIES || link.category == category_filter;

    let matches_search = if search_term.is_empty() {
        true
    } else {
        let term = search_term.to_lowercase();
        link.title.to_lowercase().contains(&term)
            || link.description.to_lowercase().contains(&term)
            || link.url.to_lowercase().contains(&term)
            || link.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    };

    matches_category && matches_search
}

/// Sort in place. `sort_by` is stable, so ties keep their collection order.
pub fn sort_links(links: &mut [Link], sort: SortOption) {
    match sort {
        SortOption::Newest => links.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => links.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::Alphabetical => {
            links.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortOption::MostVisited => links.sort_by(|a, b| b.visit_count.cmp(&a.visit_count)),
    }
}

/// Produce the displayed view of the collection: filter, then stable sort.
/// Pure function of its inputs; re-run on every change to any of them.
pub fn query_links(
    links: &[Link],
    category_filter: &str,
    search_term: &str,
    sort: SortOption,
) -> Vec<Link> {
    let mut result: Vec<Link> = links
        .iter()
        .filter(|link| matches(link, category_filter, search_term))
        .cloned()
        .collect();
    sort_links(&mut result, sort);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, title: &str, category: &str, created_at: i64, visit_count: u64) -> Link {
        Link {
            id: id.to_string(),
            url: format!("https://{}.example.com", id),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            tags: Vec::new(),
            favicon: String::new(),
            created_at,
            last_visited: None,
            visit_count,
        }
    }

    #[test]
    fn category_filter_all_passes_everything() {
        let links = vec![link("a", "A", "work", 1, 0), link("b", "B", "travel", 2, 0)];
        let result = query_links(&links, ALL_CATEGORIES, "", SortOption::Oldest);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn category_filter_selects_exactly_that_category() {
        let links = vec![
            link("a", "A", "work", 1, 0),
            link("b", "B", "travel", 2, 0),
            link("c", "C", "work", 3, 0),
        ];
        let result = query_links(&links, "work", "", SortOption::Oldest);
        assert_eq!(result.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["a", "c"]);

        assert!(query_links(&links, "finance", "", SortOption::Oldest).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring_over_all_fields() {
        let mut tagged = link("a", "Plain", "work", 1, 0);
        tagged.tags = vec!["Rust".to_string()];
        let described = {
            let mut l = link("b", "Other", "work", 2, 0);
            l.description = "daily NEWS digest".to_string();
            l
        };
        let by_url = link("github", "Code", "work", 3, 0);
        let links = vec![tagged, described, by_url];

        let hit = |term: &str| -> Vec<String> {
            query_links(&links, ALL_CATEGORIES, term, SortOption::Oldest)
                .iter()
                .map(|l| l.id.clone())
                .collect()
        };

        assert_eq!(hit("rust"), ["a"]); // tag match
        assert_eq!(hit("news"), ["b"]); // description match
        assert_eq!(hit("github"), ["github"]); // url match
        assert_eq!(hit("plain"), ["a"]); // title match
        assert!(hit("zzz").is_empty());
    }

    #[test]
    fn search_and_category_combine() {
        let links = vec![link("a", "Report", "work", 1, 0), link("b", "Report", "travel", 2, 0)];
        let result = query_links(&links, "travel", "report", SortOption::Oldest);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn output_is_exact_filter_subset() {
        let links = vec![
            link("a", "Alpha", "work", 1, 0),
            link("b", "Beta", "travel", 2, 0),
            link("c", "Alpha two", "work", 3, 0),
        ];
        let result = query_links(&links, "work", "alpha", SortOption::Newest);
        for l in &result {
            assert!(matches(l, "work", "alpha"));
        }
        let expected = links.iter().filter(|l| matches(l, "work", "alpha")).count();
        assert_eq!(result.len(), expected);
    }

    #[test]
    fn sort_by_creation_time() {
        let links = vec![
            link("b", "B", "work", 2000, 0),
            link("a", "A", "work", 1000, 0),
            link("c", "C", "work", 3000, 0),
        ];
        let oldest = query_links(&links, ALL_CATEGORIES, "", SortOption::Oldest);
        assert_eq!(oldest.iter().map(|l| l.created_at).collect::<Vec<_>>(), [1000, 2000, 3000]);

        let newest = query_links(&links, ALL_CATEGORIES, "", SortOption::Newest);
        assert_eq!(newest.iter().map(|l| l.created_at).collect::<Vec<_>>(), [3000, 2000, 1000]);
    }

    #[test]
    fn sort_alphabetical_ignores_case() {
        let links = vec![
            link("1", "banana", "work", 1, 0),
            link("2", "Apple", "work", 2, 0),
            link("3", "cherry", "work", 3, 0),
        ];
        let result = query_links(&links, ALL_CATEGORIES, "", SortOption::Alphabetical);
        assert_eq!(
            result.iter().map(|l| l.title.as_str()).collect::<Vec<_>>(),
            ["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn sort_most_visited_descending() {
        let links = vec![
            link("a", "A", "work", 1, 3),
            link("b", "B", "work", 2, 12),
            link("c", "C", "work", 3, 5),
        ];
        let result = query_links(&links, ALL_CATEGORIES, "", SortOption::MostVisited);
        assert_eq!(result.iter().map(|l| l.visit_count).collect::<Vec<_>>(), [12, 5, 3]);
    }

    #[test]
    fn sorting_is_stable_on_ties() {
        // equal keys, distinct collection order
        let links = vec![
            link("first", "Same", "work", 1000, 4),
            link("second", "Same", "work", 1000, 4),
            link("third", "Same", "work", 1000, 4),
        ];
        for sort in [
            SortOption::Newest,
            SortOption::Oldest,
            SortOption::Alphabetical,
            SortOption::MostVisited,
        ] {
            let once = query_links(&links, ALL_CATEGORIES, "", sort);
            let twice = query_links(&once, ALL_CATEGORIES, "", sort);
            let order: Vec<_> = once.iter().map(|l| l.id.as_str()).collect();
            assert_eq!(order, ["first", "second", "third"]);
            assert_eq!(once, twice);
        }
    }
}
