use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Indices of the `haystacks` matching `query`, best score first.
    /// Ties keep their original order; an empty query matches everything.
    pub fn filter<S: AsRef<str>>(&mut self, query: &str, haystacks: &[S]) -> Vec<usize> {
        if query.trim().is_empty() {
            return (0..haystacks.len()).collect();
        }

        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
        let mut buf = Vec::new();

        let mut scored: Vec<(usize, u32)> = haystacks
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                let haystack = Utf32Str::new(h.as_ref(), &mut buf);
                pattern.score(haystack, &mut self.matcher).map(|score| (i, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(i, _)| i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let items = ["b", "a", "c"];
        assert_eq!(FuzzyMatcher::new().filter("", &items), vec![0, 1, 2]);
    }

    #[test]
    fn non_matching_items_are_dropped() {
        let items = ["rust borrow checker", "python decorators", "rustup toolchain"];
        let hits = FuzzyMatcher::new().filter("rust", &items);
        assert_eq!(hits.len(), 2);
        assert!(!hits.contains(&1));
    }

    #[test]
    fn subsequence_matches() {
        let items = ["DuckDuckGo", "Wikipedia"];
        assert_eq!(FuzzyMatcher::new().filter("ddg", &items), vec![0]);
    }
}
