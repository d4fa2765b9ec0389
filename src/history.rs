pub const HISTORY_LIMIT: usize = 7;

/// Moves `query` to the front of `history`, dropping anything past the limit.
pub fn record(history: &[String], query: &str) -> Vec<String> {
    let mut updated = Vec::with_capacity(HISTORY_LIMIT);
    updated.push(query.to_string());
    updated.extend(history.iter().filter(|h| h.as_str() != query).cloned());
    updated.truncate(HISTORY_LIMIT);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn record_into_empty() {
        assert_eq!(record(&[], "x"), strings(&["x"]));
    }

    #[test]
    fn existing_entry_moves_to_front() {
        assert_eq!(record(&strings(&["b", "a", "c"]), "a"), strings(&["a", "b", "c"]));
        assert_eq!(record(&strings(&["a", "b"]), "a"), strings(&["a", "b"]));
    }

    #[test]
    fn capped_at_limit() {
        let full = strings(&["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(record(&full, "new"), strings(&["new", "1", "2", "3", "4", "5", "6"]));
        assert_eq!(record(&full, "7"), strings(&["7", "1", "2", "3", "4", "5", "6"]));
    }
}
