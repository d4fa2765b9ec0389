use crate::error::LaunchError;
use crate::matcher::FuzzyMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Whatever is typed right now.
    LiveQuery,
    HistoryEntry(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    Open,
    Submitted(String),
    Cancelled,
}

/// One-shot query prompt for a single template.
pub struct QueryPrompt {
    template_name: String,
    history: Vec<String>,
    input: String,
    state: PromptState,
}

impl QueryPrompt {
    /// `history` is only offered when non-empty; pass an empty list when
    /// history is turned off.
    pub fn new(template_name: &str, history: Vec<String>) -> Self {
        Self {
            template_name: template_name.to_string(),
            history,
            input: String::new(),
            state: PromptState::Open,
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn set_input(&mut self, input: &str) -> Result<(), LaunchError> {
        self.ensure_open()?;
        self.input = input.to_string();
        Ok(())
    }

    /// The live query first, then history entries matching the current input.
    pub fn candidates(&self, matcher: &mut FuzzyMatcher) -> Vec<Candidate> {
        let mut candidates = vec![Candidate::LiveQuery];
        candidates.extend(
            matcher
                .filter(&self.input, &self.history)
                .into_iter()
                .map(|i| Candidate::HistoryEntry(self.history[i].clone())),
        );
        candidates
    }

    pub fn label(&self, candidate: &Candidate) -> String {
        match candidate {
            Candidate::LiveQuery => format!("Search {} for {}", self.template_name, self.input),
            Candidate::HistoryEntry(entry) => entry.clone(),
        }
    }

    /// Submits the chosen candidate and returns the query to search for.
    pub fn choose(&mut self, candidate: Candidate) -> Result<String, LaunchError> {
        self.ensure_open()?;
        let query = match candidate {
            Candidate::LiveQuery => self.input.trim().to_string(),
            Candidate::HistoryEntry(entry) => entry,
        };
        self.state = PromptState::Submitted(query.clone());
        Ok(query)
    }

    pub fn cancel(&mut self) -> Result<(), LaunchError> {
        self.ensure_open()?;
        self.state = PromptState::Cancelled;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), LaunchError> {
        match self.state {
            PromptState::Open => Ok(()),
            _ => Err(LaunchError::PromptClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_with_history() -> QueryPrompt {
        QueryPrompt::new(
            "Search",
            vec!["rust traits".to_string(), "tokio select".to_string(), "rust lifetimes".to_string()],
        )
    }

    #[test]
    fn live_query_is_always_first() {
        let mut matcher = FuzzyMatcher::new();
        let mut prompt = prompt_with_history();
        assert_eq!(prompt.candidates(&mut matcher).len(), 4);

        prompt.set_input("zzzz").unwrap();
        assert_eq!(prompt.candidates(&mut matcher), vec![Candidate::LiveQuery]);
        assert_eq!(prompt.label(&Candidate::LiveQuery), "Search Search for zzzz");
    }

    #[test]
    fn history_is_filtered_by_input() {
        let mut matcher = FuzzyMatcher::new();
        let mut prompt = prompt_with_history();
        prompt.set_input("tokio").unwrap();
        assert_eq!(
            prompt.candidates(&mut matcher),
            vec![Candidate::LiveQuery, Candidate::HistoryEntry("tokio select".to_string())]
        );
    }

    #[test]
    fn live_query_submits_trimmed_input() {
        let mut prompt = prompt_with_history();
        prompt.set_input("  hello world ").unwrap();
        assert_eq!(prompt.choose(Candidate::LiveQuery).unwrap(), "hello world");
        assert_eq!(prompt.state(), &PromptState::Submitted("hello world".to_string()));
    }

    #[test]
    fn history_entry_submits_literal_entry() {
        let mut prompt = prompt_with_history();
        prompt.set_input("tok").unwrap();
        let query = prompt
            .choose(Candidate::HistoryEntry("tokio select".to_string()))
            .unwrap();
        assert_eq!(query, "tokio select");
    }

    #[test]
    fn closed_prompt_rejects_further_transitions() {
        let mut prompt = prompt_with_history();
        prompt.cancel().unwrap();
        assert_eq!(prompt.state(), &PromptState::Cancelled);
        assert_eq!(prompt.set_input("x"), Err(LaunchError::PromptClosed));
        assert_eq!(prompt.choose(Candidate::LiveQuery), Err(LaunchError::PromptClosed));
        assert_eq!(prompt.cancel(), Err(LaunchError::PromptClosed));
    }
}
