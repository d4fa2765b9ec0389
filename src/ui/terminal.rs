use std::io::{BufRead, Write};
use log::debug;
use crate::error::LaunchError;
use crate::matcher::FuzzyMatcher;
use crate::prompt::{Candidate, QueryPrompt};
use crate::ui::{Interaction, PaletteItem};

/// Line-based prompt and palette. End of input dismisses, as does `q` at a
/// selection prompt.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                debug!("stdin read failed: {}", e);
                None
            }
        }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        let _ = write!(self.output, "{}", question);
        let _ = self.output.flush();
        self.read_line()
    }

    /// Index picked from a numbered list of `len` rows; empty input means `default`.
    fn choose_index(&mut self, len: usize, default: usize) -> Option<usize> {
        loop {
            let answer = self.ask(&format!("Pick [{}]: ", default))?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Some(default);
            }
            if answer.eq_ignore_ascii_case("q") {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(n) if n < len => return Some(n),
                _ => {
                    let _ = writeln!(self.output, "Enter a number between 0 and {}, or q", len - 1);
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalUi<R, W> {
    fn run_prompt(&mut self, prompt: &mut QueryPrompt, matcher: &mut FuzzyMatcher) -> Result<(), LaunchError> {
        let recent = prompt.candidates(matcher);
        if recent.len() > 1 {
            let _ = writeln!(self.output, "Recent:");
            for candidate in &recent[1..] {
                let _ = writeln!(self.output, "  {}", prompt.label(candidate));
            }
        }

        let Some(text) = self.ask("Query: ") else {
            return prompt.cancel();
        };
        prompt.set_input(&text)?;

        let candidates = prompt.candidates(matcher);
        if candidates.len() == 1 {
            prompt.choose(Candidate::LiveQuery)?;
            return Ok(());
        }

        for (i, candidate) in candidates.iter().enumerate() {
            let _ = writeln!(self.output, "{:>3}) {}", i, prompt.label(candidate));
        }
        match self.choose_index(candidates.len(), 0) {
            Some(i) => prompt.choose(candidates[i].clone()).map(|_| ()),
            None => prompt.cancel(),
        }
    }

    fn pick(&mut self, items: &[PaletteItem], matcher: &mut FuzzyMatcher) -> Option<PaletteItem> {
        let filter = self.ask("Filter: ")?;
        let labels: Vec<&str> = items.iter().map(|item| item.label()).collect();
        let hits = matcher.filter(&filter, &labels);
        if hits.is_empty() {
            let _ = writeln!(self.output, "No matches");
            return None;
        }

        for (row, &i) in hits.iter().enumerate() {
            let _ = writeln!(self.output, "{:>3}) {}", row, labels[i]);
        }
        let row = self.choose_index(hits.len(), 0)?;
        Some(items[hits[row]].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommandAction, CommandId, RegisteredCommand};
    use crate::prompt::PromptState;
    use std::io::Cursor;

    fn ui(script: &str) -> TerminalUi<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalUi::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn typed_query_without_history_submits_directly() {
        let mut prompt = QueryPrompt::new("Search", Vec::new());
        ui("hello world\n").run_prompt(&mut prompt, &mut FuzzyMatcher::new()).unwrap();
        assert_eq!(prompt.state(), &PromptState::Submitted("hello world".to_string()));
    }

    #[test]
    fn empty_input_then_pick_history_entry() {
        let mut prompt = QueryPrompt::new("Search", vec!["first".to_string(), "second".to_string()]);
        ui("\n2\n").run_prompt(&mut prompt, &mut FuzzyMatcher::new()).unwrap();
        assert_eq!(prompt.state(), &PromptState::Submitted("second".to_string()));
    }

    #[test]
    fn end_of_input_cancels() {
        let mut prompt = QueryPrompt::new("Search", Vec::new());
        ui("").run_prompt(&mut prompt, &mut FuzzyMatcher::new()).unwrap();
        assert_eq!(prompt.state(), &PromptState::Cancelled);
    }

    #[test]
    fn q_at_selection_cancels() {
        let mut prompt = QueryPrompt::new("Search", vec!["rust".to_string()]);
        ui("ru\nq\n").run_prompt(&mut prompt, &mut FuzzyMatcher::new()).unwrap();
        assert_eq!(prompt.state(), &PromptState::Cancelled);
    }

    #[test]
    fn palette_filters_and_picks() {
        let items = vec![
            PaletteItem::Command(RegisteredCommand {
                id: CommandId::for_template(0),
                display_name: "DuckDuckGo".to_string(),
                action: CommandAction::Template(0),
            }),
            PaletteItem::ClearHistory,
        ];
        let picked = ui("clear\n\n").pick(&items, &mut FuzzyMatcher::new());
        assert_eq!(picked, Some(PaletteItem::ClearHistory));

        assert_eq!(ui("zzzz\n").pick(&items, &mut FuzzyMatcher::new()), None);
    }
}
