pub mod terminal;

use crate::error::LaunchError;
use crate::matcher::FuzzyMatcher;
use crate::model::RegisteredCommand;
use crate::prompt::{Candidate, QueryPrompt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteItem {
    Command(RegisteredCommand),
    ClearHistory,
}

impl PaletteItem {
    pub fn label(&self) -> &str {
        match self {
            PaletteItem::Command(command) => &command.display_name,
            PaletteItem::ClearHistory => "Clear history",
        }
    }
}

/// The interactive side of the launcher.
pub trait Interaction {
    /// Drives `prompt` until it is submitted or cancelled.
    fn run_prompt(&mut self, prompt: &mut QueryPrompt, matcher: &mut FuzzyMatcher) -> Result<(), LaunchError>;

    /// `None` when the user dismisses the palette.
    fn pick(&mut self, items: &[PaletteItem], matcher: &mut FuzzyMatcher) -> Option<PaletteItem>;
}

/// Answers the prompt with a query given up front, e.g. on the command line.
pub struct FixedQuery(pub String);

impl Interaction for FixedQuery {
    fn run_prompt(&mut self, prompt: &mut QueryPrompt, _matcher: &mut FuzzyMatcher) -> Result<(), LaunchError> {
        prompt.set_input(&self.0)?;
        prompt.choose(Candidate::LiveQuery).map(|_| ())
    }

    fn pick(&mut self, _items: &[PaletteItem], _matcher: &mut FuzzyMatcher) -> Option<PaletteItem> {
        None
    }
}
