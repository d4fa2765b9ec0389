use log::{info, warn};
use crate::model::{CommandId, RegisteredCommand};

/// Receives the commands the registry derives from the configuration.
pub trait CommandHost {
    fn register(&mut self, command: &RegisteredCommand);
    /// Removing an unknown id does nothing.
    fn unregister(&mut self, id: &CommandId);
}

/// Short-lived user-visible messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

pub trait SelectionSource {
    /// Empty when nothing is selected.
    fn current_selection(&self) -> String;
}

/// The searchable command list shown by the `list` and `palette` subcommands.
#[derive(Default)]
pub struct Palette {
    commands: Vec<RegisteredCommand>,
}

impl Palette {
    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.commands
    }

    pub fn get(&self, id: &CommandId) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|c| &c.id == id)
    }

    /// Looks `target` up as a command id, then as a template position, then
    /// as a display name (ignoring case).
    pub fn resolve(&self, target: &str) -> Option<CommandId> {
        let id = CommandId::from(target);
        if self.get(&id).is_some() {
            return Some(id);
        }
        if let Ok(index) = target.parse::<usize>() {
            let id = CommandId::for_template(index);
            if self.get(&id).is_some() {
                return Some(id);
            }
        }
        self.commands
            .iter()
            .find(|c| c.display_name.eq_ignore_ascii_case(target))
            .map(|c| c.id.clone())
    }
}

impl CommandHost for Palette {
    fn register(&mut self, command: &RegisteredCommand) {
        self.commands.retain(|c| c.id != command.id);
        self.commands.push(command.clone());
    }

    fn unregister(&mut self, id: &CommandId) {
        self.commands.retain(|c| &c.id != id);
    }
}

pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        warn!("{}", message);
        eprintln!("websearch: {}", message);
    }
}

/// Selection handed over on the command line.
pub struct ArgSelection(pub Option<String>);

impl SelectionSource for ArgSelection {
    fn current_selection(&self) -> String {
        let selection = self.0.clone().unwrap_or_default();
        if !selection.is_empty() {
            info!("Using selection of {} chars", selection.chars().count());
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommandAction;

    fn palette(names: &[&str]) -> Palette {
        let mut palette = Palette::default();
        for (index, name) in names.iter().enumerate() {
            palette.register(&RegisteredCommand {
                id: CommandId::for_template(index),
                display_name: name.to_string(),
                action: CommandAction::Template(index),
            });
        }
        palette.register(&RegisteredCommand {
            id: CommandId::palette(),
            display_name: "Open search palette".to_string(),
            action: CommandAction::OpenPalette,
        });
        palette
    }

    #[test]
    fn resolve_by_id() {
        let palette = palette(&["Google", "Wikipedia"]);
        assert_eq!(palette.resolve("template-1"), Some(CommandId::for_template(1)));
        assert_eq!(palette.resolve("palette"), Some(CommandId::palette()));
    }

    #[test]
    fn resolve_by_position() {
        let palette = palette(&["Google", "Wikipedia"]);
        assert_eq!(palette.resolve("0"), Some(CommandId::for_template(0)));
    }

    #[test]
    fn resolve_by_name_ignores_case() {
        let palette = palette(&["Google", "Wikipedia"]);
        assert_eq!(palette.resolve("wikipedia"), Some(CommandId::for_template(1)));
        assert_eq!(palette.resolve("Bing"), None);
    }

    #[test]
    fn numeric_name_without_matching_position() {
        let palette = palette(&["Google", "2048"]);
        assert_eq!(palette.resolve("2048"), Some(CommandId::for_template(1)));
        assert_eq!(palette.resolve("7"), None);
    }

    #[test]
    fn position_wins_over_numeric_name() {
        let palette = palette(&["1", "Wikipedia"]);
        assert_eq!(palette.resolve("1"), Some(CommandId::for_template(1)));
    }
}
