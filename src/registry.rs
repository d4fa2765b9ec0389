use log::{debug, info};
use crate::error::LaunchError;
use crate::host::{CommandHost, Notifier};
use crate::model::{CommandAction, CommandId, RegisteredCommand, Template};
use crate::template;

pub const PALETTE_NAME: &str = "Open search palette";

/// Keeps the host's command list in step with the configured templates.
///
/// Every reconcile drops all previously registered commands and registers
/// the current set from scratch. Ids are derived from list positions, which
/// is only sound because the whole set is replaced at once.
#[derive(Default)]
pub struct CommandRegistry {
    registered: Vec<RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.registered
    }

    pub fn get(&self, id: &CommandId) -> Option<&RegisteredCommand> {
        self.registered.iter().find(|c| &c.id == id)
    }

    pub fn reconcile(
        &mut self,
        templates: &[Template],
        host: &mut dyn CommandHost,
        notifier: &mut dyn Notifier,
    ) -> &[RegisteredCommand] {
        for command in self.registered.drain(..) {
            host.unregister(&command.id);
        }

        for (index, tpl) in templates.iter().enumerate() {
            if !template::is_valid(&tpl.url) {
                debug!("Skipping template {} ({:?}): invalid url {:?}", index, tpl.name, tpl.url);
                // Freshly added blank entries are skipped quietly.
                if !tpl.name.trim().is_empty() {
                    let err = LaunchError::InvalidTemplate { name: tpl.name.clone() };
                    notifier.notify(&err.to_string());
                }
                continue;
            }
            self.registered.push(RegisteredCommand {
                id: CommandId::for_template(index),
                display_name: tpl.name.clone(),
                action: CommandAction::Template(index),
            });
        }

        self.registered.push(RegisteredCommand {
            id: CommandId::palette(),
            display_name: PALETTE_NAME.to_string(),
            action: CommandAction::OpenPalette,
        });

        for command in &self.registered {
            host.register(command);
        }
        info!("Registered {} commands", self.registered.len());
        &self.registered
    }
}
