use anyhow::Result;
use log::{debug, info};
use crate::config::{self, Config, ConfigStore};
use crate::error::LaunchError;
use crate::executor::{OpenRequest, Opener};
use crate::history;
use crate::host::{CommandHost, Notifier, SelectionSource};
use crate::matcher::FuzzyMatcher;
use crate::model::{CommandAction, CommandId, Template};
use crate::prompt::{PromptState, QueryPrompt};
use crate::registry::CommandRegistry;
use crate::template;
use crate::ui::{Interaction, PaletteItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Opened(String),
    Cancelled,
    /// Reported to the user already.
    Failed,
    HistoryCleared,
}

/// Owns the configuration and everything derived from it.
pub struct Launcher<H: CommandHost> {
    config: Config,
    store: Box<dyn ConfigStore>,
    registry: CommandRegistry,
    host: H,
    opener: Box<dyn Opener>,
    notifier: Box<dyn Notifier>,
    selection: Box<dyn SelectionSource>,
    matcher: FuzzyMatcher,
}

impl<H: CommandHost> Launcher<H> {
    /// `config` is what `store` loaded at startup; it is written back there
    /// after every change.
    pub fn new(
        config: Config,
        store: Box<dyn ConfigStore>,
        host: H,
        opener: Box<dyn Opener>,
        notifier: Box<dyn Notifier>,
        selection: Box<dyn SelectionSource>,
    ) -> Self {
        let mut launcher = Self {
            config,
            store,
            registry: CommandRegistry::new(),
            host,
            opener,
            notifier,
            selection,
            matcher: FuzzyMatcher::new(),
        };
        launcher.reconcile();
        launcher
    }

    #[cfg(test)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn reconcile(&mut self) {
        self.registry
            .reconcile(&self.config.templates, &mut self.host, self.notifier.as_mut());
    }

    pub fn invoke(&mut self, id: &CommandId, ui: &mut dyn Interaction) -> Result<Outcome, LaunchError> {
        let command = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| LaunchError::UnknownCommand(id.to_string()))?;

        match command.action {
            CommandAction::Template(index) => self.launch_template(index, ui),
            CommandAction::OpenPalette => self.open_palette(ui),
        }
    }

    fn launch_template(&mut self, index: usize, ui: &mut dyn Interaction) -> Result<Outcome, LaunchError> {
        let tpl = self
            .config
            .templates
            .get(index)
            .cloned()
            .ok_or(LaunchError::NoSuchTemplate(index))?;

        if !template::has_placeholder(&tpl.url) {
            return Ok(self.search(index, &tpl.url, ""));
        }

        if self.config.use_selection_as_query {
            let selection = self.selection.current_selection();
            let selection = selection.trim();
            if !selection.is_empty() {
                return Ok(self.search(index, &tpl.url, selection));
            }
        }

        let offered = if self.config.history_enabled {
            tpl.history.clone()
        } else {
            Vec::new()
        };
        let mut prompt = QueryPrompt::new(&tpl.name, offered);
        ui.run_prompt(&mut prompt, &mut self.matcher)?;

        match prompt.state() {
            PromptState::Submitted(query) => {
                let query = query.clone();
                Ok(self.search(index, &tpl.url, &query))
            }
            PromptState::Cancelled | PromptState::Open => {
                debug!("Prompt for {:?} dismissed", tpl.name);
                Ok(Outcome::Cancelled)
            }
        }
    }

    fn open_palette(&mut self, ui: &mut dyn Interaction) -> Result<Outcome, LaunchError> {
        let mut items: Vec<PaletteItem> = self
            .registry
            .commands()
            .iter()
            .filter(|c| matches!(c.action, CommandAction::Template(_)))
            .cloned()
            .map(PaletteItem::Command)
            .collect();
        items.push(PaletteItem::ClearHistory);

        match ui.pick(&items, &mut self.matcher) {
            Some(PaletteItem::Command(command)) => match command.action {
                CommandAction::Template(index) => self.launch_template(index, ui),
                CommandAction::OpenPalette => Ok(Outcome::Cancelled),
            },
            Some(PaletteItem::ClearHistory) => {
                if let Err(e) = self.clear_history() {
                    self.report_save_error(&e);
                    return Ok(Outcome::Failed);
                }
                self.notifier.notify("History cleared");
                Ok(Outcome::HistoryCleared)
            }
            None => Ok(Outcome::Cancelled),
        }
    }

    /// Renders, opens and remembers one query. Failures end up as notices.
    fn search(&mut self, index: usize, url: &str, query: &str) -> Outcome {
        let rendered = match template::render(url, query) {
            Ok(rendered) => rendered,
            Err(e) => {
                self.notifier.notify(&e.to_string());
                return Outcome::Failed;
            }
        };

        let request = OpenRequest {
            url: rendered.clone(),
            split_view: self.config.open_in_split_view,
        };
        if let Err(e) = self.opener.open(&request) {
            self.notifier.notify(&e.to_string());
            return Outcome::Failed;
        }

        self.record_history(index, query);
        Outcome::Opened(rendered)
    }

    fn record_history(&mut self, index: usize, query: &str) {
        if !self.config.history_enabled || query.trim().is_empty() {
            return;
        }
        let Some(tpl) = self.config.templates.get_mut(index) else {
            return;
        };
        tpl.history = history::record(&tpl.history, query);
        if let Err(e) = self.save() {
            self.report_save_error(&e);
        }
    }

    fn report_save_error(&mut self, e: &anyhow::Error) {
        self.notifier.notify(&format!("Failed to save settings: {:#}", e));
    }

    fn save(&mut self) -> Result<()> {
        self.store.save(&self.config)
    }

    /// Persists and re-registers after a change to the template list.
    /// Commands follow the in-memory list even when the save fails.
    fn templates_changed(&mut self) -> Result<()> {
        let saved = self.save();
        self.reconcile();
        saved
    }

    fn template_mut(&mut self, index: usize) -> Result<&mut Template, LaunchError> {
        self.config
            .templates
            .get_mut(index)
            .ok_or(LaunchError::NoSuchTemplate(index))
    }

    pub fn add_template(&mut self, name: &str, url: &str) -> Result<usize> {
        self.config.templates.push(Template::new(name, url));
        self.templates_changed()?;
        Ok(self.config.templates.len() - 1)
    }

    pub fn add_preset(&mut self, name: &str) -> Result<usize> {
        let preset = config::preset(name).ok_or_else(|| {
            LaunchError::UnknownPreset(name.to_string(), config::preset_names().join(", "))
        })?;
        info!("Adding preset {}", preset.name);
        self.config.templates.push(preset);
        self.templates_changed()?;
        Ok(self.config.templates.len() - 1)
    }

    /// Changes name and/or url in one step. The url is saved even when
    /// invalid; invalid templates just don't register.
    pub fn edit(&mut self, index: usize, name: Option<&str>, url: Option<&str>) -> Result<()> {
        let tpl = self.template_mut(index)?;
        if let Some(name) = name {
            tpl.name = name.to_string();
        }
        if let Some(url) = url {
            tpl.url = url.to_string();
        }
        self.templates_changed()
    }

    pub fn remove(&mut self, index: usize) -> Result<Template> {
        if index >= self.config.templates.len() {
            return Err(LaunchError::NoSuchTemplate(index).into());
        }
        let removed = self.config.templates.remove(index);
        self.templates_changed()?;
        Ok(removed)
    }

    pub fn set_open_in_split_view(&mut self, enabled: bool) -> Result<()> {
        self.config.open_in_split_view = enabled;
        if enabled && self.config.browser.is_none() {
            self.notifier
                .notify("Split view only applies with a `browser` command set in the config");
        }
        self.save()
    }

    pub fn set_use_selection_as_query(&mut self, enabled: bool) -> Result<()> {
        self.config.use_selection_as_query = enabled;
        self.save()
    }

    pub fn set_history_enabled(&mut self, enabled: bool) -> Result<()> {
        self.config.history_enabled = enabled;
        self.save()
    }

    pub fn clear_history(&mut self) -> Result<()> {
        for tpl in &mut self.config.templates {
            tpl.history.clear();
        }
        self.save()
    }
}
