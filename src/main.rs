mod config;
mod error;
mod executor;
mod history;
mod host;
mod matcher;
mod model;
mod prompt;
mod registry;
mod state;
mod template;
mod ui;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::io;
use std::path::PathBuf;
use crate::config::{ConfigStore, TomlStore, load_config};
use crate::executor::SystemOpener;
use crate::host::{ArgSelection, Palette, StderrNotifier};
use crate::model::{CommandAction, CommandId};
use crate::state::{Launcher, Outcome};
use crate::ui::{FixedQuery, Interaction, terminal::TerminalUi};

#[derive(Parser, Debug)]
#[command(author, version, about = "Open web searches from named URL templates", long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Text to search for when "use selection as query" is on
    #[arg(short, long, global = true)]
    selection: Option<String>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show the registered commands
    List,
    /// Show the built-in presets
    Presets,
    /// Search the command list interactively (default)
    Palette,
    /// Run one command, by id, position or name
    Run {
        target: String,
        /// Query to use instead of prompting
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Add a template, blank or from a preset
    Add {
        #[arg(long, conflicts_with_all = ["name", "url"])]
        preset: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Change the name or url of a template
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Remove a template
    Remove { index: usize },
    /// Turn an option on or off
    Set { option: Toggle, value: bool },
    /// Forget all recent queries
    ClearHistory,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Toggle {
    SplitView,
    UseSelection,
    History,
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Opened(url) => println!("{}", url),
        Outcome::HistoryCleared => println!("History cleared"),
        Outcome::Cancelled | Outcome::Failed => {}
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let store = match &args.config {
        Some(path) => TomlStore::new(path),
        None => TomlStore::default_location(),
    };
    debug!("Using config at {:?}", store.path());
    let config = load_config(&store as &dyn ConfigStore)?;

    // 2. Wire up collaborators & register commands
    let opener = SystemOpener::new(config.browser.clone());
    let mut launcher = Launcher::new(
        config,
        Box::new(store),
        Palette::default(),
        Box::new(opener),
        Box::new(StderrNotifier),
        Box::new(ArgSelection(args.selection.clone())),
    );

    // 3. Dispatch
    let mut terminal = TerminalUi::new(io::stdin().lock(), io::stdout());
    match args.command.unwrap_or(Cmd::Palette) {
        Cmd::List => {
            for command in launcher.host().commands() {
                let marker = match command.action {
                    CommandAction::Template(index) => index.to_string(),
                    CommandAction::OpenPalette => "-".to_string(),
                };
                println!("{:>3}  {:<12} {}", marker, command.id, command.display_name);
            }
        }
        Cmd::Presets => {
            for (name, url) in config::PRESETS {
                println!("{:<14} {}", name, url);
            }
        }
        Cmd::Palette => {
            let outcome = launcher.invoke(&CommandId::palette(), &mut terminal)?;
            report(outcome);
        }
        Cmd::Run { target, query } => {
            let Some(id) = launcher.host().resolve(&target) else {
                bail!("No command matches \"{}\"", target);
            };
            let mut fixed;
            let ui: &mut dyn Interaction = if query.is_empty() {
                &mut terminal
            } else {
                fixed = FixedQuery(query.join(" "));
                &mut fixed
            };
            let outcome = launcher.invoke(&id, ui)?;
            report(outcome);
        }
        Cmd::Add { preset, name, url } => {
            let index = match preset {
                Some(preset) => launcher.add_preset(&preset)?,
                None => launcher.add_template(
                    name.as_deref().unwrap_or_default(),
                    url.as_deref().unwrap_or_default(),
                )?,
            };
            println!("Added template {}", index);
        }
        Cmd::Edit { index, name, url } => {
            if name.is_none() && url.is_none() {
                bail!("Nothing to change: pass --name and/or --url");
            }
            launcher.edit(index, name.as_deref(), url.as_deref())?;
        }
        Cmd::Remove { index } => {
            let removed = launcher.remove(index)?;
            println!("Removed \"{}\"", removed.name);
        }
        Cmd::Set { option, value } => match option {
            Toggle::SplitView => launcher.set_open_in_split_view(value)?,
            Toggle::UseSelection => launcher.set_use_selection_as_query(value)?,
            Toggle::History => launcher.set_history_enabled(value)?,
        },
        Cmd::ClearHistory => {
            launcher.clear_history()?;
            println!("History cleared");
        }
    }

    Ok(())
}
