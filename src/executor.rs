use std::process::{Command, Stdio};
use log::info;
use crate::error::LaunchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub url: String,
    pub split_view: bool,
}

pub trait Opener {
    fn open(&mut self, request: &OpenRequest) -> Result<(), LaunchError>;
}

/// Opens URLs with the configured browser command, or the system handler
/// when none is set.
pub struct SystemOpener {
    browser: Option<String>,
    split_window_opened: bool,
}

impl SystemOpener {
    pub fn new(browser: Option<String>) -> Self {
        Self {
            browser,
            split_window_opened: false,
        }
    }

    fn spawn_browser(&mut self, browser: &str, request: &OpenRequest) -> std::io::Result<()> {
        let mut cmd_parts: Vec<&str> = browser.split_whitespace().collect();
        if cmd_parts.is_empty() {
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty browser command"));
        }

        // Split view: the first URL gets its own window, later ones group into it.
        let new_window = request.split_view && !self.split_window_opened;
        if new_window {
            cmd_parts.push("--new-window");
        }
        cmd_parts.push(&request.url);

        Command::new(cmd_parts[0])
            .args(&cmd_parts[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if new_window {
            self.split_window_opened = true;
        }
        Ok(())
    }
}

impl Opener for SystemOpener {
    fn open(&mut self, request: &OpenRequest) -> Result<(), LaunchError> {
        info!("Opening {}", request.url);
        let result = match self.browser.clone() {
            Some(browser) => self.spawn_browser(&browser, request),
            None => open::that(&request.url),
        };
        result.map_err(|e| LaunchError::OpenFailed {
            url: request.url.clone(),
            reason: e.to_string(),
        })
    }
}
