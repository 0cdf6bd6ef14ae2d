//! Menu-driven session controller.
//!
//! Each screen handler returns a [`Flow`] to a single dispatch loop in
//! [`SessionController::run`]; handlers never call back into the menu.
//!
//! ```text
//! MainMenu ─┬─ SetName ────────┐
//!           ├─ ConnectToNewAp ─┼─ receive(ReturnToMenu) ─> MainMenu
//!           ├─ Help ───────────┘
//!           ├─ StartChatting ── receive(ReturnToChat) ──> StartChatting
//!           └─ (dismissed) ── ConfirmExit ─┬─ OK ─> stop handshake ─> Exit
//!                                          └─ Cancel ─> MainMenu
//! ```

use crate::channel::{CommandChannel, ReceivePurpose};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::port::SerialPortAdapter;
use crate::storage::{join_for_display, ApRecord, DataFiles, StorageError, TextFile};
use crate::text::trim;
use crate::ui::{DialogChoice, MenuItem, TextPrompt, UiSurface};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const HELP_TEXT: &str = "App to interact with Ollama using the esp32";
const NO_SAVED_APS: &str = "No saved APs found. Connect manually to a new AP (see output)";
const EXIT_PROMPT: &str = "Press OK to exit, Cancel to return.";

/// A screen the controller can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    SetName,
    ConnectToNewAp,
    StartChatting,
    Help,
}

impl Screen {
    /// Main menu entries, in display order.
    pub const MENU: [Screen; 4] = [
        Screen::SetName,
        Screen::ConnectToNewAp,
        Screen::StartChatting,
        Screen::Help,
    ];

    pub fn menu_value(self) -> Option<u32> {
        match self {
            Self::SetName => Some(0),
            Self::ConnectToNewAp => Some(1),
            Self::StartChatting => Some(2),
            Self::Help => Some(3),
            Self::MainMenu => None,
        }
    }

    pub fn from_menu_value(value: u32) -> Option<Self> {
        Self::MENU
            .into_iter()
            .find(|s| s.menu_value() == Some(value))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MainMenu => "Main menu",
            Self::SetName => "Set your name",
            Self::ConnectToNewAp => "Connect to new AP",
            Self::StartChatting => "Start Chatting",
            Self::Help => "Help",
        }
    }
}

/// Outcome of one step of the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue(Screen),
    ConfirmExit,
    Exit,
}

impl From<ReceivePurpose> for Flow {
    fn from(purpose: ReceivePurpose) -> Self {
        match purpose {
            ReceivePurpose::ReturnToMenu => Flow::Continue(Screen::MainMenu),
            ReceivePurpose::ReturnToChat => Flow::Continue(Screen::StartChatting),
        }
    }
}

/// What the controller is doing with the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    MainMenu,
    AwaitingReceive(ReceivePurpose),
}

/// Drives the menus, the link and the flat files.
pub struct SessionController<P, U> {
    channel: CommandChannel<P>,
    ui: U,
    files: DataFiles,
    config: SessionConfig,
    mode: SessionMode,
}

impl<P, U> SessionController<P, U>
where
    P: SerialPortAdapter,
    U: UiSurface,
{
    pub fn new(channel: CommandChannel<P>, ui: U, files: DataFiles, config: SessionConfig) -> Self {
        Self {
            channel,
            ui,
            files,
            config,
            mode: SessionMode::MainMenu,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn channel(&self) -> &CommandChannel<P> {
        &self.channel
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    pub fn into_parts(self) -> (CommandChannel<P>, U) {
        (self.channel, self.ui)
    }

    /// Announce the server, then loop over screens until the user exits.
    ///
    /// Only UI failures escape; everything else is reported and the loop
    /// carries on from the main menu.
    pub fn run(&mut self) -> Result<(), SessionError> {
        info!("Session started on {}", self.channel.port().name());
        let announced = self.announce();
        self.recover(announced.map(|()| Flow::Continue(Screen::MainMenu)))?;

        let mut flow = Flow::Continue(Screen::MainMenu);
        loop {
            flow = match flow {
                Flow::Continue(screen) => self.step(screen)?,
                Flow::ConfirmExit => {
                    let result = self.confirm_exit();
                    self.recover(result)?
                }
                Flow::Exit => break,
            };
        }

        info!("Session ended");
        Ok(())
    }

    /// Handle one screen, turning recoverable errors into a return to the menu.
    pub fn step(&mut self, screen: Screen) -> Result<Flow, SessionError> {
        debug!("Entering {:?}", screen);
        let result = match screen {
            Screen::MainMenu => self.main_menu(),
            Screen::SetName => self.set_name(),
            Screen::ConnectToNewAp => self.connect_to_new_ap(),
            Screen::StartChatting => self.start_chatting(),
            Screen::Help => self.help(),
        };
        self.recover(result)
    }

    fn recover(&mut self, result: Result<Flow, SessionError>) -> Result<Flow, SessionError> {
        match result {
            Ok(flow) => Ok(flow),
            Err(e) => {
                self.report(e)?;
                self.mode = SessionMode::MainMenu;
                Ok(Flow::Continue(Screen::MainMenu))
            }
        }
    }

    /// Show a recoverable error in a dialog; fatal errors are handed back.
    fn report(&mut self, err: SessionError) -> Result<(), SessionError> {
        if err.is_fatal() {
            return Err(err);
        }
        error!("{}", err);
        self.ui.message("Error", &err.to_string())?;
        Ok(())
    }

    /// Send the server URL (and the API key when enabled) without receiving.
    fn announce(&mut self) -> Result<(), SessionError> {
        let url_file = self.files.server_url.clone();
        self.send_file(&url_file, "Ollama server URL not found.")?;

        if self.config.send_api_key {
            let key_file = self.files.api_key.clone();
            self.send_file(&key_file, "API key not found.")?;
        }
        Ok(())
    }

    fn send_file(&mut self, file: &TextFile, missing: &str) -> Result<(), SessionError> {
        match file.read()? {
            Some(value) if !value.is_empty() => {
                info!("Sending contents of {}", file.path().display());
                self.channel.send(&value)?;
            }
            _ => {
                warn!("{} ({})", missing, file.path().display());
                self.ui.message("Error", missing)?;
            }
        }
        Ok(())
    }

    fn main_menu(&mut self) -> Result<Flow, SessionError> {
        self.mode = SessionMode::MainMenu;
        let items: Vec<MenuItem> = Screen::MENU
            .into_iter()
            .filter_map(|s| s.menu_value().map(|v| MenuItem::new(s.label(), v)))
            .collect();

        let header = self.config.menu_header.clone();
        Ok(match self.ui.show_menu(&header, &items)? {
            None => Flow::ConfirmExit,
            Some(value) => match Screen::from_menu_value(value) {
                Some(screen) => Flow::Continue(screen),
                None => {
                    warn!("Ignoring unknown menu value {}", value);
                    Flow::Continue(Screen::MainMenu)
                }
            },
        })
    }

    fn set_name(&mut self) -> Result<Flow, SessionError> {
        let Some(name) = self.prompt("Enter your name")? else {
            return self.receive(ReceivePurpose::ReturnToMenu);
        };

        self.channel.send(&name)?;
        if let Err(e) = self.files.system_message.write(&name) {
            self.report(e.into())?;
        }
        pause(self.config.settle_delay());

        // The receive cycle runs whatever the store read gives.
        match self.files.aps.records() {
            Ok(records) if records.is_empty() => {
                self.ui.message("Error", NO_SAVED_APS)?;
            }
            Ok(records) => {
                info!("Announcing {} saved AP(s)", records.len());
                self.channel.send(&join_for_display(&records))?;
            }
            Err(e) => self.report(e.into())?,
        }

        self.receive(ReceivePurpose::ReturnToMenu)
    }

    fn connect_to_new_ap(&mut self) -> Result<Flow, SessionError> {
        let Some(ssid) = self.prompt("Enter SSID")?.filter(|s| !s.is_empty()) else {
            self.ui.message("Error", "No SSID entered.")?;
            return Ok(Flow::Continue(Screen::MainMenu));
        };
        let Some(password) = self.prompt("Enter Password")?.filter(|p| !p.is_empty()) else {
            self.ui.message("Error", "No password entered.")?;
            return Ok(Flow::Continue(Screen::MainMenu));
        };

        let record = match ApRecord::new(ssid, password) {
            Ok(record) => record,
            Err(StorageError::InvalidRecord(reason)) => {
                self.ui.message("Error", &reason)?;
                return Ok(Flow::Continue(Screen::MainMenu));
            }
            Err(e) => return Err(e.into()),
        };

        self.channel.send(&record.ssid)?;
        pause(self.config.credential_delay());
        self.channel.send(&record.password)?;
        pause(self.config.credential_delay());

        // Persist once the cycle has been entered, however it ends.
        let received = self.receive(ReceivePurpose::ReturnToMenu);
        self.files.aps.upsert(&record.ssid, &record.password)?;
        received
    }

    fn start_chatting(&mut self) -> Result<Flow, SessionError> {
        let Some(message) = self.prompt("Enter message")? else {
            return Ok(Flow::Continue(Screen::MainMenu));
        };

        self.files.system_message.write(&message)?;
        self.channel.send(&message)?;
        self.receive(ReceivePurpose::ReturnToChat)
    }

    fn help(&mut self) -> Result<Flow, SessionError> {
        self.ui.message("Help", HELP_TEXT)?;
        Ok(Flow::Continue(Screen::MainMenu))
    }

    fn confirm_exit(&mut self) -> Result<Flow, SessionError> {
        match self.ui.message("Exit", EXIT_PROMPT)? {
            DialogChoice::Cancel => Ok(Flow::Continue(Screen::MainMenu)),
            DialogChoice::Ok => {
                let stop_word = self.channel.settings().stop_word.clone();
                self.channel.send(&stop_word)?;
                self.receive(ReceivePurpose::ReturnToMenu)?;
                Ok(Flow::Exit)
            }
        }
    }

    /// Prompt for text and normalize it; `None` when cancelled.
    fn prompt(&mut self, header: &str) -> Result<Option<String>, SessionError> {
        let prompt = TextPrompt::new(header, self.config.prompt_max_len);
        Ok(self
            .ui
            .prompt_text(&prompt)?
            .map(|text| trim(&text).to_string()))
    }

    fn receive(&mut self, purpose: ReceivePurpose) -> Result<Flow, SessionError> {
        self.mode = SessionMode::AwaitingReceive(purpose);
        let report = self.channel.receive(purpose, &mut self.ui)?;
        self.mode = SessionMode::MainMenu;
        debug!("{:?}", report);
        Ok(report.purpose.into())
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
