//! State of the interactive dashboard.
//!
//! `App` is driven by two kinds of events: key presses and request results.
//! Both are applied on the event loop task. Key handling never performs I/O;
//! it returns a [`Command`] that the loop dispatches to a background task,
//! whose result comes back as an [`AppEvent`].

use crossterm::event::KeyCode;
use messadmin_core::workflows::{FetchTicket, PendingUpdate};
use messadmin_core::{
    AdminRuntime, Decision, FetchTrigger, MessBatch, MessRecord, MessViewState, Operation,
    Result, VerificationStatus,
};
use messadmin_notify::Notification;

/// Top-level views reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Messes(VerificationStatus),
    /// Admin config and account security hints.
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Dashboard,
        Screen::Messes(VerificationStatus::Verified),
        Screen::Messes(VerificationStatus::Pending),
        Screen::Messes(VerificationStatus::Rejected),
        Screen::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Messes(status) => status.label(),
            Screen::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// Work the event loop must start on behalf of the app.
#[derive(Debug)]
pub enum Command {
    Fetch(FetchTicket),
    Update(PendingUpdate),
}

/// Result of a background request.
#[derive(Debug)]
pub enum AppEvent {
    Fetched(FetchTicket, Result<MessBatch>),
    Updated(PendingUpdate, Result<()>),
}

/// Dashboard application state.
#[derive(Debug)]
pub struct App {
    /// Mess collection and busy tracking.
    pub state: MessViewState,

    pub screen: Screen,

    /// Index into the current screen's list.
    pub selected: usize,

    pub sidebar_open: bool,

    /// Whether the detail popup is shown for the selected mess.
    pub show_detail: bool,

    /// Latest notification, shown in the status bar.
    pub notice: Option<Notification>,

    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            state: MessViewState::new(),
            screen: Screen::Messes(VerificationStatus::Pending),
            selected: 0,
            sidebar_open: true,
            show_detail: false,
            notice: None,
            should_quit: false,
        }
    }

    /// Activates the view. Only the first call yields a fetch.
    pub fn mount(&mut self) -> Option<Command> {
        self.state.begin_fetch(FetchTrigger::Mount).map(Command::Fetch)
    }

    /// Records of the current screen, in collection order.
    pub fn visible(&self) -> Vec<&MessRecord> {
        match self.screen {
            Screen::Dashboard | Screen::Settings => Vec::new(),
            Screen::Messes(status) => self.state.partition(status),
        }
    }

    pub fn selected_record(&self) -> Option<&MessRecord> {
        self.visible().get(self.selected).copied()
    }

    /// Applies a key press.
    pub fn handle_key(&mut self, key: KeyCode, runtime: &AdminRuntime) -> Option<Command> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.show_detail {
                    self.show_detail = false;
                } else if key == KeyCode::Char('q') {
                    self.should_quit = true;
                }
                None
            }
            KeyCode::Tab => {
                self.switch_to(Screen::ALL[(self.screen.index() + 1) % Screen::ALL.len()]);
                None
            }
            KeyCode::BackTab => {
                let len = Screen::ALL.len();
                self.switch_to(Screen::ALL[(self.screen.index() + len - 1) % len]);
                None
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.switch_to(Screen::ALL[index]);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter => {
                self.show_detail = self.selected_record().is_some();
                None
            }
            KeyCode::Char('s') => {
                self.sidebar_open = !self.sidebar_open;
                None
            }
            KeyCode::Char('r') => self.state.begin_fetch(FetchTrigger::Refresh).map(Command::Fetch),
            KeyCode::Char('a') => self.decide(Decision::Accept, runtime),
            KeyCode::Char('x') => self.decide(Decision::Reject, runtime),
            _ => None,
        }
    }

    /// Applies a request result.
    pub fn apply_event(&mut self, event: AppEvent, runtime: &AdminRuntime) {
        match event {
            AppEvent::Fetched(ticket, result) => {
                self.notice = Some(match self.state.finish_fetch(ticket, result) {
                    Ok(report) => runtime.notice_for_fetch(&report),
                    Err(e) => runtime.notice_for_error(Operation::Fetch, &e),
                });
            }
            AppEvent::Updated(pending, result) => {
                let id = pending.id().to_string();
                let name = pending.mess_name().to_string();
                self.notice = Some(match self.state.finish_update(pending, result) {
                    Ok(outcome) => runtime.notice_for_outcome(&outcome),
                    Err(e) => runtime.notice_for_error(
                        Operation::Verify {
                            id: &id,
                            name: &name,
                        },
                        &e,
                    ),
                });
            }
        }
        self.clamp_selection();
    }

    fn decide(&mut self, decision: Decision, runtime: &AdminRuntime) -> Option<Command> {
        let (id, name) = {
            let record = self.selected_record()?;
            (record.id.clone(), record.name.clone())
        };
        let reason = runtime.rejection_reason(None);

        match self.state.begin_update(&id, decision, reason) {
            Ok(pending) => Some(Command::Update(pending)),
            Err(e) => {
                self.notice = Some(runtime.notice_for_error(
                    Operation::Verify {
                        id: &id,
                        name: &name,
                    },
                    &e,
                ));
                None
            }
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.selected = 0;
        self.show_detail = false;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if len == 0 {
            self.show_detail = false;
        }
    }
}
