//! Wizard controller: the state machine that owns all mutable session data.
//!
//! Every event produces zero or more [`Effect`]s; the main loop executes
//! them (dispatching requests, writing the workflow file, exiting) and feeds
//! completions back in as events. The controller itself never touches the
//! network or the filesystem, which keeps the whole flow testable without a
//! terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use crate::prompt;
use crate::tui::event::{Event, RequestTarget};
use crate::tui::input::InputField;
use crate::tui::spinner::Spinner;
use crate::tui::viewport::Viewport;

/// Char limit for both text inputs.
pub const INPUT_CHAR_LIMIT: usize = 300;

/// Rows of chrome around the artifact viewport in the review layout
/// (borders, title, choices, help line).
const VIEWPORT_CHROME_ROWS: u16 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Preload,
    DetectingStack,
    ConfirmStack,
    ReviseStack,
    InputTasks,
    GeneratingArtifact,
    ReviewArtifact,
    ReviseArtifact,
    Done,
    Error,
}

impl WizardState {
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            WizardState::Preload | WizardState::DetectingStack | WizardState::GeneratingArtifact
        )
    }

    pub fn is_text_entry(self) -> bool {
        matches!(
            self,
            WizardState::ReviseStack | WizardState::InputTasks | WizardState::ReviseArtifact
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
}

/// Side effect requested by the controller, executed by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch {
        target: RequestTarget,
        prompt: String,
    },
    Persist {
        artifact: String,
    },
    Quit,
}

/// User-visible wizard data for one run. Created empty, mutated in place by
/// the controller, discarded on exit.
pub struct Session {
    pub file_manifest: Vec<String>,
    pub detected_stack: String,
    pub user_stack_correction: String,
    pub desired_tasks: String,
    pub artifact: String,
    pub confirm_choice: ConfirmChoice,
    pub last_error: Option<String>,
    pub saved_path: Option<PathBuf>,
}

pub struct Wizard {
    pub state: WizardState,
    pub session: Session,
    pub stack_input: InputField,
    pub tasks_input: InputField,
    pub spinner: Spinner,
    pub viewport: Viewport,
    /// Set between emitting `Effect::Persist` and receiving its completion,
    /// so the writer is invoked at most once per review.
    persist_pending: bool,
}

impl Wizard {
    pub fn new(file_manifest: Vec<String>) -> Self {
        Self {
            state: WizardState::Preload,
            session: Session {
                file_manifest,
                detected_stack: String::new(),
                user_stack_correction: String::new(),
                desired_tasks: String::new(),
                artifact: String::new(),
                confirm_choice: ConfirmChoice::Yes,
                last_error: None,
                saved_path: None,
            },
            stack_input: InputField::new(
                "Enter any additional information about your project",
                INPUT_CHAR_LIMIT,
            ),
            tasks_input: InputField::new(
                "Enter desired tasks to include in your workflow",
                INPUT_CHAR_LIMIT,
            ),
            spinner: Spinner::new(),
            viewport: Viewport::new(24),
            persist_pending: false,
        }
    }

    /// Leaves `Preload`: builds the detection prompt and dispatches it. Also
    /// used for re-detection rounds, where the prompt folds in the previous
    /// answer and the user's correction.
    pub fn start(&mut self) -> Vec<Effect> {
        self.session.last_error = None;
        let prompt = if self.session.user_stack_correction.is_empty() {
            prompt::detect(&self.session.file_manifest)
        } else {
            prompt::refine(
                &self.session.detected_stack,
                &self.session.user_stack_correction,
                &self.session.file_manifest,
            )
        };
        self.state = WizardState::DetectingStack;
        vec![Effect::Dispatch {
            target: RequestTarget::Detect,
            prompt,
        }]
    }

    pub fn handle_event(&mut self, event: &Event) -> Vec<Effect> {
        match event {
            Event::Tick => {
                if self.state.is_busy() {
                    self.spinner.advance();
                }
                Vec::new()
            }
            Event::Resize(_, height) => {
                self.viewport
                    .resize(height.saturating_sub(VIEWPORT_CHROME_ROWS));
                Vec::new()
            }
            Event::Paste(text) => {
                if let Some(field) = self.focused_input_mut() {
                    field.insert_str(text);
                }
                Vec::new()
            }
            Event::Key(key) => self.handle_key(key),
            Event::DetectCompleted(result) => self.on_detect_completed(result),
            Event::GenerateCompleted(result) => self.on_generate_completed(result),
            Event::PersistCompleted(result) => self.on_persist_completed(result),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Vec<Effect> {
        if self.is_quit_key(key) {
            return vec![Effect::Quit];
        }

        match self.state {
            // Busy states defer everything except quit.
            WizardState::Preload | WizardState::DetectingStack | WizardState::GeneratingArtifact => {
                Vec::new()
            }

            WizardState::ConfirmStack => match key.code {
                KeyCode::Up => {
                    self.session.confirm_choice = ConfirmChoice::Yes;
                    Vec::new()
                }
                KeyCode::Down => {
                    self.session.confirm_choice = ConfirmChoice::No;
                    Vec::new()
                }
                KeyCode::Enter => match self.session.confirm_choice {
                    ConfirmChoice::Yes => {
                        self.stack_input.blur();
                        self.tasks_input.focus();
                        self.state = WizardState::InputTasks;
                        Vec::new()
                    }
                    ConfirmChoice::No => {
                        self.tasks_input.blur();
                        self.stack_input.focus();
                        self.state = WizardState::ReviseStack;
                        Vec::new()
                    }
                },
                _ => Vec::new(),
            },

            WizardState::ReviseStack => match key.code {
                KeyCode::Enter => {
                    let correction = self.stack_input.value().trim().to_string();
                    if correction.is_empty() {
                        return Vec::new();
                    }
                    self.session.user_stack_correction = correction;
                    self.stack_input.blur();
                    self.start()
                }
                _ => {
                    self.stack_input.handle_key(key);
                    Vec::new()
                }
            },

            WizardState::InputTasks | WizardState::ReviseArtifact => match key.code {
                KeyCode::Enter => {
                    let tasks = self.tasks_input.value().trim().to_string();
                    if tasks.is_empty() {
                        return Vec::new();
                    }
                    self.session.desired_tasks = tasks;
                    self.tasks_input.blur();
                    self.dispatch_generation()
                }
                _ => {
                    self.tasks_input.handle_key(key);
                    Vec::new()
                }
            },

            WizardState::ReviewArtifact => match key.code {
                KeyCode::Up => {
                    self.session.confirm_choice = ConfirmChoice::Yes;
                    Vec::new()
                }
                KeyCode::Down => {
                    self.session.confirm_choice = ConfirmChoice::No;
                    Vec::new()
                }
                KeyCode::PageUp => {
                    self.viewport.scroll_up();
                    Vec::new()
                }
                KeyCode::PageDown => {
                    self.viewport.scroll_down();
                    Vec::new()
                }
                KeyCode::Enter => match self.session.confirm_choice {
                    ConfirmChoice::Yes => {
                        if self.persist_pending {
                            return Vec::new();
                        }
                        self.persist_pending = true;
                        vec![Effect::Persist {
                            artifact: self.session.artifact.clone(),
                        }]
                    }
                    ConfirmChoice::No => {
                        self.tasks_input.set_value(&self.session.desired_tasks);
                        self.tasks_input.focus();
                        self.state = WizardState::ReviseArtifact;
                        Vec::new()
                    }
                },
                _ => Vec::new(),
            },

            // Any key closes the final screen.
            WizardState::Done => vec![Effect::Quit],

            // Only quit leaves the error screen; no in-wizard retry.
            WizardState::Error => Vec::new(),
        }
    }

    fn on_detect_completed(&mut self, result: &Result<String, String>) -> Vec<Effect> {
        if self.state != WizardState::DetectingStack {
            tracing::warn!("discarding detect completion outside DetectingStack");
            return Vec::new();
        }
        match result {
            Ok(text) if !text.trim().is_empty() => {
                self.session.detected_stack = text.trim().to_string();
                // The correction has been folded into this round's prompt.
                self.session.user_stack_correction.clear();
                self.stack_input.clear();
                self.session.confirm_choice = ConfirmChoice::Yes;
                self.state = WizardState::ConfirmStack;
            }
            Ok(_) => self.fail("Stack detection returned empty text"),
            Err(reason) => self.fail(reason),
        }
        Vec::new()
    }

    fn on_generate_completed(&mut self, result: &Result<String, String>) -> Vec<Effect> {
        if self.state != WizardState::GeneratingArtifact {
            tracing::warn!("discarding generate completion outside GeneratingArtifact");
            return Vec::new();
        }
        match result {
            Ok(text) if !text.trim().is_empty() => {
                self.session.artifact = text.trim().to_string();
                self.viewport.set_content(&self.session.artifact);
                self.session.confirm_choice = ConfirmChoice::Yes;
                self.persist_pending = false;
                self.state = WizardState::ReviewArtifact;
            }
            Ok(_) => self.fail("Workflow generation returned empty text"),
            Err(reason) => self.fail(reason),
        }
        Vec::new()
    }

    fn on_persist_completed(&mut self, result: &Result<PathBuf, String>) -> Vec<Effect> {
        if self.state != WizardState::ReviewArtifact {
            tracing::warn!("discarding persist completion outside ReviewArtifact");
            return Vec::new();
        }
        self.persist_pending = false;
        match result {
            Ok(path) => {
                self.session.saved_path = Some(path.clone());
                self.state = WizardState::Done;
            }
            // The artifact stays in memory; the error view keeps rendering it
            // so the user can still read the workflow before quitting.
            Err(reason) => self.fail(&format!("Failed to save workflow: {}", reason)),
        }
        Vec::new()
    }

    fn dispatch_generation(&mut self) -> Vec<Effect> {
        self.session.last_error = None;
        let prompt = prompt::generate(&self.session.detected_stack, &self.session.desired_tasks);
        self.state = WizardState::GeneratingArtifact;
        vec![Effect::Dispatch {
            target: RequestTarget::Generate,
            prompt,
        }]
    }

    fn fail(&mut self, reason: &str) {
        self.session.last_error = Some(reason.to_string());
        self.state = WizardState::Error;
    }

    fn is_quit_key(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            // 'q' only quits where no input field could consume it.
            KeyCode::Char('q') => !self.state.is_text_entry(),
            _ => false,
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut InputField> {
        match self.state {
            WizardState::ReviseStack => Some(&mut self.stack_input),
            WizardState::InputTasks | WizardState::ReviseArtifact => Some(&mut self.tasks_input),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
