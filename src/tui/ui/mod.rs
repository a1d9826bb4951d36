//! Rendering: a pure function from wizard state to a terminal frame.

pub mod theme;
mod views;

use ratatui::Frame;

use crate::tui::wizard::{Wizard, WizardState};
use theme::Theme;

/// Draws exactly one view for the current state. A confirmation or review
/// view whose backing data is empty is an internal defect and is surfaced as
/// an error view rather than rendered blank.
pub fn draw(frame: &mut Frame, wizard: &Wizard, theme: &Theme) {
    match wizard.state {
        WizardState::Preload | WizardState::DetectingStack => {
            views::draw_busy(frame, wizard, theme, "Detecting project stack...");
        }
        WizardState::GeneratingArtifact => {
            views::draw_busy(frame, wizard, theme, "Generating workflow...");
        }
        WizardState::ConfirmStack => {
            if wizard.session.detected_stack.is_empty() {
                views::draw_error(frame, wizard, theme, INTERNAL_EMPTY_STACK);
            } else {
                views::draw_confirm_stack(frame, wizard, theme);
            }
        }
        WizardState::ReviseStack => {
            views::draw_text_input(
                frame,
                &wizard.stack_input,
                theme,
                "Tell Specter more about the stack used in your project.",
            );
        }
        WizardState::InputTasks | WizardState::ReviseArtifact => {
            views::draw_text_input(
                frame,
                &wizard.tasks_input,
                theme,
                "Which tasks should the workflow run (e.g. linting, tests)?",
            );
        }
        WizardState::ReviewArtifact => {
            if wizard.session.artifact.is_empty() {
                views::draw_error(frame, wizard, theme, INTERNAL_EMPTY_ARTIFACT);
            } else {
                views::draw_review(frame, wizard, theme);
            }
        }
        WizardState::Done => views::draw_done(frame, wizard, theme),
        WizardState::Error => {
            let reason = wizard
                .session
                .last_error
                .as_deref()
                .unwrap_or("unknown error");
            views::draw_error(frame, wizard, theme, reason);
        }
    }
}

const INTERNAL_EMPTY_STACK: &str =
    "internal error: confirmation view reached with no detected stack";
const INTERNAL_EMPTY_ARTIFACT: &str =
    "internal error: review view reached with no generated workflow";

#[cfg(test)]
#[path = "../tests/ui_tests.rs"]
mod tests;
