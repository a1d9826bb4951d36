//! The five view families: busy, confirmation, text input, review, terminal.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use crate::tui::input::InputField;
use crate::tui::wizard::{ConfirmChoice, Wizard};

pub fn draw_busy(frame: &mut Frame, wizard: &Wizard, theme: &Theme, label: &str) {
    let area = frame.area();
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", wizard.spinner.glyph()),
            Style::default().fg(theme.spinner),
        ),
        Span::raw(label.to_string()),
    ]);
    let help = Line::from(Span::styled(
        "(Press q to quit)",
        Style::default().fg(theme.muted),
    ));
    frame.render_widget(
        Paragraph::new(vec![line, Line::from(""), help]),
        padded(area),
    );
}

pub fn draw_confirm_stack(frame: &mut Frame, wizard: &Wizard, theme: &Theme) {
    let area = padded(frame.area());
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Specter detected the following stack in your project: "),
            Span::styled(
                wizard.session.detected_stack.clone(),
                Style::default().fg(theme.result),
            ),
        ]),
        Line::from("Is this correct?"),
        Line::from(""),
    ];
    lines.extend(choice_lines(
        wizard.session.confirm_choice,
        "Yes",
        "No, I want Specter to refine its answer",
        theme,
    ));
    lines.push(Line::from(""));
    lines.push(help_line(
        "(Up/Down to choose, Enter to confirm, q to quit)",
        theme,
    ));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

pub fn draw_text_input(
    frame: &mut Frame,
    field: &InputField,
    theme: &Theme,
    title: &str,
) {
    let area = padded(frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(title.to_string()).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = input_block.inner(chunks[1]);
    let text = if field.value().is_empty() {
        Span::styled(field.placeholder().to_string(), Style::default().fg(theme.muted))
    } else {
        Span::styled(field.value().to_string(), Style::default().fg(theme.user_input))
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(input_block), chunks[1]);

    if field.is_focused() {
        let col = inner.x + field.cursor_column().min(inner.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position((col, inner.y));
    }

    frame.render_widget(
        Paragraph::new(help_line("(Press Enter to continue, Esc to quit)", theme)),
        chunks[2],
    );
}

pub fn draw_review(frame: &mut Frame, wizard: &Wizard, theme: &Theme) {
    let area = padded(frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new("Specter generated this workflow for your project:"),
        chunks[0],
    );

    draw_artifact_viewport(frame, wizard, theme, chunks[1]);

    let mut lines = choice_lines(
        wizard.session.confirm_choice,
        "Yes, save it to .github/workflows",
        "No, I want to revise the tasks",
        theme,
    );
    lines.insert(0, Line::from(""));
    frame.render_widget(Paragraph::new(lines), chunks[2]);

    frame.render_widget(
        Paragraph::new(help_line(
            "(Up/Down to choose, PgUp/PgDn to scroll, Enter to confirm, q to quit)",
            theme,
        )),
        chunks[3],
    );
}

pub fn draw_done(frame: &mut Frame, wizard: &Wizard, theme: &Theme) {
    let area = padded(frame.area());
    let path = wizard
        .session
        .saved_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "Workflow saved.",
            Style::default().fg(theme.result).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Written to "),
            Span::styled(path, Style::default().fg(theme.user_input)),
        ]),
        Line::from(""),
        help_line("(Press any key to exit)", theme),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

pub fn draw_error(frame: &mut Frame, wizard: &Wizard, theme: &Theme, reason: &str) {
    let area = padded(frame.area());

    let header = vec![
        Line::from(Span::styled(
            format!("Error: {}", reason),
            Style::default().fg(theme.error),
        )),
        Line::from(""),
        help_line("(Press q to quit)", theme),
    ];

    // A persistence failure keeps the generated workflow in memory; show it
    // so the user can still read it before quitting.
    if wizard.session.artifact.is_empty() {
        frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: false }), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: false }), chunks[0]);
    draw_artifact_viewport(frame, wizard, theme, chunks[1]);
}

fn draw_artifact_viewport(frame: &mut Frame, wizard: &Wizard, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" workflow ");
    let paragraph = Paragraph::new(wizard.viewport.content().to_string())
        .style(Style::default().fg(theme.result))
        .block(block)
        .scroll((wizard.viewport.offset() as u16, 0));
    frame.render_widget(paragraph, area);
}

fn choice_lines<'a>(
    choice: ConfirmChoice,
    yes: &'a str,
    no: &'a str,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let selected = Style::default().fg(theme.selected);
    match choice {
        ConfirmChoice::Yes => vec![
            Line::from(Span::styled(format!("  > {}", yes), selected)),
            Line::from(format!("    {}", no)),
        ],
        ConfirmChoice::No => vec![
            Line::from(format!("    {}", yes)),
            Line::from(Span::styled(format!("  > {}", no), selected)),
        ],
    }
}

fn help_line<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(theme.muted)))
}

fn padded(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0)])
        .horizontal_margin(1)
        .vertical_margin(1)
        .split(area)[0]
}
