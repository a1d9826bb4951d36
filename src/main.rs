mod artifact;
mod config;
mod manifest;
mod openai;
mod prompt;
mod runlog;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use openai::OpenAiClient;
use runlog::RunLog;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tui::{Effect, Event, EventHandler, RequestDispatcher, Wizard, WizardState};

#[derive(Parser)]
#[command(name = "specter")]
#[command(
    about = "An interactive wizard that scaffolds a GitHub Actions workflow for your project using OpenAI"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the workflow wizard (the default)
    Run,
    /// Inspect or change the persisted configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration and where it lives
    Get,
    /// Set a configuration key: OPENAI_API_KEY or ENABLE_GPT_4
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Config { action }) => run_config(action),
        Some(Command::Run) | None => run_wizard().await,
    }
}

fn run_config(action: ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Get => {
            let path = Config::path()?;
            let cfg = Config::load()?;
            println!("Your specter configuration file is located at {}\n", path.display());
            println!("OPENAI_API_KEY: {}", cfg.openai_api_key);
            println!("ENABLE_GPT_4: {}", cfg.enable_gpt_4);
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = Config::load()?;
            cfg.set(&key, &value)?;
            cfg.save()?;
            println!("{} updated", key);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_wizard() -> Result<ExitCode> {
    let cfg = Config::load()?;
    let Some(api_key) = cfg.api_key() else {
        eprintln!(
            "No OpenAI API key configured. Set the OPENAI_API_KEY environment variable \
             or run `specter config set OPENAI_API_KEY <key>`."
        );
        return Ok(ExitCode::from(2));
    };

    let root = std::env::current_dir().context("Failed to get current directory")?;
    // Manifest failure is fatal before the terminal is touched.
    let files = manifest::collect(&root).context("Failed to enumerate project files")?;

    let log = RunLog::new(&root);
    log.line(&format!(
        "wizard started, model={}, manifest={} files",
        cfg.model(),
        files.len()
    ));

    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableBracketedPaste
    )?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut event_handler = EventHandler::new(Duration::from_millis(100));
    let dispatcher = RequestDispatcher::new(
        event_handler.sender(),
        OpenAiClient::new(api_key, cfg.model()),
    );

    let mut wizard = Wizard::new(files);
    let size = terminal.size()?;
    wizard.handle_event(&Event::Resize(size.width, size.height));

    let result = run_loop(
        &mut terminal,
        &mut event_handler,
        &dispatcher,
        &mut wizard,
        &root,
        &log,
    )
    .await;

    restore_terminal(&mut terminal)?;
    result?;

    match wizard.state {
        WizardState::Done => {
            if let Some(ref path) = wizard.session.saved_path {
                println!("Workflow written to {}", path.display());
            }
            log.line("wizard finished");
            Ok(ExitCode::SUCCESS)
        }
        WizardState::Error => {
            if let Some(ref reason) = wizard.session.last_error {
                eprintln!("specter: {}", reason);
                log.line(&format!("wizard failed: {}", reason));
            }
            Ok(ExitCode::FAILURE)
        }
        _ => {
            log.line("wizard interrupted by user");
            Ok(ExitCode::from(130))
        }
    }
}

async fn run_loop(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    event_handler: &mut EventHandler,
    dispatcher: &RequestDispatcher,
    wizard: &mut Wizard,
    root: &Path,
    log: &RunLog,
) -> Result<()> {
    let theme = tui::ui::theme::Theme::default_dark();
    let tx = event_handler.sender();

    let mut effects = wizard.start();
    loop {
        let mut should_quit = false;
        for effect in effects.drain(..) {
            match effect {
                Effect::Dispatch { target, prompt } => {
                    log.line(&format!("dispatching {} request", target));
                    dispatcher.dispatch(target, prompt)?;
                }
                Effect::Persist { artifact } => {
                    let result = artifact::write_workflow(root, &artifact)
                        .map_err(|e| format!("{:#}", e));
                    match &result {
                        Ok(path) => log.line(&format!("workflow written to {}", path.display())),
                        Err(reason) => log.line(&format!("workflow write failed: {}", reason)),
                    }
                    // Route the outcome through the event stream so it is
                    // ordered with everything else.
                    let _ = tx.send(Event::PersistCompleted(result));
                }
                Effect::Quit => should_quit = true,
            }
        }
        if should_quit {
            return Ok(());
        }

        terminal.draw(|frame| tui::ui::draw(frame, wizard, &theme))?;

        let event = event_handler.next().await?;
        effects = wizard.handle_event(&event);
    }
}

fn restore_terminal(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}
