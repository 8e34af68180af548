use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use contacts_core::{update, AppState, Msg};
use contacts_logging::{contacts_debug, contacts_info, contacts_warn};

use super::cli::Args;
use super::config::AppConfig;
use super::effects::{ConfirmRequest, EffectRunner};
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::render;

/// Everything the main loop reacts to, in arrival order.
pub enum AppEvent {
    /// One line typed by the user.
    Input(String),
    /// Standard input reached end of file.
    InputClosed,
    /// A completion from the engine, already translated for the core.
    Msg(Msg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?.with_overrides(&args);
    let level = config.level()?;
    logging::initialize(config.log_destination, level, &config.log_file);
    contacts_info!("Starting contacts shell against {}", config.base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&config.api_settings(), event_tx.clone())
        .context("could not start the network engine")?;
    spawn_input_reader(event_tx);

    let mut shell = Shell::new(runner, io::stdout());
    writeln!(shell.out, "Type 'help' for commands.")?;
    shell.dispatch(Msg::RefreshRequested);
    shell.refresh_screen()?;

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => shell.dispatch(msg),
            AppEvent::Input(line) => {
                if shell.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            AppEvent::InputClosed => break,
        }
        shell.refresh_screen()?;
    }

    contacts_info!("Contacts shell exiting");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    contacts_warn!("Reading standard input failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

struct Shell<W: Write> {
    state: AppState,
    runner: EffectRunner,
    /// Set while the next input line answers a delete confirmation.
    awaiting: Option<ConfirmRequest>,
    force_render: bool,
    needs_prompt: bool,
    out: W,
}

impl<W: Write> Shell<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            awaiting: None,
            force_render: true,
            needs_prompt: true,
            out,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if let Some(confirm) = self.runner.enqueue(effects) {
            contacts_debug!("Asking to confirm delete of {}", confirm.id);
            self.awaiting = Some(confirm);
            self.needs_prompt = true;
        }
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        self.needs_prompt = true;

        if let Some(confirm) = self.awaiting.take() {
            let answer = line.trim().to_ascii_lowercase();
            let confirmed = answer == "y" || answer == "yes";
            contacts_info!(
                "Delete of {} {}",
                confirm.id,
                if confirmed { "confirmed" } else { "declined" }
            );
            self.dispatch(if confirmed {
                Msg::DeleteConfirmed
            } else {
                Msg::DeleteDeclined
            });
            return Ok(Flow::Continue);
        }

        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "{}", err)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(self.out, "{}", commands::HELP)?,
            Command::List => self.force_render = true,
            other => match commands::to_msgs(&other, &self.state.view()) {
                Ok(msgs) => {
                    for msg in msgs {
                        self.dispatch(msg);
                    }
                }
                Err(err) => writeln!(self.out, "{}", err)?,
            },
        }
        Ok(Flow::Continue)
    }

    /// Redraws when the state changed and re-issues the prompt when anything
    /// was printed or typed.
    fn refresh_screen(&mut self) -> io::Result<()> {
        let was_dirty = self.state.consume_dirty();
        if was_dirty || self.force_render {
            self.force_render = false;
            self.needs_prompt = true;
            writeln!(self.out)?;
            for line in render::render(&self.state.view()) {
                writeln!(self.out, "{}", line)?;
            }
        }

        if self.needs_prompt {
            self.needs_prompt = false;
            match &self.awaiting {
                Some(confirm) => write!(self.out, "Delete \"{}\"? [y/N] ", confirm.name)?,
                None => write!(self.out, "> ")?,
            }
            self.out.flush()?;
        }
        Ok(())
    }
}
