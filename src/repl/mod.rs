//! REPL (Read-Eval-Print Loop) for the drill
//!
//! Keyboard lines arrive from a reader thread and display ticks from the
//! [`DisplayTicker`]; both are multiplexed on one loop so the session sees
//! events strictly in arrival order.

use crate::commands::{create_registry, drill, CommandContext, CommandRegistry, CommandResult};
use crate::config::{DisplaySettings, DrillConfig};
use crate::ticker::{DisplayTicker, Tick};
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};
use notedrill_core::DrillSession;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, ExternalPrinter};
use std::thread;

/// One line from the reader thread
type InputLine = Result<String, ReadlineError>;

/// Interactive drill REPL
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,
    display: DisplaySettings,

    // Live timer
    ticker: DisplayTicker,
    rx_tick: Receiver<Tick>,
    /// Last whole second the live timer printed
    last_shown: Option<u64>,

    // Event channels
    tx_input: Sender<InputLine>,
    rx_input: Receiver<InputLine>,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: DrillConfig) -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialize line editor: {}", e))?;
        let session = DrillSession::new(config.session_config()?);
        let ctx = CommandContext::new(session, &config.display);
        let (ticker, rx_tick) = DisplayTicker::spawn(config.display.tick_interval());
        let (tx_input, rx_input) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            ctx,
            display: config.display,
            ticker,
            rx_tick,
            last_shown: None,
            tx_input,
            rx_input,
        })
    }

    /// Run one input line; returns false when the REPL should exit
    fn handle_line(&mut self, registry: &CommandRegistry, line: &str) -> bool {
        let result = match registry.execute(line, &mut self.ctx) {
            CommandResult::NotACommand => drill::cmd_keys(line, &mut self.ctx),
            other => other,
        };

        match result {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => return false,
            CommandResult::Error(e) => println!("{} {}", "Error:".bright_red().bold(), e.red()),
            CommandResult::NotACommand => println!(
                "{} Unknown command: {} (type '{}' for help)",
                "Error:".bright_red().bold(),
                line,
                "help".bright_green()
            ),
        }
        self.sync_ticker();
        true
    }

    /// Run the ticker exactly while a trial waits for input
    fn sync_ticker(&mut self) {
        let active = self.display.live_timer && self.ctx.session.is_trial_active();
        if active && !self.ticker.is_running() {
            debug!("trial open, starting display ticker");
            self.last_shown = None;
            self.ticker.start();
        } else if !active && self.ticker.is_running() {
            debug!("trial closed, stopping display ticker");
            self.ticker.stop();
        }
    }

    /// Live timer line for a tick, if the shown second changed
    fn on_tick(&mut self) -> Option<String> {
        let seconds = self.ctx.session.tick()?;
        let whole = seconds.floor() as u64;
        if whole == 0 || self.last_shown == Some(whole) {
            return None;
        }
        self.last_shown = Some(whole);
        Some(format!("{} {}s", "⏱".bright_yellow(), whole))
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎼".bright_yellow(),
            "notedrill: read the staff, type the pitches".bright_cyan().bold()
        );
        println!("Settings: {}", self.ctx.session.config());
        println!(
            "Type '{}' to begin, '{}' for more information, '{}' or {} to exit.\n",
            "start".bright_green(),
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        // Move editor to thread, keeping a printer that can write above its prompt
        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow::anyhow!("REPL is already running"))?;
        let mut printer: Option<Box<dyn ExternalPrinter>> = editor
            .create_external_printer()
            .ok()
            .map(|p| Box::new(p) as Box<dyn ExternalPrinter>);
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "drill>".bright_magenta().bold());
            let readline = editor.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(Ok(line)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(Err(err));
                    break;
                }
            }
        });

        let registry = create_registry();
        let rx_input = self.rx_input.clone();
        let rx_tick = self.rx_tick.clone();

        loop {
            crossbeam_channel::select! {
                recv(rx_input) -> msg => match msg {
                    Ok(Ok(line)) => {
                        if line.is_empty() {
                            continue;
                        }
                        if !self.handle_line(&registry, &line) {
                            break;
                        }
                    }
                    Ok(Err(ReadlineError::Interrupted))
                    | Ok(Err(ReadlineError::Eof)) => break,
                    Ok(Err(err)) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(rx_tick) -> msg => {
                    if msg.is_err() {
                        break;
                    }
                    if let Some(line) = self.on_tick() {
                        match printer.as_mut() {
                            Some(p) => {
                                let _ = p.print(line);
                            }
                            None => println!("{}", line),
                        }
                    }
                }
            }
        }

        self.ticker.stop();
        let summary = self.ctx.session.summary();
        info!("session closed: {}", summary);
        println!("{} {}", "Session:".bright_cyan(), summary);
        println!("{} 🎼", "Goodbye!".bright_cyan());
        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(config: DrillConfig) -> Result<()> {
    let mut repl = Repl::new(config)?;
    repl.run()
}
