//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands. Lines
//! that match no command fall through to the keypad (see [`drill::cmd_keys`]).

pub mod drill;
pub mod general;
pub mod settings;

use crate::config::DisplaySettings;
use crate::staff::TextStaffRenderer;
use notedrill_core::{DrillSession, NotationRenderer, RenderRequest};

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try reading it as keypad input
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: DrillSession,
    pub renderer: TextStaffRenderer,
}

impl CommandContext {
    pub fn new(session: DrillSession, display: &DisplaySettings) -> Self {
        Self {
            session,
            renderer: TextStaffRenderer::new(display.staff_width),
        }
    }

    /// Draw a trial for the terminal
    pub fn draw(&mut self, request: &RenderRequest) -> String {
        self.renderer.render(request)
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Settings (only while configuring)
    registry.register("lower", settings::cmd_lower);
    registry.register("upper", settings::cmd_upper);
    registry.register("range", settings::cmd_range);
    registry.register("max", settings::cmd_max);
    registry.register("config", settings::cmd_config);

    // Drill
    registry.register("start", drill::cmd_start);
    registry.register("next", drill::cmd_next);
    registry.register("status", drill::cmd_status);
    registry.register("history", drill::cmd_history);
    registry.register("staff", drill::cmd_staff);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}
