//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "🎼 notedrill Help".bold());
    println!("{}", "=================".bold());
    println!();
    println!("{}", "Settings (before starting):".green());
    println!("  {}      - Lowest octave group (1-7)", "lower <g>".cyan());
    println!("  {}      - Highest octave group (1-7)", "upper <g>".cyan());
    println!("  {}  - Set both bounds", "range <lo> <hi>".cyan());
    println!("  {}        - Most pitches per trial", "max <n>".cyan());
    println!("  {}         - Show settings", "config".cyan());
    println!();
    println!("{}", "Drill:".green());
    println!("  {}          - Start the session", "start".cyan());
    println!(
        "  {}              - Press a letter key",
        "C".cyan()
    );
    println!(
        "  {}              - Press an octave group key",
        "4".cyan()
    );
    println!(
        "  {}          - Type a whole answer, lowest pitch first",
        "C4 E4".cyan()
    );
    println!("  {}           - Next trial after grading", "next".cyan());
    println!("  {}          - Accuracy, mean time, current input", "status".cyan());
    println!("  {}         - Every graded trial", "history".cyan());
    println!("  {}          - Draw the current trial again", "staff".cyan());
    println!();
    println!("{}", "Reading the staff:".green());
    println!("  Treble staff; lines from the bottom are E4 G4 B4 D5 F5.");
    println!("  Ledger lines continue the pattern above and below.");
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}           - Show this help", "help".bright_green());
    println!("  {}           - Exit", "quit".bright_red());
}
