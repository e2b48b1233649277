//! Session settings commands (lower, upper, range, max, config)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use notedrill_core::{ControlEvent, Outcome};

/// Handle `lower <group>`
pub fn cmd_lower(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match args.parse::<u8>() {
        Ok(group) => apply(ctx, ControlEvent::LowerChanged(group)),
        Err(_) => CommandResult::Error("Usage: lower <group 1-7>".to_string()),
    }
}

/// Handle `upper <group>`
pub fn cmd_upper(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match args.parse::<u8>() {
        Ok(group) => apply(ctx, ControlEvent::UpperChanged(group)),
        Err(_) => CommandResult::Error("Usage: upper <group 1-7>".to_string()),
    }
}

/// Handle `range <lower> <upper>`
pub fn cmd_range(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let bounds: Vec<Option<u8>> = args.split_whitespace().map(|s| s.parse().ok()).collect();
    match bounds.as_slice() {
        [Some(lower), Some(upper)] => apply(ctx, ControlEvent::RangeChanged(*lower, *upper)),
        _ => CommandResult::Error("Usage: range <lower> <upper>".to_string()),
    }
}

/// Handle `max <count>`
pub fn cmd_max(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match args.parse::<u32>() {
        Ok(count) => apply(ctx, ControlEvent::MaxCountChanged(count)),
        Err(_) => CommandResult::Error("Usage: max <count>".to_string()),
    }
}

/// Handle `config`
pub fn cmd_config(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut message = format!("Settings: {}", ctx.session.config());
    if let Some(snapshot) = ctx.session.snapshot() {
        message.push_str(&format!("\nRunning with: {}", snapshot));
    }
    CommandResult::Message(message)
}

fn apply(ctx: &mut CommandContext, event: ControlEvent) -> CommandResult {
    match ctx.session.handle(event) {
        Ok(Outcome::ConfigUpdated) => CommandResult::Message(
            format!("⚙️  {}", ctx.session.config())
                .bright_green()
                .to_string(),
        ),
        Ok(_) => CommandResult::Error(
            "Settings are fixed once the session is running".to_string(),
        ),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use notedrill_core::OctaveRange;

    #[test]
    fn test_range_edits() {
        let mut ctx = context(2, 6, 4);
        assert!(matches!(cmd_range("3 5", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.session.config().range(), OctaveRange::new(3, 5).unwrap());

        assert!(matches!(cmd_lower("4", &mut ctx), CommandResult::Message(_)));
        assert!(matches!(cmd_upper("4", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.session.config().range(), OctaveRange::new(4, 4).unwrap());
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let mut ctx = context(2, 6, 4);
        match cmd_range("6 2", &mut ctx) {
            CommandResult::Error(msg) => assert!(msg.contains("6-2")),
            other => panic!("expected an error, got {:?}", other),
        }
        assert!(matches!(cmd_lower("9", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_max("0", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.session.config().range(), OctaveRange::new(2, 6).unwrap());
    }

    #[test]
    fn test_bad_arguments_show_usage() {
        let mut ctx = context(2, 6, 4);
        assert_eq!(
            cmd_range("3", &mut ctx),
            CommandResult::Error("Usage: range <lower> <upper>".to_string())
        );
        assert!(matches!(cmd_max("lots", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_settings_locked_while_running() {
        let mut ctx = context(2, 6, 4);
        ctx.session.handle(ControlEvent::Start).unwrap();
        assert!(matches!(cmd_max("2", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.session.config().max_count(), 4);
        match cmd_config("", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("Running with")),
            other => panic!("expected a message, got {:?}", other),
        }
    }
}
