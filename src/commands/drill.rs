//! Drill commands (start, next, status, history, staff) and keypad input

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use notedrill_core::{parse_keys, ControlEvent, DrillView, Outcome, SessionState, TrialResult};

/// Handle `start`
pub fn cmd_start(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.session.handle(ControlEvent::Start) {
        Ok(Outcome::TrialStarted(request)) => {
            let staff = ctx.draw(&request);
            CommandResult::Message(format!(
                "{} {}\n\n{}\n\n{}",
                "▶".bright_green(),
                format!("Session started: {}", ctx.session.config()).bright_cyan(),
                staff,
                keypad_hint()
            ))
        }
        Ok(_) => CommandResult::Error("A session is already running".to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `next`
pub fn cmd_next(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.session.handle(ControlEvent::Next) {
        Ok(Outcome::TrialStarted(request)) => CommandResult::Message(ctx.draw(&request)),
        Ok(_) if !ctx.session.is_running() => {
            CommandResult::Error("No session running; type `start` first".to_string())
        }
        Ok(_) => CommandResult::Error("Finish the current trial first".to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `status`
pub fn cmd_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(format_view(&ctx.session.view()))
}

/// Handle `history`
pub fn cmd_history(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let history = ctx.session.history();
    if history.is_empty() {
        return CommandResult::Message("No trials completed yet".to_string());
    }
    let lines: Vec<String> = history
        .iter()
        .enumerate()
        .map(|(i, result)| format!("{:>3}. {}", i + 1, result))
        .collect();
    CommandResult::Message(lines.join("\n"))
}

/// Handle `staff`: draw the live trial again
pub fn cmd_staff(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.session.render_request() {
        Some(request) => CommandResult::Message(ctx.draw(&request)),
        None => CommandResult::Error("No trial to show; type `start` first".to_string()),
    }
}

/// Feed a line of keypad symbols (`C`, `4`, `C4 E4`) to the live trial
///
/// Returns `NotACommand` when the line is not keypad input at all.
pub fn cmd_keys(line: &str, ctx: &mut CommandContext) -> CommandResult {
    let events = match parse_keys(line) {
        Some(events) => events,
        None => return CommandResult::NotACommand,
    };
    if !ctx.session.is_trial_active() {
        let hint = if ctx.session.is_running() {
            "Trial already graded; type `next` for another"
        } else {
            "No session running; type `start` first"
        };
        return CommandResult::Error(hint.to_string());
    }

    let mut accepted = 0;
    for event in events {
        match ctx.session.handle(event) {
            Ok(Outcome::InputAccepted) => accepted += 1,
            Ok(Outcome::TrialGraded(result)) => {
                return CommandResult::Message(format_graded(&result, &ctx.session.view()));
            }
            Ok(_) => {}
            Err(e) => return CommandResult::Error(e.to_string()),
        }
    }

    let view = ctx.session.view();
    if accepted == 0 {
        return CommandResult::Error(format!("Ignored; {}", expecting(&view)));
    }
    CommandResult::Message(format!("Input: {}", view.current_input.bright_white().bold()))
}

fn expecting(view: &DrillView) -> &'static str {
    match view.state {
        SessionState::AwaitingLetter => "expecting a letter (C D E F G A B)",
        SessionState::AwaitingGroup => "expecting an octave group (1-7)",
        _ => "no trial is waiting for input",
    }
}

fn keypad_hint() -> String {
    format!(
        "Type the pitches bottom to top: a letter then its group, e.g. {}",
        "C4 E4".cyan()
    )
}

/// Seconds as displayed, or a dash when there is nothing to show
pub fn format_seconds(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) => format!("{}s", s),
        None => "-".to_string(),
    }
}

fn format_stats(view: &DrillView) -> String {
    let accuracy = match view.accuracy_percent {
        Some(percent) => format!("{}%", percent),
        None => "no data".to_string(),
    };
    let latency = match view.mean_latency_seconds {
        Some(_) => format_seconds(view.mean_latency_seconds),
        None => "no data".to_string(),
    };
    format!("Accuracy: {}  Mean time: {}", accuracy, latency)
}

fn format_graded(result: &TrialResult, view: &DrillView) -> String {
    format!(
        "{}\n{}\nType {} for another trial.",
        result,
        format_stats(view),
        "next".bright_green()
    )
}

/// Full status block for the `status` command
pub fn format_view(view: &DrillView) -> String {
    let mut lines = vec![
        format!("State: {}", view.state.name()),
        format_stats(view),
        format!(
            "Current time: {}  Trials: {}",
            format_seconds(view.current_elapsed_seconds),
            view.trials_completed
        ),
        format!("Input: {}", view.current_input),
    ];
    if let (Some(correct), Some(answer)) = (view.last_trial_correct, &view.last_canonical_answer) {
        lines.push(format!(
            "Last trial: {}  answer {}  took {}",
            if correct { "correct" } else { "wrong" },
            answer,
            format_seconds(view.last_elapsed_seconds)
        ));
    }
    lines.join("\n")
}
