//! Answer assembler
//!
//! Builds the typed answer one keypad press at a time. A pitch is a letter
//! followed by its octave group; pitches are separated by a single space.
//! The assembler alone decides which presses are accepted, so a control
//! surface that lags behind a state change cannot corrupt the buffer.

use crate::types::Letter;
use log::debug;

/// Which key row the assembler accepts next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputPhase {
    AwaitingLetter,
    AwaitingGroup,
    /// Answer finished; inert until the next reset
    Complete,
}

/// A finished answer together with how long it took
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAnswer {
    pub answer: String,
    pub elapsed_ms: f64,
}

/// Result of feeding one key press
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Out-of-phase or post-completion press; nothing changed
    Ignored,
    Accepted,
    Completed(CompletedAnswer),
}

#[derive(Debug, Clone)]
pub struct AnswerAssembler {
    buffer: String,
    phase: InputPhase,
    expected_len: usize,
    started_at_ms: f64,
}

impl AnswerAssembler {
    /// Arm an assembler for an answer of `expected_len` characters
    pub fn new(expected_len: usize, started_at_ms: f64) -> Self {
        Self {
            buffer: String::with_capacity(expected_len),
            phase: InputPhase::AwaitingLetter,
            expected_len,
            started_at_ms,
        }
    }

    /// Clear the buffer and re-arm for the next trial
    pub fn reset(&mut self, expected_len: usize, started_at_ms: f64) {
        self.buffer.clear();
        self.phase = InputPhase::AwaitingLetter;
        self.expected_len = expected_len;
        self.started_at_ms = started_at_ms;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn phase(&self) -> InputPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == InputPhase::Complete
    }

    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    pub fn accepts_letters(&self) -> bool {
        self.phase == InputPhase::AwaitingLetter
    }

    pub fn accepts_groups(&self) -> bool {
        self.phase == InputPhase::AwaitingGroup
    }

    pub fn on_letter(&mut self, letter: Letter, now_ms: f64) -> KeyOutcome {
        if !self.accepts_letters() {
            debug!("ignoring letter {} while {:?}", letter, self.phase);
            return KeyOutcome::Ignored;
        }
        if !self.buffer.is_empty() && !self.buffer.ends_with(' ') {
            self.buffer.push(' ');
        }
        self.buffer.push_str(letter.name());
        self.phase = InputPhase::AwaitingGroup;
        self.check_complete(now_ms)
    }

    pub fn on_group(&mut self, group: u8, now_ms: f64) -> KeyOutcome {
        if !self.accepts_groups() {
            debug!("ignoring group {} while {:?}", group, self.phase);
            return KeyOutcome::Ignored;
        }
        self.buffer.push_str(&group.to_string());
        self.phase = InputPhase::AwaitingLetter;
        self.check_complete(now_ms)
    }

    fn check_complete(&mut self, now_ms: f64) -> KeyOutcome {
        if self.buffer.len() != self.expected_len {
            return KeyOutcome::Accepted;
        }
        self.phase = InputPhase::Complete;
        KeyOutcome::Completed(CompletedAnswer {
            answer: self.buffer.clone(),
            elapsed_ms: (now_ms - self.started_at_ms).max(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pitch_answer_completes_at_eight_chars() {
        let mut assembler = AnswerAssembler::new(8, 100.0);
        assert_eq!(assembler.on_letter(Letter::C, 200.0), KeyOutcome::Accepted);
        assert_eq!(assembler.on_group(4, 300.0), KeyOutcome::Accepted);
        assert_eq!(assembler.on_letter(Letter::E, 400.0), KeyOutcome::Accepted);
        assert_eq!(assembler.buffer(), "C4 E");

        let outcome = assembler.on_group(4, 1600.0);
        assert_eq!(
            outcome,
            KeyOutcome::Completed(CompletedAnswer {
                answer: "C4 E4".to_string(),
                elapsed_ms: 1500.0,
            })
        );
        assert!(assembler.is_complete());
    }

    #[test]
    fn test_group_while_awaiting_letter_is_ignored() {
        let mut assembler = AnswerAssembler::new(8, 0.0);
        assert_eq!(assembler.on_group(4, 1.0), KeyOutcome::Ignored);
        assert_eq!(assembler.buffer(), "");
        assert_eq!(assembler.phase(), InputPhase::AwaitingLetter);
    }

    #[test]
    fn test_letter_while_awaiting_group_is_ignored() {
        let mut assembler = AnswerAssembler::new(8, 0.0);
        assembler.on_letter(Letter::D, 1.0);
        assert_eq!(assembler.on_letter(Letter::F, 2.0), KeyOutcome::Ignored);
        assert_eq!(assembler.buffer(), "D");
        assert_eq!(assembler.phase(), InputPhase::AwaitingGroup);
    }

    #[test]
    fn test_complete_assembler_is_inert() {
        let mut assembler = AnswerAssembler::new(2, 0.0);
        assembler.on_letter(Letter::G, 1.0);
        assert!(matches!(assembler.on_group(3, 2.0), KeyOutcome::Completed(_)));
        assert_eq!(assembler.on_letter(Letter::A, 3.0), KeyOutcome::Ignored);
        assert_eq!(assembler.on_group(3, 4.0), KeyOutcome::Ignored);
        assert_eq!(assembler.buffer(), "G3");
    }

    #[test]
    fn test_reset_rearms_for_next_trial() {
        let mut assembler = AnswerAssembler::new(2, 0.0);
        assembler.on_letter(Letter::G, 1.0);
        assembler.on_group(3, 2.0);
        assembler.reset(5, 50.0);
        assert_eq!(assembler.buffer(), "");
        assert!(assembler.accepts_letters());
        assert!(!assembler.accepts_groups());
        assert_eq!(assembler.started_at_ms(), 50.0);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let mut assembler = AnswerAssembler::new(2, 500.0);
        assembler.on_letter(Letter::B, 0.0);
        match assembler.on_group(1, 100.0) {
            KeyOutcome::Completed(done) => assert_eq!(done.elapsed_ms, 0.0),
            other => panic!("expected completion, got {:?}", other),
        }
    }
}
