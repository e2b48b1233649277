//! Trial grader and rolling statistics

use crate::types::TrialSpec;
#[cfg(feature = "colored")]
use colored::*;
use log::info;
use std::fmt;

/// Outcome of one completed trial. Never changed once recorded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    pub elapsed_ms: f64,
    pub correct: bool,
    pub canonical_answer: String,
    pub answer: String,
}

impl TrialResult {
    /// Elapsed time as shown to the user: whole milliseconds, in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ms.round() / 1000.0
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for TrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.correct {
            "correct".bright_green().bold()
        } else {
            "wrong".bright_red().bold()
        };
        write!(
            f,
            "{} ({}) answer: {}  took {}s",
            verdict,
            self.answer,
            self.canonical_answer.cyan(),
            self.elapsed_seconds()
        )
    }
}

// Plain Display impl for non-colored builds (WASM)
#[cfg(not(feature = "colored"))]
impl fmt::Display for TrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.correct { "correct" } else { "wrong" };
        write!(
            f,
            "{} ({}) answer: {}  took {}s",
            verdict,
            self.answer,
            self.canonical_answer,
            self.elapsed_seconds()
        )
    }
}

/// Grades answers and keeps the session's result history
#[derive(Debug, Clone, Default)]
pub struct TrialGrader {
    history: Vec<TrialResult>,
}

impl TrialGrader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judge an answer without recording it
    pub fn evaluate(answer: &str, spec: &TrialSpec, elapsed_ms: f64) -> TrialResult {
        let canonical_answer = spec.canonical_answer();
        TrialResult {
            elapsed_ms: elapsed_ms.max(0.0),
            correct: answer == canonical_answer,
            canonical_answer,
            answer: answer.to_string(),
        }
    }

    /// Judge an answer and append the result to the history
    pub fn grade(&mut self, answer: &str, spec: &TrialSpec, elapsed_ms: f64) -> TrialResult {
        let result = Self::evaluate(answer, spec, elapsed_ms);
        info!(
            "graded trial {}: {:?} vs {:?} -> {} in {:.0}ms",
            self.history.len() + 1,
            result.answer,
            result.canonical_answer,
            result.correct,
            result.elapsed_ms
        );
        self.history.push(result.clone());
        result
    }

    pub fn history(&self) -> &[TrialResult] {
        &self.history
    }

    pub fn last(&self) -> Option<&TrialResult> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn correct_count(&self) -> usize {
        self.history.iter().filter(|r| r.correct).count()
    }

    /// Share of correct trials, rounded to a whole percent. `None` with no data.
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.history.is_empty() {
            return None;
        }
        let ratio = self.correct_count() as f64 / self.history.len() as f64;
        Some((ratio * 100.0).round() as u32)
    }

    /// Mean response time in seconds, at millisecond resolution. `None` with no data.
    pub fn mean_latency_seconds(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let total: f64 = self.history.iter().map(|r| r.elapsed_ms).sum();
        Some((total / self.history.len() as f64).round() / 1000.0)
    }

    /// Drop all results; only done when a new session starts
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pitch;

    fn spec(pitches: &[&str]) -> TrialSpec {
        let pitches: Vec<Pitch> = pitches.iter().map(|p| p.parse().unwrap()).collect();
        TrialSpec::from_pitches(pitches).unwrap()
    }

    #[test]
    fn test_exact_match_is_correct() {
        let result = TrialGrader::evaluate("C4 E4", &spec(&["C/4", "E/4"]), 1234.0);
        assert!(result.correct);
        assert_eq!(result.canonical_answer, "C4 E4");
        assert_eq!(result.elapsed_seconds(), 1.234);
    }

    #[test]
    fn test_comparison_is_exact() {
        let trial = spec(&["C/4", "E/4"]);
        assert!(!TrialGrader::evaluate("c4 e4", &trial, 0.0).correct);
        assert!(!TrialGrader::evaluate("C4  E4", &trial, 0.0).correct);
        assert!(!TrialGrader::evaluate("C4 E5", &trial, 0.0).correct);
    }

    #[test]
    fn test_grading_is_idempotent() {
        let trial = spec(&["G/2", "B/3"]);
        let first = TrialGrader::evaluate("G2 B3", &trial, 820.5);
        let second = TrialGrader::evaluate("G2 B3", &trial, 820.5);
        assert_eq!(first, second);

        let mut grader = TrialGrader::new();
        assert_eq!(grader.grade("G2 B3", &trial, 820.5), first);
        assert_eq!(grader.grade("G2 B3", &trial, 820.5), first);
        assert_eq!(grader.len(), 2);
    }

    #[test]
    fn test_empty_history_reports_no_data() {
        let grader = TrialGrader::new();
        assert_eq!(grader.accuracy_percent(), None);
        assert_eq!(grader.mean_latency_seconds(), None);
    }

    #[test]
    fn test_accuracy_rounds_to_whole_percent() {
        let trial = spec(&["D/5"]);
        let mut grader = TrialGrader::new();
        grader.grade("D5", &trial, 1000.0);
        grader.grade("D4", &trial, 2000.0);
        grader.grade("D5", &trial, 3000.0);
        assert_eq!(grader.accuracy_percent(), Some(67));
        assert_eq!(grader.mean_latency_seconds(), Some(2.0));
    }

    #[test]
    fn test_mean_latency_rounds_to_milliseconds() {
        let trial = spec(&["D/5"]);
        let mut grader = TrialGrader::new();
        grader.grade("D5", &trial, 1000.4);
        grader.grade("D5", &trial, 1000.8);
        // mean 1000.6ms -> 1001ms
        assert_eq!(grader.mean_latency_seconds(), Some(1.001));
    }

    #[test]
    fn test_reset_clears_history() {
        let trial = spec(&["A/1"]);
        let mut grader = TrialGrader::new();
        grader.grade("A1", &trial, 10.0);
        grader.reset();
        assert!(grader.is_empty());
        assert_eq!(grader.last(), None);
    }
}
