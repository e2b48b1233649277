//! Session controller
//!
//! Owns the configuration, the live trial and the grader, and turns control
//! surface events into state transitions. Events are handled one at a time,
//! each to completion.
//!
//! ```text
//! Configuring --start--> AwaitingLetter <--> AwaitingGroup --complete--> Graded
//!                              ^                                          |
//!                              +------------------- next -----------------+
//! ```

use crate::assembler::{AnswerAssembler, InputPhase, KeyOutcome};
use crate::clock::{Clock, MonotonicClock};
use crate::error::DrillError;
use crate::generator;
use crate::grader::{TrialGrader, TrialResult};
use crate::types::{Letter, NoteDuration, OctaveRange, TrialSpec, DEFAULT_MAX_COUNT};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// What a session draws from: octave range plus longest pitch group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    range: OctaveRange,
    max_count: u32,
}

impl SessionConfig {
    pub fn new(range: OctaveRange, max_count: u32) -> Result<Self, DrillError> {
        if max_count == 0 {
            return Err(DrillError::InvalidMaxCount(max_count));
        }
        Ok(Self { range, max_count })
    }

    pub fn range(&self) -> OctaveRange {
        self.range
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn set_lower(&mut self, lower: u8) -> Result<(), DrillError> {
        self.range = self.range.with_lower(lower)?;
        Ok(())
    }

    pub fn set_upper(&mut self, upper: u8) -> Result<(), DrillError> {
        self.range = self.range.with_upper(upper)?;
        Ok(())
    }

    pub fn set_range(&mut self, lower: u8, upper: u8) -> Result<(), DrillError> {
        self.range = OctaveRange::new(lower, upper)?;
        Ok(())
    }

    pub fn set_max_count(&mut self, max_count: u32) -> Result<(), DrillError> {
        if max_count == 0 {
            return Err(DrillError::InvalidMaxCount(max_count));
        }
        self.max_count = max_count;
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            range: OctaveRange::default(),
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "octave groups {}, up to {} pitches",
            self.range, self.max_count
        )
    }
}

/// Discrete events emitted by a control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    LowerChanged(u8),
    UpperChanged(u8),
    RangeChanged(u8, u8),
    MaxCountChanged(u32),
    Start,
    Letter(Letter),
    Group(u8),
    Next,
}

/// Observable state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    Configuring,
    /// Running, with no trial generated yet
    AwaitingTrialStart,
    AwaitingLetter,
    AwaitingGroup,
    Graded,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Configuring => "configuring",
            SessionState::AwaitingTrialStart => "starting",
            SessionState::AwaitingLetter => "awaiting letter",
            SessionState::AwaitingGroup => "awaiting group",
            SessionState::Graded => "graded",
        }
    }
}

/// What handling one event did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Event did not apply to the current state; nothing changed
    Ignored,
    ConfigUpdated,
    /// A new trial is live and should be drawn
    TrialStarted(RenderRequest),
    InputAccepted,
    TrialGraded(TrialResult),
}

/// Everything a notation renderer needs to draw one trial
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderRequest {
    /// Canonical `"C/4"` strings in ascending order
    pub pitches: Vec<String>,
    pub duration: NoteDuration,
}

impl RenderRequest {
    pub fn for_trial(spec: &TrialSpec, duration: NoteDuration) -> Self {
        Self {
            pitches: spec.canonical_strings(),
            duration,
        }
    }
}

/// Draws trials. Each call replaces whatever was drawn before.
pub trait NotationRenderer {
    type Output;

    fn render(&mut self, request: &RenderRequest) -> Self::Output;
}

/// Read-only snapshot for display, rebuilt after every event
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrillView {
    pub state: SessionState,
    pub current_input: String,
    pub accuracy_percent: Option<u32>,
    pub mean_latency_seconds: Option<f64>,
    pub current_elapsed_seconds: Option<f64>,
    pub last_trial_correct: Option<bool>,
    pub last_canonical_answer: Option<String>,
    pub last_elapsed_seconds: Option<f64>,
    pub trials_completed: usize,
    pub letter_keys_enabled: bool,
    pub group_keys_enabled: bool,
}

/// End-of-session totals
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    pub trials: usize,
    pub correct: usize,
    pub accuracy_percent: Option<u32>,
    pub mean_latency_seconds: Option<f64>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.accuracy_percent, self.mean_latency_seconds) {
            (Some(accuracy), Some(latency)) => write!(
                f,
                "{} trials, {} correct ({}%), mean time {}s",
                self.trials, self.correct, accuracy, latency
            ),
            _ => write!(f, "no trials completed"),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveTrial {
    spec: TrialSpec,
    duration: NoteDuration,
    assembler: AnswerAssembler,
    result: Option<TrialResult>,
}

#[derive(Debug, Clone)]
enum Phase {
    Configuring,
    Running {
        snapshot: SessionConfig,
        trial: Option<ActiveTrial>,
    },
}

/// One drill session: configuration, live trial, and result history
pub struct DrillSession<C: Clock = MonotonicClock, R: Rng = StdRng> {
    config: SessionConfig,
    phase: Phase,
    grader: TrialGrader,
    clock: C,
    rng: R,
}

impl DrillSession<MonotonicClock, StdRng> {
    /// Session on the native clock with an entropy-seeded generator
    pub fn new(config: SessionConfig) -> Self {
        Self::with_parts(config, MonotonicClock::new(), StdRng::from_entropy())
    }
}

impl<C: Clock, R: Rng> DrillSession<C, R> {
    pub fn with_parts(config: SessionConfig, clock: C, rng: R) -> Self {
        Self {
            config,
            phase: Phase::Configuring,
            grader: TrialGrader::new(),
            clock,
            rng,
        }
    }

    /// Apply one control surface event
    ///
    /// Only configuration edits can fail. Presses that do not fit the current
    /// state come back as [`Outcome::Ignored`].
    pub fn handle(&mut self, event: ControlEvent) -> Result<Outcome, DrillError> {
        match event {
            ControlEvent::LowerChanged(lower) => self.edit_config(|c| c.set_lower(lower)),
            ControlEvent::UpperChanged(upper) => self.edit_config(|c| c.set_upper(upper)),
            ControlEvent::RangeChanged(lower, upper) => {
                self.edit_config(|c| c.set_range(lower, upper))
            }
            ControlEvent::MaxCountChanged(max) => self.edit_config(|c| c.set_max_count(max)),
            ControlEvent::Start => Ok(self.start()),
            ControlEvent::Letter(letter) => {
                Ok(self.feed(|assembler, now| assembler.on_letter(letter, now)))
            }
            ControlEvent::Group(group) => {
                if !OctaveRange::is_supported(group) {
                    debug!("ignoring unsupported group key {}", group);
                    return Ok(Outcome::Ignored);
                }
                Ok(self.feed(|assembler, now| assembler.on_group(group, now)))
            }
            ControlEvent::Next => Ok(self.next()),
        }
    }

    fn edit_config(
        &mut self,
        edit: impl FnOnce(&mut SessionConfig) -> Result<(), DrillError>,
    ) -> Result<Outcome, DrillError> {
        if self.is_running() {
            debug!("ignoring configuration edit while running");
            return Ok(Outcome::Ignored);
        }
        if let Err(e) = edit(&mut self.config) {
            warn!("rejected configuration edit: {}", e);
            return Err(e);
        }
        Ok(Outcome::ConfigUpdated)
    }

    fn start(&mut self) -> Outcome {
        if self.is_running() {
            return Outcome::Ignored;
        }
        info!("session started with {}", self.config);
        self.grader.reset();
        self.phase = Phase::Running {
            snapshot: self.config,
            trial: None,
        };
        self.begin_trial()
    }

    fn next(&mut self) -> Outcome {
        let graded = self.active_trial().map_or(false, |t| t.result.is_some());
        if !graded {
            return Outcome::Ignored;
        }
        self.begin_trial()
    }

    /// Replace the live trial with a freshly generated one
    fn begin_trial(&mut self) -> Outcome {
        let snapshot = match &self.phase {
            Phase::Running { snapshot, .. } => *snapshot,
            Phase::Configuring => return Outcome::Ignored,
        };
        let spec = generator::generate(&mut self.rng, snapshot.range(), snapshot.max_count());
        let duration = NoteDuration::random(&mut self.rng);
        let request = RenderRequest::for_trial(&spec, duration);
        let assembler = AnswerAssembler::new(spec.answer_len(), self.clock.now_ms());

        if let Phase::Running { trial, .. } = &mut self.phase {
            *trial = Some(ActiveTrial {
                spec,
                duration,
                assembler,
                result: None,
            });
        }
        Outcome::TrialStarted(request)
    }

    fn feed(&mut self, press: impl FnOnce(&mut AnswerAssembler, f64) -> KeyOutcome) -> Outcome {
        let now = self.clock.now_ms();
        let trial = match &mut self.phase {
            Phase::Running {
                trial: Some(trial), ..
            } => trial,
            _ => return Outcome::Ignored,
        };
        match press(&mut trial.assembler, now) {
            KeyOutcome::Ignored => Outcome::Ignored,
            KeyOutcome::Accepted => Outcome::InputAccepted,
            KeyOutcome::Completed(done) => {
                let result = self
                    .grader
                    .grade(&done.answer, &trial.spec, done.elapsed_ms);
                trial.result = Some(result.clone());
                Outcome::TrialGraded(result)
            }
        }
    }

    fn active_trial(&self) -> Option<&ActiveTrial> {
        match &self.phase {
            Phase::Running { trial, .. } => trial.as_ref(),
            Phase::Configuring => None,
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Configuring => SessionState::Configuring,
            Phase::Running { trial: None, .. } => SessionState::AwaitingTrialStart,
            Phase::Running {
                trial: Some(trial), ..
            } => match trial.assembler.phase() {
                _ if trial.result.is_some() => SessionState::Graded,
                InputPhase::AwaitingLetter => SessionState::AwaitingLetter,
                InputPhase::AwaitingGroup => SessionState::AwaitingGroup,
                InputPhase::Complete => SessionState::Graded,
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// True while a trial is waiting for input
    pub fn is_trial_active(&self) -> bool {
        matches!(
            self.state(),
            SessionState::AwaitingLetter | SessionState::AwaitingGroup
        )
    }

    /// Configuration the next session will start with
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Configuration frozen when the running session started
    pub fn snapshot(&self) -> Option<SessionConfig> {
        match &self.phase {
            Phase::Running { snapshot, .. } => Some(*snapshot),
            Phase::Configuring => None,
        }
    }

    pub fn current_trial(&self) -> Option<&TrialSpec> {
        self.active_trial().map(|t| &t.spec)
    }

    /// Render request for the live trial, if any
    pub fn render_request(&self) -> Option<RenderRequest> {
        self.active_trial()
            .map(|t| RenderRequest::for_trial(&t.spec, t.duration))
    }

    pub fn history(&self) -> &[TrialResult] {
        self.grader.history()
    }

    pub fn grader(&self) -> &TrialGrader {
        &self.grader
    }

    /// Milliseconds on the current trial: live while answering, final once graded
    pub fn current_elapsed_ms(&self) -> Option<f64> {
        let trial = self.active_trial()?;
        match &trial.result {
            Some(result) => Some(result.elapsed_ms),
            None => Some((self.clock.now_ms() - trial.assembler.started_at_ms()).max(0.0)),
        }
    }

    /// Display refresh. Returns live elapsed seconds only while a trial is
    /// waiting for input; grading never reads it.
    pub fn tick(&self) -> Option<f64> {
        if !self.is_trial_active() {
            return None;
        }
        self.current_elapsed_ms().map(|ms| ms.round() / 1000.0)
    }

    pub fn view(&self) -> DrillView {
        let trial = self.active_trial();
        let result = trial.and_then(|t| t.result.as_ref());
        let active = self.is_trial_active();

        DrillView {
            state: self.state(),
            current_input: trial
                .map(|t| t.assembler.buffer().to_string())
                .unwrap_or_default(),
            accuracy_percent: self.grader.accuracy_percent(),
            mean_latency_seconds: self.grader.mean_latency_seconds(),
            current_elapsed_seconds: self.current_elapsed_ms().map(|ms| ms.round() / 1000.0),
            last_trial_correct: result.map(|r| r.correct),
            last_canonical_answer: result.map(|r| r.canonical_answer.clone()),
            last_elapsed_seconds: result.map(TrialResult::elapsed_seconds),
            trials_completed: self.grader.len(),
            letter_keys_enabled: active
                && trial.map_or(false, |t| t.assembler.accepts_letters()),
            group_keys_enabled: active && trial.map_or(false, |t| t.assembler.accepts_groups()),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            trials: self.grader.len(),
            correct: self.grader.correct_count(),
            accuracy_percent: self.grader.accuracy_percent(),
            mean_latency_seconds: self.grader.mean_latency_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn session(lower: u8, upper: u8, max: u32) -> (DrillSession<ManualClock, StdRng>, ManualClock) {
        let clock = ManualClock::new();
        let config = SessionConfig::new(OctaveRange::new(lower, upper).unwrap(), max).unwrap();
        let session = DrillSession::with_parts(config, clock.clone(), StdRng::seed_from_u64(9));
        (session, clock)
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.range(), OctaveRange::new(2, 6).unwrap());
        assert_eq!(config.max_count(), 4);
    }

    #[test]
    fn test_zero_max_count_is_rejected() {
        assert_eq!(
            SessionConfig::new(OctaveRange::default(), 0),
            Err(DrillError::InvalidMaxCount(0))
        );
    }

    #[test]
    fn test_invalid_edit_leaves_config_unchanged() {
        let (mut session, _) = session(3, 5, 2);
        assert_eq!(
            session.handle(ControlEvent::LowerChanged(6)),
            Err(DrillError::InvalidRange { lower: 6, upper: 5 })
        );
        assert_eq!(session.config().range(), OctaveRange::new(3, 5).unwrap());
        assert_eq!(
            session.handle(ControlEvent::UpperChanged(4)),
            Ok(Outcome::ConfigUpdated)
        );
        assert_eq!(session.config().range(), OctaveRange::new(3, 4).unwrap());
    }

    #[test]
    fn test_keys_are_ignored_while_configuring() {
        let (mut session, _) = session(4, 4, 1);
        assert_eq!(session.handle(ControlEvent::Letter(Letter::C)), Ok(Outcome::Ignored));
        assert_eq!(session.handle(ControlEvent::Group(4)), Ok(Outcome::Ignored));
        assert_eq!(session.handle(ControlEvent::Next), Ok(Outcome::Ignored));
        assert_eq!(session.state(), SessionState::Configuring);
    }

    #[test]
    fn test_start_enters_awaiting_letter() {
        let (mut session, _) = session(2, 6, 4);
        let outcome = session.handle(ControlEvent::Start).unwrap();
        let request = match outcome {
            Outcome::TrialStarted(request) => request,
            other => panic!("expected a new trial, got {:?}", other),
        };
        assert_eq!(Some(request), session.render_request());
        assert_eq!(session.state(), SessionState::AwaitingLetter);
        assert!(session.is_trial_active());
        assert_eq!(session.handle(ControlEvent::Start), Ok(Outcome::Ignored));
    }

    #[test]
    fn test_config_edits_do_not_reach_running_session() {
        let (mut session, _) = session(4, 4, 1);
        session.handle(ControlEvent::Start).unwrap();
        assert_eq!(
            session.handle(ControlEvent::RangeChanged(1, 2)),
            Ok(Outcome::Ignored)
        );
        assert_eq!(session.handle(ControlEvent::MaxCountChanged(9)), Ok(Outcome::Ignored));
        assert_eq!(session.snapshot(), Some(session.config()));
        assert_eq!(session.config().range(), OctaveRange::new(4, 4).unwrap());
    }

    #[test]
    fn test_next_only_applies_after_grading() {
        let (mut session, clock) = session(4, 4, 1);
        session.handle(ControlEvent::Start).unwrap();
        assert_eq!(session.handle(ControlEvent::Next), Ok(Outcome::Ignored));

        let pitch = session.current_trial().unwrap().pitches()[0];
        session.handle(ControlEvent::Letter(pitch.letter())).unwrap();
        clock.advance(1500.0);
        let graded = session.handle(ControlEvent::Group(4)).unwrap();
        assert!(matches!(graded, Outcome::TrialGraded(ref r) if r.correct && r.elapsed_ms == 1500.0));
        assert_eq!(session.state(), SessionState::Graded);
        assert!(!session.is_trial_active());

        clock.advance(700.0);
        assert!(matches!(
            session.handle(ControlEvent::Next).unwrap(),
            Outcome::TrialStarted(_)
        ));
        assert_eq!(session.state(), SessionState::AwaitingLetter);
        assert_eq!(session.view().current_input, "");
        assert_eq!(session.view().current_elapsed_seconds, Some(0.0));
    }

    #[test]
    fn test_unsupported_group_keys_are_ignored() {
        let (mut session, _) = session(4, 4, 1);
        session.handle(ControlEvent::Start).unwrap();
        session.handle(ControlEvent::Letter(Letter::C)).unwrap();
        assert_eq!(session.handle(ControlEvent::Group(0)), Ok(Outcome::Ignored));
        assert_eq!(session.handle(ControlEvent::Group(8)), Ok(Outcome::Ignored));
        assert_eq!(session.state(), SessionState::AwaitingGroup);
    }

    #[test]
    fn test_tick_only_reports_during_input() {
        let (mut session, clock) = session(4, 4, 1);
        assert_eq!(session.tick(), None);
        session.handle(ControlEvent::Start).unwrap();
        clock.advance(2345.4);
        assert_eq!(session.tick(), Some(2.345));

        let pitch = session.current_trial().unwrap().pitches()[0];
        session.handle(ControlEvent::Letter(pitch.letter())).unwrap();
        session.handle(ControlEvent::Group(4)).unwrap();
        clock.advance(5000.0);
        assert_eq!(session.tick(), None);
        // The graded trial keeps showing its final time
        assert_eq!(session.view().current_elapsed_seconds, Some(2.345));
    }

    #[test]
    fn test_view_key_affordances() {
        let (mut session, _) = session(4, 4, 2);
        let view = session.view();
        assert!(!view.letter_keys_enabled && !view.group_keys_enabled);

        session.handle(ControlEvent::Start).unwrap();
        assert!(session.view().letter_keys_enabled);
        assert!(!session.view().group_keys_enabled);

        session.handle(ControlEvent::Letter(Letter::A)).unwrap();
        assert!(!session.view().letter_keys_enabled);
        assert!(session.view().group_keys_enabled);
    }

    #[test]
    fn test_summary_before_any_trial() {
        let (session, _) = session(2, 6, 4);
        let summary = session.summary();
        assert_eq!(summary.trials, 0);
        assert_eq!(summary.accuracy_percent, None);
        assert_eq!(summary.to_string(), "no trials completed");
    }
}
