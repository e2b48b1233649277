//! # notedrill core
//!
//! WASM-compatible drill session engine for notedrill.
//! Generates pitch groups, assembles keypad answers and grades them, without
//! any terminal, rendering or timer-thread dependencies.
//!
//! ## Features
//!
//! - **serde**: Enable serialization of view types for web interop
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//! - **colored**: Enable colored terminal output (disabled in WASM)
//!
//! ## Example
//!
//! ```ignore
//! use notedrill_core::{ControlEvent, DrillSession, Letter, SessionConfig};
//!
//! let mut session = DrillSession::new(SessionConfig::default());
//! session.handle(ControlEvent::Start)?;
//! session.handle(ControlEvent::Letter(Letter::C))?;
//! session.handle(ControlEvent::Group(4))?;
//! println!("{:?}", session.view());
//! ```

pub mod assembler;
pub mod clock;
pub mod error;
pub mod generator;
pub mod grader;
pub mod keypad;
pub mod session;
pub mod types;
pub mod wasm;

// Re-export commonly used types
pub use assembler::{AnswerAssembler, CompletedAnswer, InputPhase, KeyOutcome};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::DrillError;
pub use grader::{TrialGrader, TrialResult};
pub use keypad::parse_keys;
pub use session::{
    ControlEvent, DrillSession, DrillView, NotationRenderer, Outcome, RenderRequest,
    SessionConfig, SessionState, SessionSummary,
};
pub use types::{Letter, NoteDuration, OctaveRange, Pitch, TrialSpec};
