//! # notedrill
//!
//! A terminal sight-reading drill. Each trial draws a small group of pitches
//! on a text staff; the player types them back on the keypad (letter, then
//! octave group, per pitch) and sees right or wrong plus how long it took.
//!
//! The session engine itself lives in `notedrill-core`; this crate is the
//! terminal surface around it.
//!
//! ## Modules
//!
//! - `commands`: REPL command registry and handlers that turn typed lines into
//!   control events for the session.
//! - `config`: TOML configuration for the starting range and display settings.
//! - `repl`: the interactive loop, multiplexing keyboard input and the display
//!   ticker.
//! - `staff`: text notation renderer drawing a treble staff with ledger lines.
//! - `ticker`: background timer that drives the live elapsed-time display.

pub mod commands;
pub mod config;
pub mod repl;
pub mod staff;
pub mod ticker;

// Re-export commonly used types for convenience
pub use crate::config::DrillConfig;
pub use crate::staff::TextStaffRenderer;
pub use notedrill_core::{ControlEvent, DrillSession, DrillView, SessionConfig};
