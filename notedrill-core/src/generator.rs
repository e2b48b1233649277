//! Pitch generator
//!
//! Draws the pitches for one trial. Every draw goes through [`draw_index`],
//! which scales a unit sample and clamps the result so floating-point
//! rounding can never push a draw past the top value.

use crate::types::{Letter, OctaveRange, Pitch, TrialSpec};
use log::debug;
use rand::Rng;
use std::collections::BTreeSet;

/// Uniform index in `0..len`, clamped to `len - 1`
pub fn draw_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    let scaled = (rng.gen::<f64>() * len as f64).floor() as usize;
    scaled.min(len.saturating_sub(1))
}

/// How many pitches to draw: uniform over `1..=max_count`
pub fn draw_count<R: Rng + ?Sized>(rng: &mut R, max_count: u32) -> u32 {
    let max_count = max_count.max(1);
    let scaled = (rng.gen::<f64>() * max_count as f64).ceil() as u32;
    scaled.clamp(1, max_count)
}

/// Octave group uniform over the inclusive range
pub fn draw_group<R: Rng + ?Sized>(rng: &mut R, range: OctaveRange) -> u8 {
    range.lower() + draw_index(rng, range.span() as usize) as u8
}

/// Letter uniform over C..B
pub fn draw_letter<R: Rng + ?Sized>(rng: &mut R) -> Letter {
    Letter::ALL[draw_index(rng, Letter::ALL.len())]
}

pub fn draw_pitch<R: Rng + ?Sized>(rng: &mut R, range: OctaveRange) -> Pitch {
    let group = draw_group(rng, range);
    Pitch::new(draw_letter(rng), group)
}

/// Generate one trial
///
/// Repeated draws collapse instead of being redrawn, so the trial can hold
/// fewer pitches than were drawn. Drawing stops once every pitch in the range
/// is taken.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, range: OctaveRange, max_count: u32) -> TrialSpec {
    let count = draw_count(rng, max_count);
    let capacity = Letter::ALL.len() * range.span() as usize;

    let mut drawn = BTreeSet::new();
    for _ in 0..count {
        drawn.insert(draw_pitch(rng, range));
        if drawn.len() == capacity {
            break;
        }
    }

    let trial = TrialSpec::from_distinct(drawn);
    debug!(
        "generated {} (drew up to {}, range {}, max {})",
        trial, count, range, max_count
    );
    trial
}
