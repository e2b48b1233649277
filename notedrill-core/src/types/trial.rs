use crate::error::DrillError;
use crate::types::Pitch;
use std::collections::BTreeSet;
use std::fmt;

/// The pitches of one trial, in canonical order
///
/// Construction sorts by (group, letter) and drops repeated pitches, so a
/// trial never holds the same pitch twice and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSpec {
    pitches: Vec<Pitch>,
}

impl TrialSpec {
    /// Canonicalize a drawn set of pitches into a trial
    pub fn from_pitches(mut pitches: Vec<Pitch>) -> Result<Self, DrillError> {
        if pitches.is_empty() {
            return Err(DrillError::EmptyTrial);
        }
        pitches.sort();
        pitches.dedup();
        Ok(Self { pitches })
    }

    /// Trial from a set that already holds at least one pitch
    pub(crate) fn from_distinct(pitches: BTreeSet<Pitch>) -> Self {
        debug_assert!(!pitches.is_empty());
        Self {
            pitches: pitches.into_iter().collect(),
        }
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// `"C/4"`-style strings for the notation renderer
    pub fn canonical_strings(&self) -> Vec<String> {
        self.pitches.iter().map(Pitch::canonical).collect()
    }

    /// Expected answer: canonical strings joined by a space, slashes removed
    pub fn canonical_answer(&self) -> String {
        self.canonical_strings().join(" ").replace('/', "")
    }

    /// Length of a finished answer: two characters per pitch plus separators
    pub fn answer_len(&self) -> usize {
        let n = self.pitches.len();
        2 * n + n.saturating_sub(1)
    }
}

impl fmt::Display for TrialSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.canonical_strings().join(", "))
    }
}
