use crate::types::Letter;
use anyhow::{anyhow, Context, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One notated pitch: a letter plus the octave group it sits in
///
/// The canonical string form is `"<letter>/<group>"` (e.g. `"C/4"`), which is
/// also what the notation renderer consumes. The answer token drops the slash
/// (`"C4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch {
    letter: Letter,
    group: u8,
}

impl Pitch {
    pub fn new(letter: Letter, group: u8) -> Self {
        Self { letter, group }
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    /// Canonical `"<letter>/<group>"` form
    pub fn canonical(&self) -> String {
        format!("{}/{}", self.letter, self.group)
    }

    /// What the keypad produces for this pitch (`"C4"`)
    pub fn answer_token(&self) -> String {
        format!("{}{}", self.letter, self.group)
    }

    /// Diatonic step count from C of group 0, used for staff placement
    pub fn diatonic_index(&self) -> i32 {
        self.group as i32 * 7 + self.letter.index() as i32
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then_with(|| self.letter.index().cmp(&other.letter.index()))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Pitch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (letter, group) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| anyhow!("Pitch must look like <letter>/<group>, got {}", s))?;
        let letter: Letter = letter.parse()?;
        let group: u8 = group
            .parse()
            .with_context(|| format!("Invalid octave group in {}", s))?;
        Ok(Pitch::new(letter, group))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.letter, self.group)
    }
}
