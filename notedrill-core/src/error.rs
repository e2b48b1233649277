use std::fmt;

/// Configuration and construction failures of the drill engine
///
/// Keypad input never produces one of these: out-of-phase presses are
/// ignored, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrillError {
    /// Lower octave group above the upper one
    InvalidRange { lower: u8, upper: u8 },
    /// Octave group outside what the keypad can enter
    GroupOutOfRange(u8),
    /// Maximum sequence length below 1
    InvalidMaxCount(u32),
    /// A trial was built from no pitches
    EmptyTrial,
}

impl fmt::Display for DrillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillError::InvalidRange { lower, upper } => write!(
                f,
                "Invalid octave range {}-{}: lower group must not exceed upper group",
                lower, upper
            ),
            DrillError::GroupOutOfRange(group) => {
                let (min, max) = crate::types::FULL_GROUP_RANGE;
                write!(f, "Octave group {} is outside {}-{}", group, min, max)
            }
            DrillError::InvalidMaxCount(count) => {
                write!(f, "Maximum pitch count must be at least 1, got {}", count)
            }
            DrillError::EmptyTrial => write!(f, "A trial needs at least one pitch"),
        }
    }
}

impl std::error::Error for DrillError {}
