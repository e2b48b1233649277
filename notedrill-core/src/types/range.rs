use crate::error::DrillError;
use std::fmt;
use std::ops::RangeInclusive;

/// Every octave group the keypad offers
pub const FULL_GROUP_RANGE: (u8, u8) = (1, 7);

/// Range a fresh session starts with
pub const DEFAULT_GROUP_RANGE: (u8, u8) = (2, 6);

/// Longest pitch group a fresh session draws
pub const DEFAULT_MAX_COUNT: u32 = 4;

/// Inclusive band of octave groups a trial may draw from
///
/// Always satisfies `lower <= upper`, both inside [`FULL_GROUP_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OctaveRange {
    lower: u8,
    upper: u8,
}

impl OctaveRange {
    /// Validate and build a range
    pub fn new(lower: u8, upper: u8) -> Result<Self, DrillError> {
        for group in [lower, upper] {
            if !Self::is_supported(group) {
                return Err(DrillError::GroupOutOfRange(group));
            }
        }
        if lower > upper {
            return Err(DrillError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Range covering every supported group
    pub fn full() -> Self {
        Self {
            lower: FULL_GROUP_RANGE.0,
            upper: FULL_GROUP_RANGE.1,
        }
    }

    pub fn is_supported(group: u8) -> bool {
        (FULL_GROUP_RANGE.0..=FULL_GROUP_RANGE.1).contains(&group)
    }

    pub fn lower(&self) -> u8 {
        self.lower
    }

    pub fn upper(&self) -> u8 {
        self.upper
    }

    /// Number of groups in the range (always at least 1)
    pub fn span(&self) -> u8 {
        self.upper - self.lower + 1
    }

    pub fn contains(&self, group: u8) -> bool {
        self.groups().contains(&group)
    }

    pub fn groups(&self) -> RangeInclusive<u8> {
        self.lower..=self.upper
    }

    /// Same range with a new lower bound
    pub fn with_lower(&self, lower: u8) -> Result<Self, DrillError> {
        Self::new(lower, self.upper)
    }

    /// Same range with a new upper bound
    pub fn with_upper(&self, upper: u8) -> Result<Self, DrillError> {
        Self::new(self.lower, upper)
    }
}

impl Default for OctaveRange {
    fn default() -> Self {
        Self {
            lower: DEFAULT_GROUP_RANGE.0,
            upper: DEFAULT_GROUP_RANGE.1,
        }
    }
}

impl fmt::Display for OctaveRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let range = OctaveRange::default();
        assert_eq!((range.lower(), range.upper()), (2, 6));
        assert_eq!(range.span(), 5);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert_eq!(
            OctaveRange::new(5, 3),
            Err(DrillError::InvalidRange { lower: 5, upper: 3 })
        );
    }

    #[test]
    fn test_groups_outside_keypad_are_rejected() {
        assert_eq!(OctaveRange::new(0, 3), Err(DrillError::GroupOutOfRange(0)));
        assert_eq!(OctaveRange::new(3, 8), Err(DrillError::GroupOutOfRange(8)));
    }

    #[test]
    fn test_single_group_range() {
        let range = OctaveRange::new(4, 4).unwrap();
        assert_eq!(range.span(), 1);
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn test_bound_edits_keep_the_invariant() {
        let range = OctaveRange::new(3, 5).unwrap();
        assert_eq!(range.with_lower(5).unwrap(), OctaveRange::new(5, 5).unwrap());
        assert!(range.with_lower(6).is_err());
        assert!(range.with_upper(2).is_err());
        assert_eq!(range.to_string(), "3-5");
    }
}
