use anyhow::{anyhow, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Note value used when drawing a trial. Purely visual, never graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteDuration {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
}

impl NoteDuration {
    pub const ALL: [NoteDuration; 4] = [
        NoteDuration::Whole,
        NoteDuration::Half,
        NoteDuration::Quarter,
        NoteDuration::Eighth,
    ];

    /// Renderer symbol (`"1"`, `"2"`, `"4"`, `"8"`)
    pub fn symbol(&self) -> &'static str {
        match self {
            NoteDuration::Whole => "1",
            NoteDuration::Half => "2",
            NoteDuration::Quarter => "4",
            NoteDuration::Eighth => "8",
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            NoteDuration::Whole => "whole",
            NoteDuration::Half => "half",
            NoteDuration::Quarter => "quarter",
            NoteDuration::Eighth => "eighth",
        }
    }

    /// Whole and half notes are drawn with hollow heads
    pub fn is_hollow(&self) -> bool {
        matches!(self, NoteDuration::Whole | NoteDuration::Half)
    }

    /// Pick one of the durations uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> NoteDuration {
        let len = Self::ALL.len();
        let index = ((rng.gen::<f64>() * len as f64).floor() as usize).min(len - 1);
        Self::ALL[index]
    }
}

impl FromStr for NoteDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "whole" => Ok(NoteDuration::Whole),
            "2" | "half" => Ok(NoteDuration::Half),
            "4" | "quarter" => Ok(NoteDuration::Quarter),
            "8" | "eighth" => Ok(NoteDuration::Eighth),
            other => Err(anyhow!("Unknown note duration: {}", other)),
        }
    }
}

impl fmt::Display for NoteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_duration_parsing() {
        assert_eq!("1".parse::<NoteDuration>().unwrap(), NoteDuration::Whole);
        assert_eq!("Eighth".parse::<NoteDuration>().unwrap(), NoteDuration::Eighth);
        assert!("16".parse::<NoteDuration>().is_err());
    }

    #[test]
    fn test_random_duration_covers_every_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let duration = NoteDuration::random(&mut rng);
            let index = NoteDuration::ALL.iter().position(|d| *d == duration).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
