use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// A natural pitch letter, ordered the way a staff reads upward from C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in staff order (C first)
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position in the fixed ordering C<D<E<F<G<A<B (0-6)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Letter at a position of the fixed ordering
    pub fn from_index(index: usize) -> Option<Letter> {
        Self::ALL.get(index).copied()
    }

    /// Parse a single keypad character (case-insensitive)
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

impl FromStr for Letter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Letter::from_char(c).ok_or_else(|| anyhow!("Invalid pitch letter: {}", s))
            }
            _ => Err(anyhow!("Invalid pitch letter: {}", s)),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_order_follows_the_staff() {
        assert!(Letter::C < Letter::D);
        assert!(Letter::G < Letter::A);
        assert!(Letter::A < Letter::B);
        assert_eq!(Letter::C.index(), 0);
        assert_eq!(Letter::B.index(), 6);
    }

    #[test]
    fn test_letter_index_round_trip() {
        for letter in Letter::ALL {
            assert_eq!(Letter::from_index(letter.index()), Some(letter));
        }
        assert_eq!(Letter::from_index(7), None);
    }

    #[test]
    fn test_letter_parsing() {
        assert_eq!("C".parse::<Letter>().unwrap(), Letter::C);
        assert_eq!("a".parse::<Letter>().unwrap(), Letter::A);
        assert!("H".parse::<Letter>().is_err());
        assert!("CD".parse::<Letter>().is_err());
        assert!("".parse::<Letter>().is_err());
    }
}
