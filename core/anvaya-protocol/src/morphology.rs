#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

bitflags! {
    /// Case digits found anywhere in a morph-analysis bundle.
    ///
    /// The annotation format embeds the grammatical case as a bare digit
    /// (`पुं;1;एक`), so presence is all the rules ever ask about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct CaseMarks: u16 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
        const FIFTH = 16;
        const SIXTH = 32;
        const SEVENTH = 64;
        const EIGHTH = 128;
    }
}

impl CaseMarks {
    /// Flag for a single case digit (`1`..=`8`).
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1..=8 => Self::from_bits(1 << (digit - 1)),
            _ => None,
        }
    }

    /// Collects every case digit occurring in `morph`.
    pub fn scan(morph: &str) -> Self {
        morph
            .bytes()
            .filter(u8::is_ascii_digit)
            .filter_map(|b| Self::from_digit(b - b'0'))
            .fold(Self::empty(), |acc, flag| acc | flag)
    }

    pub fn has_digit(&self, digit: u8) -> bool {
        Self::from_digit(digit).is_some_and(|flag| self.contains(flag))
    }
}

/// True when `haystack` contains at least one of `needles`.
pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_ref()))
}
