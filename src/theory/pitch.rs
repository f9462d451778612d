//! Pitch classes and note-name normalization.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::TheoryError;

/// The 12 canonical pitch-class spellings, sharps preferred.
pub const CHROMATIC_SHARPS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The 12 canonical pitch-class spellings, flats preferred.
///
/// Differs from [`CHROMATIC_SHARPS`] only on the 5 black-key classes.
pub const CHROMATIC_FLATS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Semitone offset of each natural letter above C.
const LETTER_OFFSETS: [(char, i32); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// One of the 12 equal-temperament pitch classes, octave-independent.
///
/// Internally a semitone index 0-11 with C = 0. Enharmonic spellings parse to
/// the same value; the sharp/flat choice is applied only when a name is
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Builds a pitch class from a semitone count, wrapping into [0, 12).
    ///
    /// Negative inputs wrap correctly: -1 is B.
    pub fn from_semitones(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    /// The semitone index, 0-11 with C = 0.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Shifts by a signed number of semitones, wrapping within the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitones(self.0 as i32 + semitones)
    }

    /// Normalizes a raw note spelling to its pitch class.
    ///
    /// Accepts a letter A-G followed by at most one accidental (`#`, or `b` in
    /// either case); interior whitespace is ignored and letter case does not
    /// matter. Theoretical spellings resolve to their sounding class
    /// (`Fb` = E, `Cb` = B, `B#` = C, `E#` = F).
    pub fn parse(raw: &str) -> Result<Self, TheoryError> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let mut chars = compact.chars();
        let letter = chars
            .next()
            .ok_or_else(|| TheoryError::InvalidNote(raw.to_string()))?;

        let base = LETTER_OFFSETS
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, off)| *off)
            .ok_or_else(|| TheoryError::InvalidNote(raw.to_string()))?;

        // After uppercasing, a trailing 'B' reads as a flat marker.
        let shift = match chars.next() {
            None => 0,
            Some('#') => 1,
            Some('B') => -1,
            Some(_) => return Err(TheoryError::InvalidNote(raw.to_string())),
        };

        if chars.next().is_some() {
            return Err(TheoryError::InvalidNote(raw.to_string()));
        }

        Ok(Self::from_semitones(base + shift))
    }

    /// The canonical spelling under the given sharp/flat preference.
    ///
    /// Naturals spell identically under both preferences.
    pub fn name(self, prefer_flats: bool) -> &'static str {
        if prefer_flats {
            CHROMATIC_FLATS[self.0 as usize]
        } else {
            CHROMATIC_SHARPS[self.0 as usize]
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(false))
    }
}

impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let index = u8::deserialize(deserializer)?;
        if index < 12 {
            Ok(PitchClass(index))
        } else {
            Err(serde::de::Error::custom(format!(
                "pitch class index out of range: {}",
                index
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_and_accidentals() {
        assert_eq!(PitchClass::parse("C").unwrap().index(), 0);
        assert_eq!(PitchClass::parse("f#").unwrap().index(), 6);
        assert_eq!(PitchClass::parse(" bb ").unwrap().index(), 10);
        assert_eq!(PitchClass::parse("Eb").unwrap().index(), 3);
    }

    #[test]
    fn enharmonic_spellings_share_an_index() {
        assert_eq!(
            PitchClass::parse("C#").unwrap(),
            PitchClass::parse("Db").unwrap()
        );
        assert_eq!(PitchClass::parse("Fb").unwrap(), PitchClass::parse("E").unwrap());
        assert_eq!(PitchClass::parse("Cb").unwrap(), PitchClass::parse("B").unwrap());
        assert_eq!(PitchClass::parse("B#").unwrap(), PitchClass::parse("C").unwrap());
        assert_eq!(PitchClass::parse("E#").unwrap(), PitchClass::parse("F").unwrap());
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["C", "Db", "d#", "gb", "A#", "bB", "E", "F#"] {
            let pc = PitchClass::parse(raw).unwrap();
            for flats in [false, true] {
                assert_eq!(PitchClass::parse(pc.name(flats)).unwrap(), pc);
            }
        }
    }

    #[test]
    fn spelling_honors_flat_preference_on_black_keys_only() {
        let cs = PitchClass::parse("C#").unwrap();
        assert_eq!(cs.name(false), "C#");
        assert_eq!(cs.name(true), "Db");

        let g = PitchClass::parse("G").unwrap();
        assert_eq!(g.name(false), "G");
        assert_eq!(g.name(true), "G");
    }

    #[test]
    fn rejects_malformed_spellings() {
        for raw in ["", "H", "C##", "Cbb", "C#x", "Z", "#", "C-"] {
            assert!(
                matches!(PitchClass::parse(raw), Err(TheoryError::InvalidNote(_))),
                "expected InvalidNote for {:?}",
                raw
            );
        }
    }

    #[test]
    fn transpose_wraps_both_directions() {
        let b = PitchClass::parse("B").unwrap();
        assert_eq!(b.transpose(1).name(false), "C");
        let c = PitchClass::parse("C").unwrap();
        assert_eq!(c.transpose(-1).name(false), "B");
        assert_eq!(c.transpose(-13).name(false), "B");
        assert_eq!(PitchClass::from_semitones(-1).name(false), "B");
    }
}
