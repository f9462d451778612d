//! Scale-degree tokens: `1`, `b3`, `#4`, `x4`, `bb7`, `R`.

use serde::{Deserialize, Serialize};

use super::pitch::PitchClass;
use super::TheoryError;

/// Major-scale semitone offsets for degrees 1-7.
const DEGREE_BASE_OFFSETS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A parsed scale-degree token: a degree number plus a net accidental shift.
///
/// The grammar is an optional accidental run, a digit run, and an optional
/// trailing accidental run. Each `b` contributes -1 semitone, `#` +1 and `x`
/// +2; prefix and suffix runs are summed, so `b4#` is legal with a net shift
/// of zero. `r`/`root` (any case) is degree 1 with no shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    /// The decimal degree number as written; compound degrees (9, 11, 13)
    /// wrap modulo 7 when converted to a pitch class.
    pub number: u32,
    /// Net semitone shift from the accidental runs.
    pub shift: i32,
}

fn is_accidental(c: char) -> bool {
    matches!(c, 'b' | '#' | 'x')
}

fn accidental_shift(c: char) -> i32 {
    match c {
        'b' => -1,
        '#' => 1,
        'x' => 2,
        _ => 0,
    }
}

impl Degree {
    /// Parses a degree token.
    ///
    /// Unicode `♭`/`♯` fold to their ASCII forms first. Accidentals must be
    /// contiguous at the very start and/or very end of the token; anything
    /// else, or a missing digit run, is rejected.
    pub fn parse(token: &str) -> Result<Self, TheoryError> {
        let folded: String = token
            .trim()
            .chars()
            .map(|c| match c {
                '\u{266d}' => 'b',
                '\u{266f}' => '#',
                other => other,
            })
            .collect();

        if folded.is_empty() {
            return Err(TheoryError::InvalidDegreeToken(token.to_string()));
        }

        if folded.eq_ignore_ascii_case("r") || folded.eq_ignore_ascii_case("root") {
            return Ok(Degree { number: 1, shift: 0 });
        }

        let chars: Vec<char> = folded.chars().collect();
        let n = chars.len();

        let mut i = 0;
        let mut shift = 0;
        while i < n && is_accidental(chars[i]) {
            shift += accidental_shift(chars[i]);
            i += 1;
        }

        let digit_start = i;
        while i < n && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i == digit_start {
            return Err(TheoryError::InvalidDegreeToken(token.to_string()));
        }

        let number: u32 = folded[digit_start..i]
            .parse()
            .map_err(|_| TheoryError::InvalidDegreeToken(token.to_string()))?;

        while i < n && is_accidental(chars[i]) {
            shift += accidental_shift(chars[i]);
            i += 1;
        }

        if i != n {
            return Err(TheoryError::InvalidDegreeToken(token.to_string()));
        }

        Ok(Degree { number, shift })
    }

    /// The pitch class this degree lands on relative to `root`.
    ///
    /// The degree number wraps modulo 7 onto the major-scale reference
    /// offsets (degree 9 behaves as degree 2), the accidental shift is
    /// added, and the result is reduced into [0, 12).
    pub fn pitch_class(self, root: PitchClass) -> PitchClass {
        let wrapped = (self.number as i32 - 1).rem_euclid(7) as usize;
        root.transpose(DEGREE_BASE_OFFSETS[wrapped] + self.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_flattened_degrees() {
        assert_eq!(Degree::parse("3").unwrap(), Degree { number: 3, shift: 0 });
        assert_eq!(Degree::parse("b3").unwrap(), Degree { number: 3, shift: -1 });
        assert_eq!(Degree::parse("#4").unwrap(), Degree { number: 4, shift: 1 });
        assert_eq!(Degree::parse("x4").unwrap(), Degree { number: 4, shift: 2 });
        assert_eq!(Degree::parse("bb7").unwrap(), Degree { number: 7, shift: -2 });
    }

    #[test]
    fn suffix_and_combined_accidentals_sum() {
        assert_eq!(Degree::parse("4#").unwrap(), Degree { number: 4, shift: 1 });
        assert_eq!(Degree::parse("7bb").unwrap(), Degree { number: 7, shift: -2 });
        assert_eq!(Degree::parse("b3#").unwrap(), Degree { number: 3, shift: 0 });
        assert_eq!(Degree::parse("b4#").unwrap(), Degree { number: 4, shift: 0 });
    }

    #[test]
    fn root_aliases() {
        assert_eq!(Degree::parse("R").unwrap(), Degree { number: 1, shift: 0 });
        assert_eq!(Degree::parse("root").unwrap(), Degree { number: 1, shift: 0 });
        assert_eq!(Degree::parse("Root").unwrap(), Degree { number: 1, shift: 0 });
    }

    #[test]
    fn unicode_accidentals_fold() {
        assert_eq!(Degree::parse("♭3").unwrap(), Degree { number: 3, shift: -1 });
        assert_eq!(Degree::parse("♯4").unwrap(), Degree { number: 4, shift: 1 });
    }

    #[test]
    fn rejects_bad_grammar() {
        for token in ["", "   ", "b", "#", "b#", "3x4", "4q", "q4", "b 3", "four"] {
            assert!(
                matches!(
                    Degree::parse(token),
                    Err(TheoryError::InvalidDegreeToken(_))
                ),
                "expected InvalidDegreeToken for {:?}",
                token
            );
        }
    }

    #[test]
    fn compound_degrees_wrap_modulo_seven() {
        let c = PitchClass::parse("C").unwrap();
        let ninth = Degree::parse("9").unwrap();
        let second = Degree::parse("2").unwrap();
        assert_eq!(ninth.pitch_class(c), second.pitch_class(c));

        let thirteenth = Degree::parse("13").unwrap();
        assert_eq!(thirteenth.pitch_class(c).name(false), "A");
    }

    #[test]
    fn shifts_wrap_negative_results_into_range() {
        let c = PitchClass::parse("C").unwrap();
        let flat_one = Degree::parse("b1").unwrap();
        assert_eq!(flat_one.pitch_class(c).name(false), "B");
    }
}
