//! Fretboard geometry: tunings, equal-temperament fret spacing, and the
//! mapping from (string, fret) coordinates to sounded pitch classes.

use serde::{Deserialize, Serialize};

use crate::theory::pitch::PitchClass;
use crate::theory::resolve::split_tokens;
use crate::theory::TheoryError;

/// Standard six-string guitar tuning, lowest string first.
pub const DEFAULT_TUNING: [&str; 6] = ["E", "A", "D", "G", "B", "E"];

/// Fret numbers conventionally carrying an inlay marker.
const INLAY_REFERENCE_FRETS: [usize; 10] = [3, 5, 7, 9, 12, 15, 17, 19, 21, 24];

/// An ordered set of open-string pitch classes, lowest string first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning(Vec<PitchClass>);

impl Tuning {
    /// Parses a tuning from free text, e.g. `"D A D G B E"` or `"D,A,D,G,B,E"`.
    ///
    /// Each token is normalized independently; an empty string is rejected.
    pub fn parse(raw: &str) -> Result<Self, TheoryError> {
        let tokens = split_tokens(raw);
        if tokens.is_empty() {
            return Err(TheoryError::EmptyInput);
        }
        let mut strings = Vec::with_capacity(tokens.len());
        for token in tokens {
            strings.push(PitchClass::parse(token)?);
        }
        Ok(Tuning(strings))
    }

    /// Standard tuning, E A D G B E.
    pub fn standard() -> Self {
        Tuning(
            DEFAULT_TUNING
                .iter()
                .map(|s| PitchClass::parse(s).expect("default tuning is well formed"))
                .collect(),
        )
    }

    /// The open-string pitch classes, lowest string first.
    pub fn strings(&self) -> &[PitchClass] {
        &self.0
    }

    /// Number of strings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a tuning with no strings (only reachable via deserialization).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Spellings of the open strings under the given display preference.
    pub fn labels(&self, prefer_flats: bool) -> Vec<&'static str> {
        self.0.iter().map(|pc| pc.name(prefer_flats)).collect()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

/// Physical positions of the nut and each fret along the string.
///
/// Returns `fret_count + 1` values in the unit of `scale_length`; index 0 is
/// the nut, pinned to exactly 0.0. Fret `f` sits at
/// `scale_length * (1 - 2^(-f/12))`, the equal-temperament spacing law.
pub fn fret_positions(fret_count: usize, scale_length: f64) -> Vec<f64> {
    (0..=fret_count)
        .map(|f| {
            if f == 0 {
                0.0
            } else {
                scale_length * (1.0 - 2f64.powf(-(f as f64) / 12.0))
            }
        })
        .collect()
}

/// The pitch class sounded by fretting `string_index` at `fret`.
///
/// Fret 0 is the open string.
pub fn sounded_pitch_class(tuning: &Tuning, string_index: usize, fret: usize) -> PitchClass {
    tuning.strings()[string_index].transpose(fret as i32)
}

/// One fretted (or open) position whose sounded pitch class is in the
/// requested set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPosition {
    /// String index, 0 = lowest string.
    pub string: usize,
    /// Fret index, 0 = open string.
    pub fret: usize,
    /// The sounded pitch class.
    pub pitch_class: PitchClass,
    /// True when the sounded class equals the designated root.
    pub is_root: bool,
}

/// Sweeps every string and fret 0..=`fret_count`, collecting the positions
/// whose sounded pitch class is in `classes`.
///
/// Output is string-major, fret-minor: all positions on string 0 first.
pub fn match_positions(
    tuning: &Tuning,
    fret_count: usize,
    classes: &[PitchClass],
    root: PitchClass,
) -> Vec<MatchPosition> {
    let mut out = Vec::new();
    for string in 0..tuning.len() {
        for fret in 0..=fret_count {
            let pitch_class = sounded_pitch_class(tuning, string, fret);
            if classes.contains(&pitch_class) {
                out.push(MatchPosition {
                    string,
                    fret,
                    pitch_class,
                    is_root: pitch_class == root,
                });
            }
        }
    }
    out
}

/// An inlay marker position on the neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inlay {
    /// The fret carrying the marker.
    pub fret: usize,
    /// True at the octave frets (12 and 24), drawn as a double dot.
    pub double_dot: bool,
}

/// The inlay markers visible on a neck with `fret_count` frets, ascending.
pub fn inlay_frets(fret_count: usize) -> Vec<Inlay> {
    INLAY_REFERENCE_FRETS
        .iter()
        .filter(|&&f| f <= fret_count)
        .map(|&fret| Inlay {
            fret,
            double_dot: fret == 12 || fret == 24,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(name: &str) -> PitchClass {
        PitchClass::parse(name).unwrap()
    }

    #[test]
    fn octave_fret_halves_the_scale_length() {
        let xs = fret_positions(12, 650.0);
        assert_eq!(xs.len(), 13);
        assert_eq!(xs[0], 0.0);
        assert!((xs[12] - 325.0).abs() < 1e-9);
    }

    #[test]
    fn fret_positions_increase_monotonically() {
        let xs = fret_positions(24, 628.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn open_string_sounds_its_tuning_class() {
        let tuning = Tuning::standard();
        assert_eq!(sounded_pitch_class(&tuning, 0, 0), pc("E"));
        assert_eq!(sounded_pitch_class(&tuning, 0, 5), pc("A"));
        assert_eq!(sounded_pitch_class(&tuning, 4, 1), pc("C"));
        assert_eq!(sounded_pitch_class(&tuning, 5, 12), pc("E"));
    }

    #[test]
    fn match_sweep_is_string_major_and_flags_roots() {
        let tuning = Tuning::standard();
        let classes = [pc("E"), pc("G#"), pc("B")];
        let matches = match_positions(&tuning, 12, &classes, pc("E"));

        // First entry is the open low E, flagged as root.
        assert_eq!(matches[0].string, 0);
        assert_eq!(matches[0].fret, 0);
        assert!(matches[0].is_root);

        let mut last = (0, 0);
        for m in &matches {
            assert!((m.string, m.fret) >= last);
            last = (m.string, m.fret);
            assert!(classes.contains(&m.pitch_class));
            assert_eq!(m.is_root, m.pitch_class == pc("E"));
        }
    }

    #[test]
    fn inlay_subset_tracks_fret_count() {
        let frets: Vec<usize> = inlay_frets(24).iter().map(|i| i.fret).collect();
        assert_eq!(frets, [3, 5, 7, 9, 12, 15, 17, 19, 21, 24]);

        let frets: Vec<usize> = inlay_frets(11).iter().map(|i| i.fret).collect();
        assert_eq!(frets, [3, 5, 7, 9]);

        for inlay in inlay_frets(24) {
            assert_eq!(inlay.double_dot, inlay.fret == 12 || inlay.fret == 24);
        }
    }

    #[test]
    fn tuning_parses_commas_and_mixed_case() {
        let tuning = Tuning::parse("d, a, d, g, b, e").unwrap();
        assert_eq!(tuning.len(), 6);
        assert_eq!(tuning.strings()[0], pc("D"));
        assert!(Tuning::parse("").is_err());
        assert!(Tuning::parse("E A H").is_err());
    }
}
