//! The named-scale catalog and scale generation.
//!
//! Each catalog entry is an ordered list of semitone steps between
//! consecutive scale tones. The catalog is fixed at compile time and never
//! mutated.

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;

use super::pitch::PitchClass;
use super::{dedup_preserve_order, TheoryError};

/// The scale catalog: name to semitone step pattern.
pub const SCALE_MODES: &[(&str, &[u8])] = &[
    // Common diatonic (7-note)
    ("ionian_major", &[2, 2, 1, 2, 2, 2, 1]),
    ("dorian", &[2, 1, 2, 2, 2, 1, 2]),
    ("phrygian", &[1, 2, 2, 2, 1, 2, 2]),
    ("lydian", &[2, 2, 2, 1, 2, 2, 1]),
    ("mixolydian", &[2, 2, 1, 2, 2, 1, 2]),
    ("aeolian_natural_minor", &[2, 1, 2, 2, 1, 2, 2]),
    ("locrian", &[1, 2, 2, 1, 2, 2, 2]),
    // Harmonic / melodic minor families (7-note)
    ("harmonic_minor", &[2, 1, 2, 2, 1, 3, 1]),
    ("melodic_minor", &[2, 1, 2, 2, 2, 2, 1]),
    // Modes of harmonic minor
    ("harmonic_minor_mode2_locrian_nat6", &[1, 2, 1, 2, 2, 1, 3]),
    ("harmonic_minor_mode3_ionian_aug", &[2, 1, 2, 2, 1, 3, 1]),
    ("harmonic_minor_mode4_dorian_4", &[2, 2, 1, 2, 1, 3, 1]),
    ("harmonic_minor_mode5_phrygian_dom", &[1, 3, 1, 2, 1, 2, 2]),
    ("harmonic_minor_mode6_lydian_2", &[3, 1, 2, 1, 2, 2, 1]),
    ("harmonic_minor_mode7_superlocrian_bb7", &[1, 2, 1, 2, 2, 1, 3]),
    // Modes of melodic minor
    ("dorian_b2", &[1, 2, 2, 2, 2, 1, 2]),
    ("lydian_aug", &[2, 2, 2, 2, 1, 2, 1]),
    ("lydian_dom", &[2, 2, 2, 1, 2, 1, 2]),
    ("mixolydian_b6", &[2, 2, 1, 2, 1, 2, 2]),
    ("locrian_nat2", &[2, 1, 2, 1, 2, 2, 2]),
    ("altered_superlocrian", &[1, 2, 1, 2, 2, 2, 2]),
    // Pentatonics (5-note)
    ("pentatonic_major", &[2, 2, 3, 2, 3]),
    ("pentatonic_minor", &[3, 2, 2, 3, 2]),
    ("egyptian_pentatonic", &[2, 3, 2, 3, 2]),
    ("hirajoshi", &[2, 1, 4, 1, 4]),
    ("iwato", &[1, 4, 1, 4, 2]),
    ("kumoi", &[2, 1, 4, 2, 3]),
    ("insen", &[1, 4, 2, 3, 2]),
    ("yo", &[2, 3, 2, 2, 3]),
    // Blues / hexatonics (6-note)
    ("blues", &[3, 2, 1, 1, 3, 2]),
    ("whole_tone", &[2, 2, 2, 2, 2, 2]),
    ("augmented_hexatonic", &[3, 1, 3, 1, 3, 1]),
    ("prometheus", &[2, 2, 2, 3, 1, 2]),
    ("tritone_scale", &[1, 2, 1, 2, 1, 2, 3]),
    // Octatonics (8-note, symmetric)
    ("diminished_hw", &[1, 2, 1, 2, 1, 2, 1, 2]),
    ("diminished_wh", &[2, 1, 2, 1, 2, 1, 2, 1]),
    // Common exotic heptatonics (7-note)
    ("hungarian_minor", &[2, 1, 3, 1, 1, 3, 1]),
    ("double_harmonic_major", &[1, 3, 1, 2, 1, 3, 1]),
    ("neapolitan_minor", &[1, 2, 2, 2, 1, 3, 1]),
    ("neapolitan_major", &[1, 2, 2, 2, 2, 2, 1]),
    ("enigmatic", &[1, 3, 2, 2, 2, 1, 1]),
    ("persian", &[1, 3, 1, 1, 2, 3, 1]),
    ("romanian_minor", &[2, 1, 3, 1, 2, 1, 2]),
    ("ukrainian_dorian", &[2, 1, 3, 1, 2, 1, 2]),
    ("spanish_gypsy", &[1, 3, 1, 2, 1, 2, 2]),
    // Chromatic / special
    ("chromatic", &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
];

static SCALE_INDEX: Lazy<HashMap<&'static str, &'static [u8]>> =
    Lazy::new(|| SCALE_MODES.iter().copied().collect());

/// Step patterns whose final tone closes back onto the root at the octave,
/// so the trailing duplicate is dropped from generated output.
const CLOSING_STEP_COUNTS: [usize; 5] = [5, 6, 7, 8, 12];

/// Looks up the step pattern for a cataloged scale name.
pub fn scale_steps(name: &str) -> Result<&'static [u8], TheoryError> {
    SCALE_INDEX
        .get(name)
        .copied()
        .ok_or_else(|| TheoryError::UnknownScale(name.to_string()))
}

/// All cataloged scale names, sorted.
pub fn scale_names() -> Vec<&'static str> {
    let mut names: Vec<&str> = SCALE_MODES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// Generates the pitch classes of a cataloged scale from `root`.
///
/// Walks the step pattern accumulating semitones modulo 12, yielding the
/// root plus one tone per step. When the step count is 5, 6, 7, 8 or 12 the
/// final tone is the root repeated at the octave and is dropped; other step
/// counts keep every computed tone. The result is deduplicated preserving
/// first-occurrence order.
pub fn generate_scale(root: PitchClass, name: &str) -> Result<Vec<PitchClass>, TheoryError> {
    let steps = scale_steps(name)?;

    let mut notes = Vec::with_capacity(steps.len() + 1);
    let mut current = root;
    notes.push(current);
    for &step in steps {
        current = current.transpose(step as i32);
        notes.push(current);
    }

    if CLOSING_STEP_COUNTS.contains(&steps.len()) {
        if notes.last() != Some(&root) {
            // Catalog inconsistency: the entry does not close to the octave.
            warn!(
                "scale '{}' does not close to its octave (ends on {})",
                name,
                notes.last().expect("scale has at least its root")
            );
        }
        notes.pop();
    }

    Ok(dedup_preserve_order(notes))
}
