//! Resolution of raw user input into pitch-class sequences.
//!
//! The three input modes (explicit notes, degree formulas, cataloged scales)
//! are a closed enum so front ends dispatch exhaustively instead of sniffing
//! strings.

use log::debug;
use serde::{Deserialize, Serialize};

use super::degree::Degree;
use super::pitch::PitchClass;
use super::scales::generate_scale;
use super::{dedup_preserve_order, TheoryError};

/// One of the three ways a caller can name a set of pitch classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Explicit note-name tokens, e.g. `["C", "E", "G"]`.
    Notes(Vec<String>),
    /// Degree tokens applied to a root, e.g. `["1", "b3", "5"]` on `A`.
    Degrees {
        /// The degree tokens, in order.
        tokens: Vec<String>,
        /// The root the degrees are measured from.
        root: PitchClass,
    },
    /// A cataloged scale generated from a root.
    Scale {
        /// The root of the scale.
        root: PitchClass,
        /// A catalog name, e.g. `"dorian"`.
        name: String,
    },
}

impl Selection {
    /// Resolves this selection to its pitch-class sequence.
    pub fn resolve(&self) -> Result<Vec<PitchClass>, TheoryError> {
        match self {
            Selection::Notes(tokens) => resolve_notes(tokens),
            Selection::Degrees { tokens, root } => resolve_degrees(tokens, *root),
            Selection::Scale { root, name } => generate_scale(*root, name),
        }
    }
}

/// Splits free text on commas and whitespace, dropping empty pieces.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Normalizes each note token and deduplicates preserving first-occurrence
/// order. The first invalid token aborts the whole call.
pub fn resolve_notes<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<PitchClass>, TheoryError> {
    let mut notes = Vec::with_capacity(tokens.len());
    for token in tokens {
        notes.push(PitchClass::parse(token.as_ref())?);
    }
    debug!("resolved {} note tokens to {:?}", tokens.len(), notes);
    Ok(dedup_preserve_order(notes))
}

/// Parses each degree token, applies it to `root`, and deduplicates
/// preserving first-occurrence order.
///
/// An empty token list is an error; the first invalid token aborts the call.
pub fn resolve_degrees<S: AsRef<str>>(
    tokens: &[S],
    root: PitchClass,
) -> Result<Vec<PitchClass>, TheoryError> {
    if tokens.is_empty() {
        return Err(TheoryError::EmptyInput);
    }

    let mut notes = Vec::with_capacity(tokens.len());
    for token in tokens {
        let degree = Degree::parse(token.as_ref())?;
        notes.push(degree.pitch_class(root));
    }
    debug!(
        "resolved {} degree tokens against root {} to {:?}",
        tokens.len(),
        root,
        notes
    );
    Ok(dedup_preserve_order(notes))
}
