//! Music-theory resolution and fretboard geometry for fretted string instruments.
//!
//! This crate turns three kinds of input - explicit note names, scale-degree
//! formulas against a root, or a cataloged scale name - into a deduplicated,
//! order-preserving sequence of pitch classes, then maps that sequence onto a
//! fretboard under an arbitrary tuning: equal-temperament fret spacing,
//! per-(string, fret) sounded pitch classes, inlay marker positions, and a
//! renderer-agnostic [`render::Diagram`] that front ends draw from.
//!
//! All operations are pure functions over caller-owned values; there is no
//! global mutable state and no I/O below the CLI layer.

#![warn(missing_docs)]

pub mod fretboard;
pub mod render;
pub mod theory;

pub use fretboard::{fret_positions, inlay_frets, match_positions, Tuning};
pub use render::Diagram;
pub use theory::pitch::PitchClass;
pub use theory::TheoryError;

/// Default vibrating string length, nut to bridge, in millimeters.
pub const DEFAULT_SCALE_LENGTH: f64 = 650.0;

/// Highest fret the tooling renders; callers clamp fret counts to [1, MAX_FRETS].
pub const MAX_FRETS: usize = 24;
