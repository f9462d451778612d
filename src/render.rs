//! The renderer-agnostic diagram model.
//!
//! [`Diagram`] is the single rendering-input contract: fret boundary
//! positions, marker midpoints, inlay dots, tuning labels and matched
//! positions, all precomputed once. Coordinates are expressed in
//! scale-length units on x and string-index units on y; nothing here knows
//! about pixels, colors or fonts. The built-in consumer is the plain-text
//! writer used by the CLI; a graphical front end would consume the same
//! struct.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::fretboard::{fret_positions, inlay_frets, match_positions, Tuning};
use crate::theory::pitch::PitchClass;

/// How far left of the nut the open-string column sits, as a fraction of the
/// first fret's width.
const OPEN_COLUMN_OFFSET: f64 = 0.60;

/// Vertical offset of each dot in a double-dot inlay, in string spacings.
const DOUBLE_DOT_SPREAD: f64 = 0.45;

/// Options controlling diagram construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramOptions {
    /// Number of frets to draw; callers clamp to [1, [`crate::MAX_FRETS`]].
    pub fret_count: usize,
    /// Vibrating string length in the caller's physical unit.
    pub scale_length: f64,
    /// Spell black-key classes as flats instead of sharps.
    pub prefer_flats: bool,
    /// Mirror the string order for a left-handed view.
    pub left_handed: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            fret_count: 12,
            scale_length: crate::DEFAULT_SCALE_LENGTH,
            prefer_flats: false,
            left_handed: false,
        }
    }
}

/// A matched position with its display geometry and spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedNote {
    /// String index, 0 = lowest string.
    pub string: usize,
    /// Fret index, 0 = open string.
    pub fret: usize,
    /// Marker center along the neck.
    pub x: f64,
    /// Marker center across the neck, in string-index units.
    pub y: f64,
    /// Spelling under the diagram's display preference.
    pub label: String,
    /// True when this position sounds the designated root.
    pub is_root: bool,
}

/// An inlay marker with its dot coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlayMarker {
    /// The fret carrying the marker.
    pub fret: usize,
    /// Dot center along the neck (midpoint of the bounding frets).
    pub x: f64,
    /// One dot y for single markers, two for the octave frets.
    pub dot_ys: Vec<f64>,
    /// True at the octave frets (12 and 24).
    pub double_dot: bool,
}

/// Everything a renderer needs to draw one fretboard diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagram {
    /// One-line summary: notes, root and tuning.
    pub title: String,
    /// Number of drawn frets.
    pub fret_count: usize,
    /// Vibrating string length the x coordinates are derived from.
    pub scale_length: f64,
    /// Nut and fret boundary positions; index 0 is the nut at 0.0.
    pub fret_positions: Vec<f64>,
    /// Marker midpoints per fret; index 0 is the open-string column, left of
    /// the nut.
    pub marker_midpoints: Vec<f64>,
    /// Open-string spellings, lowest string first.
    pub string_labels: Vec<String>,
    /// Drawn y of each string index; reversed under the left-handed view.
    pub string_ys: Vec<f64>,
    /// Inlay markers visible on this neck.
    pub inlays: Vec<InlayMarker>,
    /// Matched positions, string-major, fret-minor.
    pub marks: Vec<MarkedNote>,
    /// Whether the view is mirrored for left-handed display.
    pub left_handed: bool,
    /// Whether spellings use flats.
    pub prefer_flats: bool,
}

impl Diagram {
    /// Builds the full diagram model for a resolved pitch-class set.
    pub fn build(
        tuning: &Tuning,
        notes: &[PitchClass],
        root: PitchClass,
        opts: &DiagramOptions,
    ) -> Diagram {
        let xs = fret_positions(opts.fret_count, opts.scale_length);
        let num_strings = tuning.len();

        let open_x = if xs.len() > 1 {
            xs[0] - OPEN_COLUMN_OFFSET * (xs[1] - xs[0])
        } else {
            0.0
        };
        let mut marker_midpoints = Vec::with_capacity(xs.len());
        marker_midpoints.push(open_x);
        for f in 1..xs.len() {
            marker_midpoints.push(0.5 * (xs[f - 1] + xs[f]));
        }

        let string_ys: Vec<f64> = (0..num_strings)
            .map(|i| {
                if opts.left_handed {
                    (num_strings - 1 - i) as f64
                } else {
                    i as f64
                }
            })
            .collect();

        let center_y = 0.5 * (num_strings.saturating_sub(1)) as f64;
        let inlays = inlay_frets(opts.fret_count)
            .into_iter()
            .map(|inlay| {
                let x = 0.5 * (xs[inlay.fret - 1] + xs[inlay.fret]);
                let dot_ys = if inlay.double_dot {
                    vec![center_y - DOUBLE_DOT_SPREAD, center_y + DOUBLE_DOT_SPREAD]
                } else {
                    vec![center_y]
                };
                InlayMarker {
                    fret: inlay.fret,
                    x,
                    dot_ys,
                    double_dot: inlay.double_dot,
                }
            })
            .collect();

        let marks = match_positions(tuning, opts.fret_count, notes, root)
            .into_iter()
            .map(|m| MarkedNote {
                string: m.string,
                fret: m.fret,
                x: marker_midpoints[m.fret],
                y: string_ys[m.string],
                label: m.pitch_class.name(opts.prefer_flats).to_string(),
                is_root: m.is_root,
            })
            .collect();

        let note_names: Vec<&str> = notes.iter().map(|n| n.name(opts.prefer_flats)).collect();
        let labels = tuning.labels(opts.prefer_flats);
        let title = format!(
            "Notes: {}  |  Root: {}  |  Tuning: {}",
            note_names.join(" "),
            root.name(opts.prefer_flats),
            labels.join(" ")
        );

        Diagram {
            title,
            fret_count: opts.fret_count,
            scale_length: opts.scale_length,
            fret_positions: xs,
            marker_midpoints,
            string_labels: labels.iter().map(|l| l.to_string()).collect(),
            string_ys,
            inlays,
            marks,
            left_handed: opts.left_handed,
            prefer_flats: opts.prefer_flats,
        }
    }

    fn mark_at(&self, string: usize, fret: usize) -> Option<&MarkedNote> {
        self.marks
            .iter()
            .find(|m| m.string == string && m.fret == fret)
    }

    /// Writes a tab-style text rendering of the diagram.
    ///
    /// One row per string, highest string on top (lowest on top under the
    /// left-handed view), followed by an inlay row and a fret-number row.
    /// Root positions are parenthesized.
    pub fn write_text(&self, w: &mut impl Write) -> io::Result<()> {
        const CELL_WIDTH: usize = 5;
        const OPEN_CELL_WIDTH: usize = 4;

        writeln!(w, "{}", self.title)?;
        writeln!(w)?;

        let num_strings = self.string_labels.len();
        let rows: Vec<usize> = if self.left_handed {
            (0..num_strings).collect()
        } else {
            (0..num_strings).rev().collect()
        };

        for string in rows {
            let open = match self.mark_at(string, 0) {
                Some(m) => cell_text(&m.label, m.is_root, OPEN_CELL_WIDTH, ' '),
                None => " ".repeat(OPEN_CELL_WIDTH),
            };
            write!(w, "{:>2} {}||", self.string_labels[string], open)?;
            for fret in 1..=self.fret_count {
                let cell = match self.mark_at(string, fret) {
                    Some(m) => cell_text(&m.label, m.is_root, CELL_WIDTH, '-'),
                    None => "-".repeat(CELL_WIDTH),
                };
                write!(w, "{}|", cell)?;
            }
            writeln!(w)?;
        }

        // Inlay row: '.' single dot, ':' octave double dot.
        write!(w, "{:9}", "")?;
        for fret in 1..=self.fret_count {
            let dot = match self.inlays.iter().find(|i| i.fret == fret) {
                Some(i) if i.double_dot => ":",
                Some(_) => ".",
                None => " ",
            };
            write!(w, "{:^width$} ", dot, width = CELL_WIDTH)?;
        }
        writeln!(w)?;

        write!(w, "{:9}", "")?;
        for fret in 1..=self.fret_count {
            write!(w, "{:^width$} ", fret, width = CELL_WIDTH)?;
        }
        writeln!(w)?;

        Ok(())
    }
}

/// Centers a note label (parenthesized for roots) in a cell of `width`,
/// padded with `fill`.
fn cell_text(label: &str, is_root: bool, width: usize, fill: char) -> String {
    let text = if is_root {
        format!("({})", label)
    } else {
        label.to_string()
    };
    let pad = width.saturating_sub(text.len());
    let left = pad / 2;
    let right = pad - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        text,
        fill.to_string().repeat(right)
    )
}
