use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fretboard::render::{Diagram, DiagramOptions};
use fretboard::theory::pitch::PitchClass;
use fretboard::theory::resolve::{split_tokens, Selection};
use fretboard::theory::scales::scale_names;
use fretboard::theory::TheoryError;
use fretboard::{Tuning, DEFAULT_SCALE_LENGTH, MAX_FRETS};

/// Map scales, chords and degree formulas onto a fretboard
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the drawing subcommands.
#[derive(clap::Args, Debug)]
struct DisplayArgs {
    /// Number of frets to show (clamped to 1-24)
    #[arg(long, default_value_t = 12)]
    frets: usize,

    /// Tuning low-to-high, e.g. "E A D G B E"
    #[arg(long, default_value = "E A D G B E")]
    tuning: String,

    /// Spell black-key notes as flats instead of sharps
    #[arg(long)]
    flats: bool,

    /// Scale length in millimeters
    #[arg(long, default_value_t = DEFAULT_SCALE_LENGTH)]
    scale_length: f64,

    /// Mirror the view for left-handed players
    #[arg(long)]
    left_handed: bool,

    /// Emit the diagram model as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plot explicit note names, e.g. `notes C E G`
    Notes {
        /// Note names; commas and whitespace both separate tokens
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Root note; defaults to the first resolved note
        #[arg(long)]
        root: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Plot degree tokens against a root, e.g. `degrees 1 b3 5 --root A`
    Degrees {
        /// Degree tokens like 1, b3, #4, x4, R
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Root note the degrees are measured from
        #[arg(long)]
        root: String,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Generate and plot a cataloged scale, e.g. `scale A dorian`
    Scale {
        /// Root note of the scale
        root: String,

        /// Catalog name; see `scales` for the full list
        name: String,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// List all cataloged scale names
    Scales,
}

/// Re-splits CLI tokens so quoted comma/space-separated lists also work.
fn flatten_tokens(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| split_tokens(arg))
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Scales => {
            for name in scale_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Notes {
            tokens,
            root,
            display,
        } => {
            let selection = Selection::Notes(flatten_tokens(&tokens));
            let root = root.as_deref().map(PitchClass::parse).transpose()?;
            draw(selection, root, display)
        }
        Commands::Degrees {
            tokens,
            root,
            display,
        } => {
            let root = PitchClass::parse(&root)?;
            let selection = Selection::Degrees {
                tokens: flatten_tokens(&tokens),
                root,
            };
            draw(selection, Some(root), display)
        }
        Commands::Scale {
            root,
            name,
            display,
        } => {
            let root = PitchClass::parse(&root)?;
            let selection = Selection::Scale { root, name };
            draw(selection, Some(root), display)
        }
    }
}

fn draw(selection: Selection, root: Option<PitchClass>, display: DisplayArgs) -> Result<()> {
    let notes = selection.resolve()?;
    let root = match root {
        Some(pc) => pc,
        None => *notes.first().ok_or(TheoryError::EmptyInput)?,
    };

    let tuning = Tuning::parse(&display.tuning)?;
    let opts = DiagramOptions {
        fret_count: display.frets.clamp(1, MAX_FRETS),
        scale_length: display.scale_length,
        prefer_flats: display.flats,
        left_handed: display.left_handed,
    };

    let diagram = Diagram::build(&tuning, &notes, root, &opts);

    if display.json {
        println!("{}", serde_json::to_string_pretty(&diagram)?);
    } else {
        diagram.write_text(&mut io::stdout().lock())?;
    }

    Ok(())
}
