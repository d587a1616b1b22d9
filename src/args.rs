//! Command-line parsing with `clap`, and the conversion from raw flag
//! strings to the typed [`Options`] the library wants.

use clap::Parser;
use std::path::PathBuf;

use crate::Options;

/// Returns the parsed command line: the file to sniff plus the [`Options`]
/// for the run.
#[must_use]
pub fn parsed() -> Args {
    let cli = CliArgs::parse();
    let options = Options {
        exclude: cli.exclude.iter().filter_map(|flag| separator_flag(flag)).collect(),
        include: cli.include.iter().filter_map(|flag| separator_flag(flag)).collect(),
        lucky: cli.lucky,
        trace: cli.trace,
    };
    Args { file: cli.file, options }
}

/// The parsed command line.
pub struct Args {
    /// The file whose separator we want.
    pub file: PathBuf,
    /// Everything else, ready for [`crate::detect`].
    pub options: Options,
}

#[derive(Debug, Parser)]
#[command(name = "sepsniff", version, about = "Guess the field separator of a delimited text file")]
struct CliArgs {
    /// The delimited file to examine
    file: PathBuf,

    /// Drop CHAR from the candidates (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "CHAR")]
    exclude: Vec<String>,

    /// Try CHAR as a candidate alongside the defaults (repeatable)
    #[arg(short = 'i', long = "include", value_name = "CHAR")]
    include: Vec<String>,

    /// Print the single most likely separator, or fail if the input leaves
    /// more than one possibility
    #[arg(short, long)]
    lucky: bool,

    /// Narrate every elimination and ranking decision on standard error
    #[arg(short, long)]
    trace: bool,
}

/// A separator flag only counts if it names exactly one character; anything
/// longer is dropped without comment, except the spelling `\t`, which stands
/// in for a literal tab.
fn separator_flag(flag: &str) -> Option<char> {
    if flag == r"\t" {
        return Some('\t');
    }
    let mut chars = flag.chars();
    match (chars.next(), chars.next()) {
        (Some(sep), None) => Some(sep),
        _ => None,
    }
}
