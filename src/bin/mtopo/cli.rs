use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mtopo",
    about = "Beta-sheet topology of Rossmann-fold methyltransferases",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Name the sheet strands and classify helices around each catalytic motif
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// List catalytic motifs and their candidate S4 strands
    #[command(visible_alias = "m")]
    Motifs(MotifsArgs),
}

impl Command {
    pub fn io(&self) -> &IoOptions {
        match self {
            Command::Analyze(args) => &args.io,
            Command::Motifs(args) => &args.io,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// DSSP file (stdin if omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Suppress banner, progress and report tables (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Thresholds shared by all commands; unset flags keep the config file or
/// built-in value.
#[derive(Args)]
#[command(next_help_heading = "Analysis Thresholds")]
pub struct AnalysisOptions {
    /// Threshold file (TOML); flags given explicitly override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Strand contact distance (Å) [default: 5.2]
    #[arg(long = "contact-distance", value_name = "Å")]
    pub contact_distance: Option<f64>,

    /// Maximum helix-to-sheet centroid distance (Å) [default: 20.0]
    #[arg(long = "helix-radius", value_name = "Å")]
    pub helix_radius: Option<f64>,

    /// Maximum loop between S4 and the motif (residues) [default: 5]
    #[arg(long = "max-loop", value_name = "N")]
    pub max_loop: Option<i32>,

    /// Minimum helix length to classify (residues) [default: 4]
    #[arg(long = "min-helix-length", value_name = "N")]
    pub min_helix_length: Option<usize>,

    /// Motif regular expression, repeatable; replaces the default set
    #[arg(long = "motif", value_name = "REGEX", action = clap::ArgAction::Append)]
    pub motifs: Vec<String>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Only report motifs on this chain
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<char>,

    /// Write results as JSON to FILE ('-' for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub analysis: AnalysisOptions,
}

#[derive(Args)]
pub struct MotifsArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Only list motifs on this chain
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<char>,

    #[command(flatten)]
    pub analysis: AnalysisOptions,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_flags_parse() {
        let cli = Cli::try_parse_from([
            "mtopo",
            "a",
            "1abc.dssp",
            "--chain",
            "B",
            "--json",
            "-",
            "--motif",
            "DPPY",
            "--motif",
            "NPP[YF]",
            "--helix-radius",
            "18",
            "-vv",
        ])
        .unwrap();

        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.io.input, Some(PathBuf::from("1abc.dssp")));
        assert_eq!(args.io.verbose, 2);
        assert_eq!(args.chain, Some('B'));
        assert_eq!(args.json, Some(PathBuf::from("-")));
        assert_eq!(args.analysis.motifs, vec!["DPPY", "NPP[YF]"]);
        assert_eq!(args.analysis.helix_radius, Some(18.0));
        assert_eq!(args.analysis.contact_distance, None);
    }

    #[test]
    fn motifs_reads_stdin_by_default() {
        let cli = Cli::try_parse_from(["mtopo", "motifs", "-q"]).unwrap();
        assert!(cli.command.io().input.is_none());
        assert!(cli.command.io().quiet);
    }
}
