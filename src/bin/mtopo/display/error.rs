use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        collector.collect_io_hints(err);
        collector.collect_analysis_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use mtase_topology::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { line, .. } => {
                self.add(format!("The DSSP record on line {line} could not be read"));
                self.add("Cα coordinates are expected in columns 116-138");
                self.add("Check that the file was not re-wrapped or hand-edited");
            }

            IoError::MissingHeader => {
                self.add("Input does not look like a classic DSSP file");
                self.add("Expected a residue table header containing '  #  RESIDUE'");
                self.add("Generate one with `mkdssp --output-format dssp`");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("Input is not valid UTF-8 text");
                self.add("Decompress gzipped DSSP files before reading them");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_analysis_hints(&mut self, err: &Error) {
        use mtase_topology::AnalysisError;

        let Some(analysis_err) = err.downcast_ref::<AnalysisError>() else {
            return;
        };

        self.mark_typed();

        match analysis_err {
            AnalysisError::NoChainData { chain } => {
                self.add(format!("Chain {chain} has no residues assigned 'E' by DSSP"));
                self.add("Use --chain to restrict the analysis to another chain");
            }

            AnalysisError::MissingAnchorStrand { .. } | AnalysisError::OutOfRangeIndex { .. } => {
                self.add("Strand indices disagree with the chain's segmentation");
                self.add("This may indicate a bug; please report it with the input file");
            }

            AnalysisError::NoCounterStrand { .. } => {
                self.add("The catalytic strand has no neighbour to name S3");
                self.add("Try raising --contact-distance (default 5.2 Å)");
                self.add("Check that the motif really follows the catalytic strand");
            }

            AnalysisError::DegenerateFrame { .. } => {
                self.add("The catalytic strand is too short or overlaps S3 in space");
                self.add("Inspect the strand assignment around the motif");
            }

            AnalysisError::InvalidPattern { pattern, .. } => {
                self.add(format!("'{pattern}' is not a valid regular expression"));
                self.add("Motif patterns use Rust regex syntax, e.g. [SND]P[PL][YFW]");
            }

            AnalysisError::InvalidConfig(_) => {
                self.add("Distances must be positive and finite; --max-loop not negative");
                self.add("At least one motif pattern is required");
            }

            AnalysisError::ConfigParse(_) => {
                self.add("The threshold file is not valid TOML or has unknown keys");
                self.add(
                    "Known keys: contact_distance, helix_radius, max_loop, min_helix_length, motif_patterns",
                );
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Pass a DSSP file as INPUT or pipe one to stdin");
            return;
        }

        if msg.contains("no catalytic motif") {
            self.add("Add patterns with --motif or raise --max-loop");
            self.add("Run `mtopo motifs` to see which motifs are found");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = err.to_string();

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn io_errors_get_dssp_hints() {
        let err = Err::<(), _>(mtase_topology::io::Error::MissingHeader)
            .context("Failed to read DSSP input: stdin")
            .unwrap_err();
        let hints = HintCollector::collect(&err);
        assert!(hints.iter().any(|h| h.contains("mkdssp")));
    }

    #[test]
    fn analysis_errors_get_threshold_hints() {
        let err = anyhow::Error::new(mtase_topology::AnalysisError::NoCounterStrand {
            chain: 'A',
            strand: 0,
        });
        let hints = HintCollector::collect(&err);
        assert!(hints.iter().any(|h| h.contains("--contact-distance")));
    }

    #[test]
    fn untyped_errors_fall_back_to_message_hints() {
        let err = anyhow::anyhow!("No catalytic motif found in chain A");
        let hints = HintCollector::collect(&err);
        assert!(hints.iter().any(|h| h.contains("--motif")));

        let err = anyhow::anyhow!("something unrelated");
        assert!(HintCollector::collect(&err).is_empty());
    }
}
