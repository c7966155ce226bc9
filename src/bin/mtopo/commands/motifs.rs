use std::io::Write;

use anyhow::{Context, Result, bail};

use mtase_topology::{Motif, Session};

use crate::cli::MotifsArgs;
use crate::config::build_analysis_config;
use crate::display::{Context as DisplayContext, Progress, print_motifs};
use crate::io::{create_output, input_label, read_structure, stdin_is_tty};

const TOTAL_STEPS: u8 = 2;

pub fn run_motifs(args: MotifsArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mtopo motifs <INPUT> or pipe a DSSP file via stdin."
        );
    }

    let config = build_analysis_config(&args.analysis)?;
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let input = args.io.input.as_deref();
    let structure = read_structure(input)?;
    progress.complete(&[format!(
        "Parse DSSP residue table ← {}",
        input_label(input)
    )]);

    progress.step("Locating catalytic motifs");
    let session = Session::new(&structure, config).context("Failed to set up the analysis")?;
    let motifs: Vec<Motif> = session
        .motifs()
        .into_iter()
        .filter(|m| args.chain.is_none_or(|c| m.chain == c))
        .collect();
    progress.complete(&[
        format!("Scan {} pattern(s)", session.config().motif_patterns.len()),
        format!("{} motif(s) with a preceding strand", motifs.len()),
    ]);

    if ctx.interactive {
        print_motifs(&motifs);
    } else {
        let mut writer = create_output(None)?;
        for motif in &motifs {
            writeln!(writer, "{}", motif_line(motif))?;
        }
        writer.flush()?;
    }

    progress.finish();

    Ok(())
}

/// Tab-separated: chain, motif, anchor, S4 range, global strand index.
fn motif_line(motif: &Motif) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        motif.chain, motif.text, motif.anchor, motif.strand_range, motif.strand
    )
}
