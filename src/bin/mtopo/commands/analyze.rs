use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use mtase_topology::{AnalysisError, Motif, Session, TopologyResult};

use crate::cli::AnalyzeArgs;
use crate::config::build_analysis_config;
use crate::display::{Context as DisplayContext, Progress, print_structure_info, print_topology};
use crate::io::{create_output, input_label, is_stdout_path, read_structure, stdin_is_tty};

pub fn run_analyze(args: AnalyzeArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mtopo analyze <INPUT> or pipe a DSSP file via stdin."
        );
    }

    let config = build_analysis_config(&args.analysis)?;
    let total_steps = if args.json.is_some() { 3 } else { 2 };
    let mut progress = Progress::new(ctx.interactive, total_steps);

    progress.step("Reading structure");
    let input = args.io.input.as_deref();
    let structure = read_structure(input)?;
    progress.complete(&[
        format!("Parse DSSP residue table ← {}", input_label(input)),
        format!(
            "{} residues on {} chain(s)",
            structure.len(),
            structure.chains().len()
        ),
    ]);

    progress.step("Resolving sheet topology");
    let session = Session::new(&structure, config).context("Failed to set up the analysis")?;
    let outcomes: Vec<(Motif, Result<TopologyResult, AnalysisError>)> = session
        .analyze_all()
        .into_iter()
        .filter(|(motif, _)| args.chain.is_none_or(|c| motif.chain == c))
        .collect();

    if outcomes.is_empty() {
        match args.chain {
            Some(chain) => bail!("No catalytic motif with a preceding strand found in chain {chain}"),
            None => bail!("No catalytic motif with a preceding strand found"),
        }
    }

    let (results, failures) = split_outcomes(outcomes);
    if results.is_empty() {
        if let Some((motif, e)) = failures.into_iter().next() {
            return Err(anyhow::Error::new(e).context(format!(
                "Topology analysis failed for motif {} on chain {}",
                motif.text, motif.chain
            )));
        }
    } else {
        progress.complete(&resolve_substeps(&session, &results, &failures));
    }

    if ctx.interactive {
        print_structure_info(&session);
        for result in &results {
            print_topology(result);
        }
    }

    let json_to_stdout = args.json.as_deref().is_some_and(is_stdout_path);
    if let Some(path) = &args.json {
        progress.step("Writing output");
        write_json(&results, path)?;
        progress.complete(&[format!("Write JSON → {}", output_label(path))]);
    }
    if !ctx.interactive && !json_to_stdout {
        write_summary(&results)?;
    }

    progress.finish();

    Ok(())
}

fn split_outcomes(
    outcomes: Vec<(Motif, Result<TopologyResult, AnalysisError>)>,
) -> (Vec<TopologyResult>, Vec<(Motif, AnalysisError)>) {
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for (motif, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!(
                    chain = %motif.chain,
                    motif = %motif.text,
                    anchor = %motif.anchor,
                    error = %e,
                    "motif skipped"
                );
                failures.push((motif, e));
            }
        }
    }

    (results, failures)
}

fn resolve_substeps(
    session: &Session<'_>,
    results: &[TopologyResult],
    failures: &[(Motif, AnalysisError)],
) -> Vec<String> {
    let segmentation = session.segmentation();
    let mut steps = vec![
        format!(
            "Segment {} strands, {} helices",
            segmentation.strands.len(),
            segmentation.helices.len()
        ),
        format!(
            "Contact graph: {} edges < {:.1} Å",
            session.graph().edge_count(),
            session.config().contact_distance
        ),
    ];

    for result in results {
        steps.push(format!(
            "Chain {} · {} at {} → {} strands, {} helices",
            result.chain,
            result.motif.text,
            result.motif.anchor,
            result.name_map.len(),
            result.helices.len()
        ));
    }
    for (motif, e) in failures {
        steps.push(format!("Skip {} at {}: {}", motif.text, motif.anchor, e));
    }

    steps
}

fn write_json(results: &[TopologyResult], path: &Path) -> Result<()> {
    let mut writer = create_output(Some(path))?;
    serde_json::to_writer_pretty(&mut writer, results).context("Failed to write JSON results")?;
    writeln!(writer)?;
    writer.flush().context("Failed to write JSON results")?;
    Ok(())
}

/// One tab-separated line per result: chain, motif, anchor, linear topology.
fn write_summary(results: &[TopologyResult]) -> Result<()> {
    let mut writer = create_output(None)?;
    for result in results {
        writeln!(writer, "{}", summary_line(result))?;
    }
    writer.flush()?;
    Ok(())
}

fn summary_line(result: &TopologyResult) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        result.chain,
        result.motif.text,
        result.motif.anchor,
        result.linear_topology_string()
    )
}

fn output_label(path: &Path) -> String {
    if is_stdout_path(path) {
        "stdout".to_string()
    } else {
        input_label(Some(path))
    }
}
