//! Segmentation of per-residue structure codes into strand and helix runs.

use std::collections::HashSet;

use super::geometry::distance;
use crate::model::residue::StructureCode;
use crate::model::segment::{Helix, Segment, SegmentKind, Segmentation, Strand};
use crate::model::structure::Structure;

/// Largest residue-numbering gap tolerated inside one helix run.
pub const HELIX_MAX_GAP: i32 = 5;

/// Helix runs whose end-to-start Cα distance is within this are merged (Å).
pub const HELIX_MERGE_DISTANCE: f64 = 5.0;

/// Splits every chain of `structure` into strand and helix runs.
///
/// Strands extend only on a +1 numbering step. Helices extend across gaps of
/// up to [`HELIX_MAX_GAP`] and are afterwards merged across any sequence gap
/// when spatially contiguous (see [`merge_helices`]). Output is grouped by
/// chain in the structure's chain order, each chain sorted by start.
pub fn segment(structure: &Structure) -> Segmentation {
    let mut strands = Vec::new();
    let mut helices = Vec::new();

    for &chain in structure.chains() {
        let (chain_strands, chain_helices) = segment_chain(structure, chain);
        strands.extend(chain_strands);
        helices.extend(chain_helices);
    }

    let helices = merge_helices(structure, helices);

    let segmentation = Segmentation {
        strands: dedup(strands),
        helices: dedup(helices),
    };

    tracing::debug!(
        strands = segmentation.strands.len(),
        helices = segmentation.helices.len(),
        "segmentation complete"
    );

    segmentation
}

fn segment_chain(structure: &Structure, chain: char) -> (Vec<Strand>, Vec<Helix>) {
    let mut strand_runs: Vec<Vec<usize>> = Vec::new();
    let mut helix_runs: Vec<Vec<usize>> = Vec::new();
    let mut current_strand: Vec<usize> = Vec::new();
    let mut current_helix: Vec<usize> = Vec::new();

    for idx in structure.chain_residues(chain) {
        let number = structure.number(idx);
        match structure.residues()[idx].code {
            StructureCode::Strand => {
                if let Some(&last) = current_strand.last() {
                    if number != structure.number(last) + 1 {
                        strand_runs.push(std::mem::take(&mut current_strand));
                    }
                }
                current_strand.push(idx);
            }
            StructureCode::Helix => {
                if let Some(&last) = current_helix.last() {
                    if number - structure.number(last) > HELIX_MAX_GAP {
                        helix_runs.push(std::mem::take(&mut current_helix));
                    }
                }
                current_helix.push(idx);
            }
            StructureCode::Coil => {}
        }
    }

    if !current_strand.is_empty() {
        strand_runs.push(current_strand);
    }
    if !current_helix.is_empty() {
        helix_runs.push(current_helix);
    }

    let strands = strand_runs
        .into_iter()
        .filter_map(|run| Segment::from_residues(SegmentKind::Strand, structure, run))
        .collect();
    let helices = helix_runs
        .into_iter()
        .filter_map(|run| Segment::from_residues(SegmentKind::Helix, structure, run))
        .collect();

    (strands, helices)
}

/// Merges helix runs of the same chain whose end-to-start Cα distance is at
/// most [`HELIX_MERGE_DISTANCE`], regardless of the sequence gap.
///
/// Runs are sorted by start and swept repeatedly until no consecutive pair
/// within a chain is mergeable.
pub fn merge_helices(structure: &Structure, helices: Vec<Helix>) -> Vec<Helix> {
    let mut chains: Vec<char> = Vec::new();
    for h in &helices {
        if !chains.contains(&h.chain) {
            chains.push(h.chain);
        }
    }

    let mut merged = Vec::with_capacity(helices.len());
    for chain in chains {
        let mut runs: Vec<Helix> = helices.iter().filter(|h| h.chain == chain).cloned().collect();
        loop {
            runs.sort_by_key(|h| h.start);
            let before = runs.len();
            runs = merge_pass(structure, runs);
            if runs.len() == before {
                break;
            }
        }
        merged.extend(runs);
    }

    merged
}

fn merge_pass(structure: &Structure, runs: Vec<Helix>) -> Vec<Helix> {
    let mut out = Vec::with_capacity(runs.len());
    let mut iter = runs.into_iter();
    let Some(mut current) = iter.next() else {
        return out;
    };

    for next in iter {
        let gap = distance(current.last_position(structure), next.first_position(structure));
        if gap <= HELIX_MERGE_DISTANCE {
            tracing::debug!(
                chain = %current.chain,
                first = %current.range(),
                second = %next.range(),
                distance = gap,
                "merging spatially contiguous helices"
            );
            current = union(structure, current, next);
        } else {
            out.push(current);
            current = next;
        }
    }
    out.push(current);
    out
}

fn union(structure: &Structure, a: Helix, b: Helix) -> Helix {
    let mut residues = a.residues;
    residues.extend(b.residues);
    residues.sort_by_key(|&i| structure.number(i));
    residues.dedup();
    Helix {
        kind: SegmentKind::Helix,
        chain: a.chain,
        start: structure.number(residues[0]),
        end: structure.number(residues[residues.len() - 1]),
        residues,
    }
}

fn dedup(segments: Vec<Segment>) -> Vec<Segment> {
    let mut seen = HashSet::new();
    segments
        .into_iter()
        .filter(|s| seen.insert((s.chain, s.start, s.end)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::residue::{Residue, ResidueId};

    fn build(chain: char, rows: &[(i32, char, [f64; 3])]) -> Vec<Residue> {
        rows.iter()
            .map(|&(n, code, pos)| {
                Residue::new(
                    ResidueId::new(chain, n),
                    StructureCode::from_dssp(code),
                    'A',
                    pos,
                )
            })
            .collect()
    }

    fn far(n: i32) -> [f64; 3] {
        [100.0 * n as f64, 0.0, 0.0]
    }

    fn ranges(segments: &[Segment]) -> Vec<(char, i32, i32)> {
        segments.iter().map(|s| (s.chain, s.start, s.end)).collect()
    }

    #[test]
    fn strands_split_on_any_numbering_gap() {
        let rows: Vec<_> = [1, 2, 3, 5, 6]
            .iter()
            .map(|&n| (n, 'E', far(n)))
            .collect();
        let s = Structure::new(build('A', &rows));
        let seg = segment(&s);
        assert_eq!(ranges(&seg.strands), vec![('A', 1, 3), ('A', 5, 6)]);
        assert!(seg.helices.is_empty());
    }

    #[test]
    fn coil_between_strand_residues_breaks_the_run() {
        let s = Structure::new(build(
            'A',
            &[(1, 'E', far(1)), (2, 'T', far(2)), (3, 'E', far(3))],
        ));
        assert_eq!(ranges(&segment(&s).strands), vec![('A', 1, 1), ('A', 3, 3)]);
    }

    #[test]
    fn helices_tolerate_small_gaps() {
        let rows: Vec<_> = [1, 2, 3, 7, 8, 20, 21]
            .iter()
            .map(|&n| (n, 'H', far(n)))
            .collect();
        let s = Structure::new(build('A', &rows));
        assert_eq!(ranges(&segment(&s).helices), vec![('A', 1, 8), ('A', 20, 21)]);
    }

    #[test]
    fn helices_merge_when_spatially_contiguous() {
        let s = Structure::new(build(
            'A',
            &[
                (1, 'H', [0.0, 0.0, 0.0]),
                (2, 'H', [1.5, 0.0, 0.0]),
                (30, 'G', [4.0, 0.0, 0.0]),
                (31, 'G', [5.5, 0.0, 0.0]),
                (60, 'I', [50.0, 0.0, 0.0]),
            ],
        ));
        let seg = segment(&s);
        assert_eq!(ranges(&seg.helices), vec![('A', 1, 31), ('A', 60, 60)]);
        assert_eq!(seg.helices[0].len(), 4);
    }

    #[test]
    fn helices_of_different_chains_never_merge() {
        let mut residues = build('A', &[(1, 'H', [0.0, 0.0, 0.0]), (2, 'H', [1.0, 0.0, 0.0])]);
        residues.extend(build('B', &[(1, 'H', [2.0, 0.0, 0.0]), (2, 'H', [3.0, 0.0, 0.0])]));
        let s = Structure::new(residues);
        assert_eq!(ranges(&segment(&s).helices), vec![('A', 1, 2), ('B', 1, 2)]);
    }

    #[test]
    fn chains_follow_structure_order() {
        let mut residues = build('B', &[(5, 'E', far(1)), (6, 'E', far(2))]);
        residues.extend(build('A', &[(1, 'E', far(3))]));
        let s = Structure::new(residues);
        assert_eq!(ranges(&segment(&s).strands), vec![('B', 5, 6), ('A', 1, 1)]);
    }

    #[test]
    fn empty_structure_yields_no_elements() {
        let seg = segment(&Structure::default());
        assert!(seg.strands.is_empty());
        assert!(seg.helices.is_empty());
    }

    #[test]
    fn dedup_removes_repeated_ranges() {
        let s = Structure::new(build('A', &[(1, 'H', far(1)), (2, 'H', far(2))]));
        let h = segment(&s).helices;
        let doubled = dedup(vec![h[0].clone(), h[0].clone()]);
        assert_eq!(doubled.len(), 1);
    }
}
