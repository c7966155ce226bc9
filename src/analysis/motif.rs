//! Catalytic-motif search and anchoring to the preceding strand.

use regex::Regex;

use super::error::Error;
use crate::model::segment::Strand;
use crate::model::structure::Structure;
use crate::model::topology::Motif;

/// Compiled motif patterns.
#[derive(Debug, Clone)]
pub struct MotifLocator {
    patterns: Vec<Regex>,
    max_loop: i32,
}

impl MotifLocator {
    /// Compiles `patterns`; `max_loop` bounds the motif–strand loop length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that fails to
    /// compile.
    pub fn new<S: AsRef<str>>(patterns: &[S], max_loop: i32) -> Result<Self, Error> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| Error::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns, max_loop })
    }

    /// Scans the full sequence with every pattern in order.
    ///
    /// Each match is anchored at its first residue. Matches without a
    /// qualifying preceding strand are dropped.
    pub fn locate(&self, structure: &Structure, strands: &[Strand]) -> Vec<Motif> {
        let mut motifs = Vec::new();

        for pattern in &self.patterns {
            let mut hits = 0usize;
            for m in pattern.find_iter(structure.sequence()) {
                hits += 1;
                let Some(anchor) = structure.residue_at(m.start()) else {
                    continue;
                };
                let anchor = anchor.id;

                let Some(strand) = preceding_strand(strands, anchor.chain, anchor.number, self.max_loop)
                else {
                    tracing::debug!(
                        pattern = pattern.as_str(),
                        text = m.as_str(),
                        residue = %anchor,
                        "no preceding strand within loop bound; motif skipped"
                    );
                    continue;
                };

                tracing::debug!(
                    pattern = pattern.as_str(),
                    text = m.as_str(),
                    residue = %anchor,
                    strand,
                    "motif anchored"
                );

                motifs.push(Motif {
                    text: m.as_str().to_string(),
                    pattern: pattern.as_str().to_string(),
                    anchor,
                    chain: anchor.chain,
                    strand,
                    strand_range: strands[strand].range(),
                });
            }

            if hits == 0 {
                tracing::debug!(pattern = pattern.as_str(), "motif pattern matched nothing");
            }
        }

        motifs
    }
}

/// Index of the strand of `chain` whose last residue number is the largest
/// value below `residue`, provided the gap is at most `max_loop + 1`.
pub fn preceding_strand(strands: &[Strand], chain: char, residue: i32, max_loop: i32) -> Option<usize> {
    let (idx, end) = strands
        .iter()
        .enumerate()
        .filter(|(_, s)| s.chain == chain && s.end < residue)
        .map(|(i, s)| (i, s.end))
        .min_by_key(|&(i, end)| (std::cmp::Reverse(end), i))?;

    (residue - end <= max_loop + 1).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::segmenter::segment;
    use crate::model::residue::{Residue, ResidueId, StructureCode};

    fn structure(chain: char, seq: &str, strand: &[i32]) -> Vec<Residue> {
        seq.chars()
            .enumerate()
            .map(|(i, aa)| {
                let n = i as i32 + 1;
                let code = if strand.contains(&n) {
                    StructureCode::Strand
                } else {
                    StructureCode::Coil
                };
                Residue::new(ResidueId::new(chain, n), code, aa, [n as f64 * 3.8, 0.0, 0.0])
            })
            .collect()
    }

    #[test]
    fn anchors_motif_to_nearest_preceding_strand() {
        let s = Structure::new(structure('A', "AAADPPYAAA", &[1, 2, 3]));
        let seg = segment(&s);
        let locator = MotifLocator::new(&["[SND]PP[YFW]"], 5).unwrap();
        let motifs = locator.locate(&s, &seg.strands);

        assert_eq!(motifs.len(), 1);
        let m = &motifs[0];
        assert_eq!(m.text, "DPPY");
        assert_eq!(m.anchor, ResidueId::new('A', 4));
        assert_eq!(m.chain, 'A');
        assert_eq!(m.strand, 0);
        assert_eq!(m.strand_range.end, 3);
    }

    #[test]
    fn drops_motif_beyond_loop_bound() {
        let s = Structure::new(structure('A', "AAAAAAAAAAADPPY", &[1, 2, 3]));
        let seg = segment(&s);
        let locator = MotifLocator::new(&["DPPY"], 5).unwrap();
        assert!(locator.locate(&s, &seg.strands).is_empty());

        let relaxed = MotifLocator::new(&["DPPY"], 8).unwrap();
        assert_eq!(relaxed.locate(&s, &seg.strands).len(), 1);
    }

    #[test]
    fn drops_motif_without_any_preceding_strand() {
        let s = Structure::new(structure('A', "DPPYAAAA", &[6, 7]));
        let seg = segment(&s);
        let locator = MotifLocator::new(&["DPPY"], 5).unwrap();
        assert!(locator.locate(&s, &seg.strands).is_empty());
    }

    #[test]
    fn picks_closest_strand_of_the_same_chain() {
        let mut residues = structure('A', "AAAAAAAA", &[1, 2, 5, 6]);
        residues.extend(structure('B', "ANPPWAAA", &[1]));
        let s = Structure::new(residues);
        let seg = segment(&s);
        let locator = MotifLocator::new(&["[SND]PP[YFW]"], 5).unwrap();
        let motifs = locator.locate(&s, &seg.strands);

        assert_eq!(motifs.len(), 1);
        assert_eq!(motifs[0].chain, 'B');
        assert_eq!(motifs[0].anchor, ResidueId::new('B', 2));
        assert_eq!(seg.strands[motifs[0].strand].chain, 'B');
    }

    #[test]
    fn preceding_strand_respects_bounds() {
        let s = Structure::new(structure('A', "AAAAAAAAAA", &[1, 2, 5, 6]));
        let seg = segment(&s);
        assert_eq!(preceding_strand(&seg.strands, 'A', 7, 5), Some(1));
        assert_eq!(preceding_strand(&seg.strands, 'A', 5, 5), Some(0));
        assert_eq!(preceding_strand(&seg.strands, 'A', 12, 5), Some(1));
        assert_eq!(preceding_strand(&seg.strands, 'A', 13, 5), None);
        assert_eq!(preceding_strand(&seg.strands, 'A', 1, 5), None);
        assert_eq!(preceding_strand(&seg.strands, 'B', 7, 5), None);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = MotifLocator::new(&["[SND"], 5).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "[SND"));
    }
}
