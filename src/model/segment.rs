use serde::Serialize;

use super::structure::Structure;

/// Kind of a secondary-structure element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentKind {
    Strand,
    Helix,
}

/// A contiguous run of residues sharing one secondary-structure class.
///
/// `residues` holds indices into the owning [`Structure`], ordered by residue
/// number. `start` and `end` cache the first and last residue numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub chain: char,
    pub start: i32,
    pub end: i32,
    pub residues: Vec<usize>,
}

/// Beta-strand element.
pub type Strand = Segment;

/// Helix element (alpha, 3-10 or pi).
pub type Helix = Segment;

impl Segment {
    /// Creates a segment from a non-empty list of residue indices already
    /// ordered by residue number.
    ///
    /// Returns `None` for an empty list.
    pub fn from_residues(
        kind: SegmentKind,
        structure: &Structure,
        residues: Vec<usize>,
    ) -> Option<Self> {
        let first = *residues.first()?;
        let last = *residues.last()?;
        Some(Self {
            kind,
            chain: structure.residues()[first].chain(),
            start: structure.number(first),
            end: structure.number(last),
            residues,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    #[inline]
    pub fn range(&self) -> ResidueRange {
        ResidueRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn first_position(&self, structure: &Structure) -> [f64; 3] {
        structure.position(self.residues[0])
    }

    pub fn last_position(&self, structure: &Structure) -> [f64; 3] {
        structure.position(self.residues[self.residues.len() - 1])
    }

    pub fn positions<'a>(&'a self, structure: &'a Structure) -> impl Iterator<Item = [f64; 3]> + 'a {
        self.residues.iter().map(|&i| structure.position(i))
    }

    /// Vector from the first to the last residue's Cα.
    pub fn direction(&self, structure: &Structure) -> [f64; 3] {
        let a = self.first_position(structure);
        let b = self.last_position(structure);
        [b[0] - a[0], b[1] - a[1], b[2] - a[2]]
    }

    /// Unweighted centroid of the segment's Cα positions.
    pub fn centroid(&self, structure: &Structure) -> [f64; 3] {
        let mut sum = [0.0; 3];
        for p in self.positions(structure) {
            sum[0] += p[0];
            sum[1] += p[1];
            sum[2] += p[2];
        }
        let n = self.residues.len().max(1) as f64;
        [sum[0] / n, sum[1] / n, sum[2] / n]
    }
}

/// Inclusive residue-number range of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResidueRange {
    pub start: i32,
    pub end: i32,
}

impl std::fmt::Display for ResidueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Strands and helices of a whole structure, grouped by chain in the
/// structure's chain order.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub strands: Vec<Strand>,
    pub helices: Vec<Helix>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::residue::{Residue, ResidueId, StructureCode};

    fn line_structure() -> Structure {
        Structure::new((1..=4).map(|n| {
            Residue::new(
                ResidueId::new('A', n),
                StructureCode::Strand,
                'V',
                [0.0, 2.0 * n as f64, 0.0],
            )
        }))
    }

    #[test]
    fn from_residues_caches_range_and_chain() {
        let s = line_structure();
        let seg = Segment::from_residues(SegmentKind::Strand, &s, vec![1, 2, 3]).unwrap();
        assert_eq!(seg.chain, 'A');
        assert_eq!(seg.range(), ResidueRange { start: 2, end: 4 });
        assert_eq!(seg.range().to_string(), "2-4");
        assert!(Segment::from_residues(SegmentKind::Helix, &s, Vec::new()).is_none());
    }

    #[test]
    fn direction_and_centroid() {
        let s = line_structure();
        let seg = Segment::from_residues(SegmentKind::Strand, &s, vec![0, 1, 2, 3]).unwrap();
        assert_eq!(seg.direction(&s), [0.0, 6.0, 0.0]);
        assert_eq!(seg.centroid(&s), [0.0, 5.0, 0.0]);
    }
}
