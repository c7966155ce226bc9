use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::residue::ResidueId;
use super::segment::ResidueRange;

/// Canonical topological strand name `S{n}`; `S4` is the catalytic strand.
///
/// Numbers may run to zero or below (`S0`, `S-1`) on long N-terminal arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandName(pub i32);

impl StrandName {
    pub const CATALYTIC: StrandName = StrandName(4);

    #[inline]
    pub fn number(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StrandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl Serialize for StrandName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Orientation of a strand relative to the catalytic strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// Pairing of a strand with its predecessor along the sheet path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BondType {
    Edge,
    Parallel,
    Antiparallel,
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondType::Edge => write!(f, "Edge"),
            BondType::Parallel => write!(f, "Parallel"),
            BondType::Antiparallel => write!(f, "Antiparallel"),
        }
    }
}

/// Side of the sheet a helix packs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// Short label used in helix names: `Hu` above the sheet, `Hd` below.
    pub fn label(self) -> &'static str {
        match self {
            Side::Up => "Hu",
            Side::Down => "Hd",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalytic-motif hit anchored to its candidate catalytic strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Motif {
    /// Matched amino-acid text.
    pub text: String,
    /// Pattern that produced the match.
    pub pattern: String,
    /// Residue at the first matched position.
    pub anchor: ResidueId,
    pub chain: char,
    /// Global index of the candidate catalytic strand.
    pub strand: usize,
    /// Residue range of the candidate catalytic strand.
    pub strand_range: ResidueRange,
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} (S4 {} [strand {}])",
            self.text, self.anchor, self.strand_range, self.strand
        )
    }
}

/// Closest Cα pair between S4 and S3 used to orient the frame's `east` axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrandPairing {
    pub s4_residue: i32,
    pub s3_residue: i32,
    pub distance: f64,
}

/// Per-chain orthonormal basis anchored at the catalytic strand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateFrame {
    pub chain: char,
    /// Centroid of S4.
    pub origin: [f64; 3],
    /// S4 N→C direction.
    pub north: [f64; 3],
    /// From S4 towards S3.
    pub east: [f64; 3],
    /// Sign-inverted `north × east`.
    pub up: [f64; 3],
    pub s4: usize,
    pub s3: usize,
    /// `None` when `east` fell back to the centroid-to-centroid direction.
    pub pairing: Option<StrandPairing>,
}

impl CoordinateFrame {
    /// Expresses `point` as `[east, north, up]` components relative to the origin.
    pub fn to_local(&self, point: [f64; 3]) -> [f64; 3] {
        let d = [
            point[0] - self.origin[0],
            point[1] - self.origin[1],
            point[2] - self.origin[2],
        ];
        let dot = |a: &[f64; 3]| a[0] * d[0] + a[1] * d[1] + a[2] * d[2];
        [dot(&self.east), dot(&self.north), dot(&self.up)]
    }
}

/// One named strand of the analysed sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrandRecord {
    pub local_index: usize,
    pub global_index: usize,
    pub name: StrandName,
    pub range: ResidueRange,
    pub direction: Direction,
    pub bond: BondType,
    pub in_path: bool,
    /// Start residues of classified helices above this strand.
    pub helices_above: Vec<i32>,
    /// Start residues of classified helices below this strand.
    pub helices_below: Vec<i32>,
}

/// Side classification of one helix relative to the chain frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelixAssignment {
    pub range: ResidueRange,
    pub side: Side,
    /// Signed projection of (helix centroid − nearest strand centroid) on `up`.
    pub projection: f64,
    /// Centroid distance to the nearest path strand.
    pub distance: f64,
    pub nearest_strand: StrandName,
    pub nearest_index: usize,
    pub sub_index: Option<u8>,
    pub display_name: String,
}

impl HelixAssignment {
    #[inline]
    pub fn start(&self) -> i32 {
        self.range.start
    }

    /// Unsigned height above or below the sheet.
    #[inline]
    pub fn height(&self) -> f64 {
        self.projection.abs()
    }

    pub fn label(&self) -> String {
        format!("{} ({}) [{:.1} Å]", self.display_name, self.range, self.distance)
    }
}

/// Kind of an entry in the N→C linear topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Strand,
    Helix,
}

/// One element of the N→C linear topology string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearElement {
    pub kind: ElementKind,
    pub start: i32,
    pub label: String,
}

impl fmt::Display for LinearElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Complete outcome of one (chain, motif) topology analysis.
///
/// Strand indices (`full_path`, `s3`, `s4`, `s5`, `names` keys) are local to
/// the chain; `strand_map[local]` gives the global strand index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyResult {
    pub chain: char,
    pub motif: Motif,
    pub strand_map: Vec<usize>,
    pub strand_ranges: Vec<ResidueRange>,
    pub full_path: Vec<usize>,
    pub s4: usize,
    pub s3: usize,
    pub s5: Option<usize>,
    pub names: BTreeMap<usize, StrandName>,
    pub name_map: BTreeMap<StrandName, ResidueRange>,
    pub strands: Vec<StrandRecord>,
    pub frame: CoordinateFrame,
    pub helices: Vec<HelixAssignment>,
}

impl TopologyResult {
    #[inline]
    pub fn s4_range(&self) -> ResidueRange {
        self.strand_ranges[self.s4]
    }

    pub fn name_of(&self, local: usize) -> Option<StrandName> {
        self.names.get(&local).copied()
    }

    pub fn helix(&self, start: i32) -> Option<&HelixAssignment> {
        self.helices.iter().find(|h| h.start() == start)
    }

    pub fn helix_sides(&self) -> BTreeMap<i32, Side> {
        self.helices.iter().map(|h| (h.start(), h.side)).collect()
    }

    pub fn helix_distances(&self) -> BTreeMap<i32, f64> {
        self.helices.iter().map(|h| (h.start(), h.distance)).collect()
    }

    pub fn helix_nearest_strands(&self) -> BTreeMap<i32, StrandName> {
        self.helices
            .iter()
            .map(|h| (h.start(), h.nearest_strand))
            .collect()
    }

    /// Path strands and classified helices ordered N→C by start residue.
    pub fn linear_topology(&self) -> Vec<LinearElement> {
        let mut elements: Vec<LinearElement> = self
            .helices
            .iter()
            .map(|h| LinearElement {
                kind: ElementKind::Helix,
                start: h.start(),
                label: format!("{}[{}] ({:.1} Å)", h.display_name, h.range, h.distance),
            })
            .collect();

        for record in self.strands.iter().filter(|r| r.in_path) {
            elements.push(LinearElement {
                kind: ElementKind::Strand,
                start: record.range.start,
                label: format!(
                    "{}({})[{}]",
                    record.name,
                    record.direction.arrow(),
                    record.range
                ),
            });
        }

        elements.sort_by_key(|e| e.start);
        elements
    }

    /// Linear topology joined into a single line.
    pub fn linear_topology_string(&self) -> String {
        self.linear_topology()
            .iter()
            .map(|e| e.label.as_str())
            .collect::<Vec<_>>()
            .join(" — ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_name_display_and_order() {
        assert_eq!(StrandName(4).to_string(), "S4");
        assert_eq!(StrandName(0).to_string(), "S0");
        assert_eq!(StrandName(-1).to_string(), "S-1");
        let mut names = vec![StrandName(5), StrandName(-1), StrandName(3)];
        names.sort();
        assert_eq!(names, vec![StrandName(-1), StrandName(3), StrandName(5)]);
    }

    #[test]
    fn labels() {
        assert_eq!(Side::Up.label(), "Hu");
        assert_eq!(Side::Down.to_string(), "Hd");
        assert_eq!(Direction::Up.to_string(), "UP");
        assert_eq!(Direction::Down.arrow(), '↓');
        assert_eq!(BondType::Antiparallel.to_string(), "Antiparallel");
    }

    #[test]
    fn frame_to_local_uses_east_north_up() {
        let frame = CoordinateFrame {
            chain: 'A',
            origin: [1.0, 1.0, 1.0],
            north: [0.0, 1.0, 0.0],
            east: [1.0, 0.0, 0.0],
            up: [0.0, 0.0, -1.0],
            s4: 0,
            s3: 1,
            pairing: None,
        };
        assert_eq!(frame.to_local([3.0, 4.0, 6.0]), [2.0, 3.0, -5.0]);
    }

    #[test]
    fn helix_label_and_height() {
        let h = HelixAssignment {
            range: ResidueRange { start: 20, end: 27 },
            side: Side::Down,
            projection: -7.25,
            distance: 10.04,
            nearest_strand: StrandName(4),
            nearest_index: 0,
            sub_index: Some(2),
            display_name: "Hd2".into(),
        };
        assert_eq!(h.height(), 7.25);
        assert_eq!(h.label(), "Hd2 (20-27) [10.0 Å]");
    }
}
