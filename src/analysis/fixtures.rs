//! Synthetic seven-stranded Rossmann-like sheet shared by the analysis tests.
//!
//! Strands lie in the z = 0 plane, 4.8 Å apart along x, running along +y
//! (S7 runs along −y). Spatial order from x = 0 is S1 S2 S3 S4 S5 S6 S7 while
//! the residue numbering follows the canonical 4-3-5-2-1-6-7 order:
//!
//! | name | residues | x     |
//! |------|----------|-------|
//! | S4   | 10–14    | 14.4  |
//! | S3   | 30–34    | 9.6   |
//! | S5   | 50–54    | 19.2  |
//! | S2   | 70–74    | 4.8   |
//! | S1   | 90–94    | 0.0   |
//! | S6   | 110–114  | 24.0  |
//! | S7   | 130–134  | 28.8  |
//!
//! `DPPY` follows S4 at 15–18. Helix 20–27 sits 10 Å below the plane over S4
//! and helix 36–43 10 Å above it over S5; with S3 to the −x side the frame's
//! `up` is −z, so these are `Hu2` and `Hd1`. Helix 56–63 is far away and
//! helix 100–102 is too short to classify.

use crate::model::residue::{Residue, ResidueId, StructureCode};
use crate::model::structure::Structure;

/// Local strand indices ordered by x position (S1 … S7).
pub const SHEET_ORDER: [usize; 7] = [4, 3, 1, 0, 2, 5, 6];

/// (first residue, sheet position, runs along +y)
const STRANDS: [(i32, usize, bool); 7] = [
    (10, 3, true),
    (30, 2, true),
    (50, 4, true),
    (70, 1, true),
    (90, 0, true),
    (110, 5, true),
    (130, 6, false),
];

/// (first residue, length, sheet position, z)
const HELICES: [(i32, i32, f64, f64); 4] = [
    (20, 8, 3.0, -10.0),
    (36, 8, 4.0, 10.0),
    (56, 8, 62.5, 0.0),
    (100, 3, 2.0, 10.0),
];

const LAST_RESIDUE: i32 = 140;

fn sheet_x(position: f64) -> f64 {
    4.8 * position
}

/// Residue list of the synthetic sheet on chain `chain`.
pub fn rossmann_residues(chain: char) -> Vec<Residue> {
    let mut residues = Vec::new();

    for number in 1..=LAST_RESIDUE {
        let id = ResidueId::new(chain, number);
        let amino_acid = match number {
            15 => 'D',
            16 | 17 => 'P',
            18 => 'Y',
            _ => 'A',
        };

        let strand = STRANDS
            .iter()
            .find(|(start, _, _)| (*start..*start + 5).contains(&number));
        let helix = HELICES
            .iter()
            .find(|(start, len, _, _)| (*start..*start + len).contains(&number));

        let residue = match (strand, helix) {
            (Some(&(start, position, forward)), _) => {
                let j = (number - start) as f64;
                let y = if forward { 3.3 * j } else { 3.3 * (4.0 - j) };
                Residue::new(id, StructureCode::Strand, amino_acid, [sheet_x(position as f64), y, 0.0])
            }
            (None, Some(&(start, _, position, z))) => {
                let j = (number - start) as f64;
                Residue::new(id, StructureCode::Helix, amino_acid, [sheet_x(position), 1.5 * j, z])
            }
            (None, None) => Residue::new(
                id,
                StructureCode::Coil,
                amino_acid,
                [-100.0, 3.8 * number as f64, 50.0],
            ),
        };
        residues.push(residue);
    }

    residues
}

/// The synthetic sheet on chain `A`.
pub fn rossmann() -> Structure {
    Structure::new(rossmann_residues('A'))
}
