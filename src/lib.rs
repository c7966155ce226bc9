//! Beta-sheet topology inference for Rossmann-fold methyltransferases.
//!
//! Starting from a residue table with per-residue secondary-structure codes
//! and Cα coordinates, the library locates the catalytic motif, names every
//! strand of the core sheet with the canonical S1…S7 convention, builds a
//! local coordinate frame on the catalytic strand (S4), and classifies each
//! nearby helix as lying above (`Hu`) or below (`Hd`) the sheet.
//!
//! # Features
//!
//! - **Segmentation** — Strand and helix runs per chain, with spatially
//!   contiguous helix runs merged across sequence gaps
//! - **Motif anchoring** — Regex scan of the full sequence; each hit is tied to
//!   the nearest preceding strand within a bounded loop
//! - **Strand naming** — Greedy path expansion over the strand contact graph
//!   and deterministic S1…S7 (S0, S-1, …) naming around S4
//! - **Helix sides** — Orthonormal north/east/up frame on S4 and per-helix
//!   side, height, nearest strand and positional number (`Hu2`, `Hd1`, …)
//! - **DSSP input** — Reader for the classic fixed-column DSSP format
//!
//! # Quick Start
//!
//! The main entry point is the [`analyze`] function, which takes a
//! [`Structure`] and an [`AnalysisConfig`] and returns one [`TopologyResult`]
//! per located motif:
//!
//! ```
//! use mtase_topology::{AnalysisConfig, Residue, ResidueId, Structure, StructureCode, analyze};
//!
//! // Two parallel strands 4.8 Å apart followed by a DPPY motif.
//! let mut residues = Vec::new();
//! for (start, x) in [(1, 0.0), (20, 4.8)] {
//!     for j in 0..5 {
//!         residues.push(Residue::new(
//!             ResidueId::new('A', start + j),
//!             StructureCode::Strand,
//!             'V',
//!             [x, 3.3 * j as f64, 0.0],
//!         ));
//!     }
//! }
//! for (k, aa) in "DPPY".chars().enumerate() {
//!     let n = 6 + k as i32;
//!     residues.push(Residue::new(
//!         ResidueId::new('A', n),
//!         StructureCode::Coil,
//!         aa,
//!         [-20.0, n as f64, 0.0],
//!     ));
//! }
//!
//! let structure = Structure::new(residues);
//! let results = analyze(&structure, &AnalysisConfig::default())?;
//!
//! let first = &results[0];
//! assert_eq!(first.motif.text, "DPPY");
//! assert_eq!(first.s4_range().to_string(), "1-5");
//! assert_eq!(first.name_map.keys().map(|n| n.to_string()).collect::<Vec<_>>(), ["S3", "S4"]);
//! # Ok::<(), mtase_topology::AnalysisError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — DSSP reader
//! - [`analysis`] — Segmentation, motif search, contact graph, strand naming,
//!   coordinate frame and helix classification
//! - [`Session`] — One loaded structure analysed motif by motif
//!
//! # Data Types
//!
//! - [`Structure`] — Immutable residue table
//! - [`Residue`], [`ResidueId`], [`StructureCode`] — Per-residue records
//! - [`Segment`] — Strand or helix run ([`Strand`] / [`Helix`] aliases)
//! - [`Motif`] — Motif hit anchored to its candidate catalytic strand
//! - [`TopologyResult`] — Names, path, frame and helix assignments of one
//!   (chain, motif) analysis

pub mod analysis;
mod model;

pub mod io;

pub use model::residue::{ParseResidueIdError, Residue, ResidueId, StructureCode};
pub use model::segment::{Helix, ResidueRange, Segment, SegmentKind, Segmentation, Strand};
pub use model::structure::Structure;

pub use model::topology::{
    BondType, CoordinateFrame, Direction, ElementKind, HelixAssignment, LinearElement, Motif,
    Side, StrandName, StrandPairing, StrandRecord, TopologyResult,
};

pub use analysis::{AnalysisConfig, DEFAULT_MOTIF_PATTERNS, Session, analyze};

pub use analysis::Error as AnalysisError;
pub use io::read_dssp;
