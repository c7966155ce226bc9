//! Core data structures for structures, secondary-structure elements and
//! topology results.
//!
//! - [`residue`] – Residue identity, structure code and Cα position.
//! - [`structure`] – The immutable residue table (Structure Store).
//! - [`segment`] – Strand and helix elements produced by segmentation.
//! - [`topology`] – Motifs, coordinate frames, strand names and helix sides.
//!
//! The model separates raw residue data ([`Structure`]) from inferred topology
//! ([`TopologyResult`]); the [`crate::analysis`] pipeline turns one into the
//! other without mutating the store.
//!
//! [`Structure`]: structure::Structure
//! [`TopologyResult`]: topology::TopologyResult

pub mod residue;
pub mod segment;
pub mod structure;
pub mod topology;
