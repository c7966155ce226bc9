//! Readers for secondary-structure assignment files.
//!
//! Only the DSSP classic fixed-column format is supported. Readers produce a
//! [`Structure`](crate::Structure) holding one Cα position, structure code and
//! amino-acid letter per residue.

pub mod error;

mod dssp {
    pub mod reader;
}

pub use dssp::reader::{HEADER_MARKER, read as read_dssp};
pub use error::Error;
