use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid residue identifier: '{0}' (expected CHAIN:NUMBER)")]
pub struct ParseResidueIdError(String);

/// Identity of a residue: chain identifier plus author residue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResidueId {
    pub chain: char,
    pub number: i32,
}

impl ResidueId {
    pub fn new(chain: char, number: i32) -> Self {
        Self { chain, number }
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.number)
    }
}

impl FromStr for ResidueId {
    type Err = ParseResidueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseResidueIdError(s.to_string());
        let (chain, number) = s.split_once(':').ok_or_else(err)?;
        let mut chars = chain.chars();
        let chain = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(err()),
        };
        let number = number.trim().parse::<i32>().map_err(|_| err())?;
        Ok(Self { chain, number })
    }
}

/// Secondary-structure class of a residue, collapsed to the three families
/// the topology analysis distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum StructureCode {
    Strand,
    Helix,
    #[default]
    Coil,
}

impl StructureCode {
    /// Maps a DSSP one-letter code.
    ///
    /// `E` is a strand; `H`, `G` and `I` (alpha, 3-10 and pi helices) are
    /// helices; everything else, including isolated bridges (`B`), is coil.
    pub fn from_dssp(code: char) -> Self {
        match code {
            'E' => StructureCode::Strand,
            'H' | 'G' | 'I' => StructureCode::Helix,
            _ => StructureCode::Coil,
        }
    }
}

impl fmt::Display for StructureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureCode::Strand => write!(f, "Strand"),
            StructureCode::Helix => write!(f, "Helix"),
            StructureCode::Coil => write!(f, "Coil"),
        }
    }
}

/// A single residue row of the structure table.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub id: ResidueId,
    pub code: StructureCode,
    pub amino_acid: char,
    /// Cα position in Ångströms.
    pub position: [f64; 3],
}

impl Residue {
    pub fn new(id: ResidueId, code: StructureCode, amino_acid: char, position: [f64; 3]) -> Self {
        Self {
            id,
            code,
            amino_acid,
            position,
        }
    }

    #[inline]
    pub fn chain(&self) -> char {
        self.id.chain
    }

    #[inline]
    pub fn number(&self) -> i32 {
        self.id.number
    }
}
