use std::collections::HashMap;

use super::residue::{Residue, ResidueId};

/// Immutable residue table of one loaded structure.
///
/// Residues keep their load order, which also defines the chain-concatenated
/// one-letter sequence scanned for motifs. Each sequence byte offset maps to
/// the residue at the same index.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    residues: Vec<Residue>,
    index: HashMap<ResidueId, usize>,
    sequence: String,
    chains: Vec<char>,
}

impl Structure {
    /// Builds the store from residues in load order.
    ///
    /// A residue whose `(chain, number)` was already seen is dropped; the
    /// first occurrence wins. Amino-acid letters that are not ASCII letters
    /// are stored as `X`.
    pub fn new(residues: impl IntoIterator<Item = Residue>) -> Self {
        let mut store = Self::default();

        for mut residue in residues {
            if store.index.contains_key(&residue.id) {
                tracing::warn!(residue = %residue.id, "duplicate residue record skipped");
                continue;
            }
            if !residue.amino_acid.is_ascii_alphabetic() {
                residue.amino_acid = 'X';
            }
            if !store.chains.contains(&residue.id.chain) {
                store.chains.push(residue.id.chain);
            }
            store.index.insert(residue.id, store.residues.len());
            store.sequence.push(residue.amino_acid);
            store.residues.push(residue);
        }

        store
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
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Residue stored at `idx` (load order, equal to the sequence offset).
    #[inline]
    pub fn residue_at(&self, idx: usize) -> Option<&Residue> {
        self.residues.get(idx)
    }

    pub fn residue(&self, id: &ResidueId) -> Option<&Residue> {
        self.index.get(id).map(|&i| &self.residues[i])
    }

    pub fn index_of(&self, id: &ResidueId) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn position(&self, idx: usize) -> [f64; 3] {
        self.residues[idx].position
    }

    #[inline]
    pub fn number(&self, idx: usize) -> i32 {
        self.residues[idx].id.number
    }

    /// Chain-concatenated one-letter sequence in load order.
    #[inline]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Chain identifiers in first-seen order.
    #[inline]
    pub fn chains(&self) -> &[char] {
        &self.chains
    }

    /// Indices of the residues of `chain`, sorted by residue number.
    pub fn chain_residues(&self, chain: char) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .residues
            .iter()
            .enumerate()
            .filter(|(_, r)| r.id.chain == chain)
            .map(|(i, _)| i)
            .collect();
        indices.sort_by_key(|&i| self.residues[i].id.number);
        indices
    }

    /// Returns a copy of the store with every Cα position mapped through `f`.
    pub fn transformed(&self, f: impl Fn([f64; 3]) -> [f64; 3]) -> Self {
        let mut copy = self.clone();
        for residue in &mut copy.residues {
            residue.position = f(residue.position);
        }
        copy
    }
}
