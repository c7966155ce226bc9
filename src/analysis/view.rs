//! Chain-scoped, locally re-indexed view of the segmented structure.

use super::adjacency::AdjacencyGraph;
use super::error::Error;
use crate::model::segment::{Helix, Segmentation, Strand};
use crate::model::structure::Structure;

/// Strands, helices and contact graph of a single chain.
///
/// Built fresh for every analysis and never shared, so narrowing the global
/// state to one chain leaves nothing to restore afterwards.
#[derive(Debug, Clone)]
pub struct ChainView<'a> {
    pub structure: &'a Structure,
    pub chain: char,
    /// Chain strands; position in this vector is the local strand index.
    pub strands: Vec<&'a Strand>,
    /// `global[local]` is the strand's index in the whole segmentation.
    pub global: Vec<usize>,
    pub helices: Vec<&'a Helix>,
    pub graph: AdjacencyGraph,
}

impl<'a> ChainView<'a> {
    /// Filters `segmentation` to `chain` and builds the chain's contact graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoChainData`] if the chain has no strands.
    pub fn new(
        structure: &'a Structure,
        segmentation: &'a Segmentation,
        chain: char,
        contact_distance: f64,
    ) -> Result<Self, Error> {
        let (global, strands): (Vec<usize>, Vec<&Strand>) = segmentation
            .strands
            .iter()
            .enumerate()
            .filter(|(_, s)| s.chain == chain)
            .unzip();

        if strands.is_empty() {
            return Err(Error::NoChainData { chain });
        }

        let helices = segmentation
            .helices
            .iter()
            .filter(|h| h.chain == chain)
            .collect();

        let graph = AdjacencyGraph::build(structure, strands.iter().copied(), contact_distance);

        Ok(Self {
            structure,
            chain,
            strands,
            global,
            helices,
            graph,
        })
    }

    /// Local index of a global strand index, if it belongs to this chain.
    pub fn local_index(&self, global: usize) -> Option<usize> {
        self.global.iter().position(|&g| g == global)
    }

    /// Local index of the motif's catalytic strand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAnchorStrand`] if it is not a strand of this chain.
    pub fn anchor(&self, global: usize) -> Result<usize, Error> {
        self.local_index(global).ok_or(Error::MissingAnchorStrand {
            chain: self.chain,
            strand: global,
        })
    }
}
