mod adjacency;
mod config;
mod error;
mod frame;
mod geometry;
mod helix;
mod motif;
mod segmenter;
mod view;
mod walker;

#[cfg(test)]
mod fixtures;

pub use adjacency::{AdjacencyGraph, min_distance};
pub use config::{AnalysisConfig, DEFAULT_MOTIF_PATTERNS};
pub use error::Error;
pub use frame::{PAIRING_CUTOFF, build_frame};
pub use helix::{attach_contacts, classify, display_name, helix_number};
pub use motif::{MotifLocator, preceding_strand};
pub use segmenter::{HELIX_MAX_GAP, HELIX_MERGE_DISTANCE, merge_helices, segment};
pub use view::ChainView;
pub use walker::{
    Naming, SheetTopology, bond_types, direction, expand_arm, expand_path, name_strands, pairing,
    walk,
};

use crate::model::segment::Segmentation;
use crate::model::structure::Structure;
use crate::model::topology::{Motif, TopologyResult};

/// Analysis state for one loaded structure.
///
/// Segmentation, the compiled motif patterns and the whole-structure contact
/// graph are computed once. Every [`Session::analyze`] call works on its own
/// [`ChainView`], so analyses never observe each other.
#[derive(Debug, Clone)]
pub struct Session<'s> {
    structure: &'s Structure,
    config: AnalysisConfig,
    locator: MotifLocator,
    segmentation: Segmentation,
    graph: AdjacencyGraph,
}

impl<'s> Session<'s> {
    /// Validates `config`, compiles its motif patterns and segments `structure`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] or [`Error::InvalidPattern`].
    pub fn new(structure: &'s Structure, config: AnalysisConfig) -> Result<Self, Error> {
        config.validate()?;
        let locator = MotifLocator::new(&config.motif_patterns, config.max_loop)?;
        let segmentation = segment(structure);
        let graph = AdjacencyGraph::build(structure, &segmentation.strands, config.contact_distance);

        tracing::info!(
            residues = structure.len(),
            chains = structure.chains().len(),
            strands = segmentation.strands.len(),
            helices = segmentation.helices.len(),
            "structure segmented"
        );

        Ok(Self {
            structure,
            config,
            locator,
            segmentation,
            graph,
        })
    }

    pub fn structure(&self) -> &'s Structure {
        self.structure
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn segmentation(&self) -> &Segmentation {
        &self.segmentation
    }

    /// Contact graph over every strand of the structure (global indices).
    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Catalytic motifs with a qualifying preceding strand, in pattern order.
    pub fn motifs(&self) -> Vec<Motif> {
        self.locator.locate(self.structure, &self.segmentation.strands)
    }

    /// Chain-scoped view used by [`Session::analyze`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoChainData`] if `chain` has no strands.
    pub fn chain_view(&self, chain: char) -> Result<ChainView<'_>, Error> {
        ChainView::new(
            self.structure,
            &self.segmentation,
            chain,
            self.config.contact_distance,
        )
    }

    /// Runs one (chain, motif) topology analysis.
    ///
    /// # Errors
    ///
    /// Any structural failure aborts the whole analysis: [`Error::NoChainData`],
    /// [`Error::MissingAnchorStrand`], [`Error::NoCounterStrand`],
    /// [`Error::OutOfRangeIndex`] or [`Error::DegenerateFrame`].
    pub fn analyze(&self, motif: &Motif) -> Result<TopologyResult, Error> {
        let view = self.chain_view(motif.chain)?;
        let s4 = view.anchor(motif.strand)?;

        let mut sheet = walk(&view, s4)?;
        let frame = build_frame(&view, sheet.s4, sheet.s3)?;
        let helices = classify(
            &view,
            &sheet,
            &frame,
            self.config.min_helix_length,
            self.config.helix_radius,
        );
        attach_contacts(&view, &mut sheet.strands, &helices, self.config.helix_radius);

        tracing::info!(
            chain = %motif.chain,
            motif = %motif.text,
            anchor = %motif.anchor,
            strands = sheet.names.len(),
            helices = helices.len(),
            "topology resolved"
        );

        Ok(TopologyResult {
            chain: view.chain,
            motif: motif.clone(),
            strand_map: view.global.clone(),
            strand_ranges: view.strands.iter().map(|s| s.range()).collect(),
            full_path: sheet.full_path,
            s4: sheet.s4,
            s3: sheet.s3,
            s5: sheet.s5,
            names: sheet.names,
            name_map: sheet.name_map,
            strands: sheet.strands,
            frame,
            helices,
        })
    }

    /// Analyzes every located motif, pairing each with its outcome.
    pub fn analyze_all(&self) -> Vec<(Motif, Result<TopologyResult, Error>)> {
        self.motifs()
            .into_iter()
            .map(|motif| {
                let outcome = self.analyze(&motif);
                (motif, outcome)
            })
            .collect()
    }
}

/// Locates every catalytic motif of `structure` and resolves its sheet topology.
///
/// Motifs whose analysis aborts are logged and left out of the result.
///
/// # Errors
///
/// Returns an error only for an invalid configuration or motif pattern.
pub fn analyze(structure: &Structure, config: &AnalysisConfig) -> Result<Vec<TopologyResult>, Error> {
    let session = Session::new(structure, config.clone())?;

    let mut results = Vec::new();
    for (motif, outcome) in session.analyze_all() {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!(
                    chain = %motif.chain,
                    motif = %motif.text,
                    anchor = %motif.anchor,
                    error = %e,
                    "motif analysis aborted"
                );
            }
        }
    }

    Ok(results)
}
