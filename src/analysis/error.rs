//! Error types for topology analysis.
//!
//! Structural failures abort a single (chain, motif) analysis; configuration
//! failures abort session construction. Motifs that match nothing or have no
//! preceding strand are not errors and are only reported as trace events.

use thiserror::Error;

/// Errors that can occur while analysing a structure.
#[derive(Debug, Error)]
pub enum Error {
    /// The motif's chain has no strands.
    #[error("chain {chain} contains no beta-strands")]
    NoChainData {
        /// Chain identifier.
        chain: char,
    },

    /// The candidate catalytic strand is not part of the motif's chain.
    #[error("catalytic strand {strand} is not a strand of chain {chain}")]
    MissingAnchorStrand {
        /// Chain identifier.
        chain: char,
        /// Global strand index carried by the motif.
        strand: usize,
    },

    /// Neither side of S4 yields a strand that can be named S3.
    #[error("no S3 strand could be determined next to S4 (local strand {strand}) in chain {chain}")]
    NoCounterStrand {
        /// Chain identifier.
        chain: char,
        /// Local index of S4.
        strand: usize,
    },

    /// A strand index used to build the coordinate frame is out of range.
    #[error("strand index {index} out of range for chain {chain} ({available} strands)")]
    OutOfRangeIndex {
        /// Chain identifier.
        chain: char,
        /// Offending local strand index.
        index: usize,
        /// Number of strands available in the chain.
        available: usize,
    },

    /// The coordinate frame axes cannot be normalized.
    ///
    /// Occurs for single-residue catalytic strands or coincident S3/S4
    /// geometry.
    #[error("degenerate coordinate frame for chain {chain}: {detail}")]
    DegenerateFrame {
        /// Chain identifier.
        chain: char,
        /// Which axis collapsed.
        detail: String,
    },

    /// A motif pattern failed to compile.
    #[error("invalid motif pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Configuration values are out of their valid domain.
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),

    /// Configuration TOML could not be parsed.
    #[error("failed to parse analysis configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// Creates an [`OutOfRangeIndex`](Error::OutOfRangeIndex) error.
    pub fn out_of_range(chain: char, index: usize, available: usize) -> Self {
        Self::OutOfRangeIndex {
            chain,
            index,
            available,
        }
    }

    /// Creates a [`DegenerateFrame`](Error::DegenerateFrame) error.
    pub fn degenerate_frame(chain: char, detail: impl Into<String>) -> Self {
        Self::DegenerateFrame {
            chain,
            detail: detail.into(),
        }
    }

    /// Returns `true` for failures that abort only one (chain, motif) analysis.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::NoChainData { .. }
                | Error::MissingAnchorStrand { .. }
                | Error::NoCounterStrand { .. }
                | Error::OutOfRangeIndex { .. }
                | Error::DegenerateFrame { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = Error::out_of_range('B', 7, 3);
        assert_eq!(
            e.to_string(),
            "strand index 7 out of range for chain B (3 strands)"
        );
        let e = Error::MissingAnchorStrand {
            chain: 'A',
            strand: 12,
        };
        assert_eq!(
            e.to_string(),
            "catalytic strand 12 is not a strand of chain A"
        );
    }

    #[test]
    fn structural_classification() {
        assert!(Error::NoChainData { chain: 'A' }.is_structural());
        assert!(Error::degenerate_frame('A', "north").is_structural());
        assert!(!Error::InvalidConfig("x".into()).is_structural());
    }
}
