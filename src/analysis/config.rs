//! Caller-settable analysis thresholds.

use serde::Deserialize;

use super::error::Error;

/// Default catalytic-motif patterns: motif IV (`[SND]PP[YFW]` and its
/// `PL` variant) and the short `P[CSP]` motif.
pub const DEFAULT_MOTIF_PATTERNS: [&str; 2] = ["[SND]P[PL][YFW]", "P[CSP]"];

/// Configuration for topology analysis.
///
/// Missing TOML keys fall back to the defaults.
///
/// # Examples
///
/// ```
/// use mtase_topology::AnalysisConfig;
///
/// let config = AnalysisConfig::from_toml("contact_distance = 5.5").unwrap();
/// assert_eq!(config.contact_distance, 5.5);
/// assert_eq!(config.max_loop, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Two strands are adjacent when their closest Cα pair is below this (Å).
    pub contact_distance: f64,

    /// Helices whose centroid is farther than this from every path strand
    /// centroid are not classified (Å).
    pub helix_radius: f64,

    /// Maximum loop length between a motif and its preceding strand.
    pub max_loop: i32,

    /// Minimum number of residues for a helix to be classified.
    pub min_helix_length: usize,

    /// Regular expressions scanned over the full sequence.
    pub motif_patterns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            contact_distance: 5.2,
            helix_radius: 20.0,
            max_loop: 5,
            min_helix_length: 4,
            motif_patterns: DEFAULT_MOTIF_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Parses a (possibly partial) TOML document.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.contact_distance.is_finite() && self.contact_distance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "contact_distance must be a positive number (got {})",
                self.contact_distance
            )));
        }
        if !(self.helix_radius.is_finite() && self.helix_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "helix_radius must be a positive number (got {})",
                self.helix_radius
            )));
        }
        if self.max_loop < 0 {
            return Err(Error::InvalidConfig(format!(
                "max_loop must not be negative (got {})",
                self.max_loop
            )));
        }
        if self.motif_patterns.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one motif pattern is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.contact_distance, 5.2);
        assert_eq!(config.helix_radius, 20.0);
        assert_eq!(config.max_loop, 5);
        assert_eq!(config.min_helix_length, 4);
        assert_eq!(config.motif_patterns, vec!["[SND]P[PL][YFW]", "P[CSP]"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml(
            r#"
            helix_radius = 15.0
            motif_patterns = ["DPPY"]
            "#,
        )
        .unwrap();
        assert_eq!(config.helix_radius, 15.0);
        assert_eq!(config.contact_distance, 5.2);
        assert_eq!(config.motif_patterns, vec!["DPPY"]);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            AnalysisConfig::from_toml("contact = 1.0"),
            Err(Error::ConfigParse(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("contact_distance = -1.0"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("motif_patterns = []"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("max_loop = -2"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
