use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use mtase_topology::AnalysisConfig;

use crate::cli::AnalysisOptions;

/// Layers the threshold file (if any) and explicit flags over the defaults.
pub fn build_analysis_config(opts: &AnalysisOptions) -> Result<AnalysisConfig> {
    let mut config = match &opts.config {
        Some(path) => load_config_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(v) = opts.contact_distance {
        config.contact_distance = v;
    }
    if let Some(v) = opts.helix_radius {
        config.helix_radius = v;
    }
    if let Some(v) = opts.max_loop {
        config.max_loop = v;
    }
    if let Some(v) = opts.min_helix_length {
        config.min_helix_length = v;
    }
    if !opts.motifs.is_empty() {
        config.motif_patterns = opts.motifs.clone();
    }

    config.validate().context("Invalid analysis thresholds")?;
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    AnalysisConfig::from_toml(&text)
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options() -> AnalysisOptions {
        AnalysisOptions {
            config: None,
            contact_distance: None,
            helix_radius: None,
            max_loop: None,
            min_helix_length: None,
            motifs: Vec::new(),
        }
    }

    #[test]
    fn no_flags_gives_defaults() {
        assert_eq!(build_analysis_config(&options()).unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn flags_override_and_motifs_replace_defaults() {
        let opts = AnalysisOptions {
            contact_distance: Some(6.0),
            max_loop: Some(8),
            motifs: vec!["DPPW".to_string()],
            ..options()
        };
        let config = build_analysis_config(&opts).unwrap();
        assert_eq!(config.contact_distance, 6.0);
        assert_eq!(config.max_loop, 8);
        assert_eq!(config.helix_radius, 20.0);
        assert_eq!(config.motif_patterns, vec!["DPPW"]);
    }

    #[test]
    fn flags_override_the_config_file() {
        let path = std::env::temp_dir().join(format!("mtopo-config-{}.toml", std::process::id()));
        fs::write(&path, "helix_radius = 12.0\nmin_helix_length = 6\n").unwrap();

        let opts = AnalysisOptions {
            config: Some(path.clone()),
            min_helix_length: Some(3),
            ..options()
        };
        let config = build_analysis_config(&opts);
        let _ = fs::remove_file(&path);

        let config = config.unwrap();
        assert_eq!(config.helix_radius, 12.0);
        assert_eq!(config.min_helix_length, 3);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let opts = AnalysisOptions {
            helix_radius: Some(-1.0),
            ..options()
        };
        assert!(build_analysis_config(&opts).is_err());

        let opts = AnalysisOptions {
            config: Some(PathBuf::from("/nonexistent/mtopo.toml")),
            ..options()
        };
        let err = build_analysis_config(&opts).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
