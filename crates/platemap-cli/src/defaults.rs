//! Built-in analysis defaults with an optional `platemap.toml` override
//!
//! The core treats radius, cell size, and gap thresholds as required
//! arguments; the defaults live here in the presentation layer. Precedence
//! is flag > file > built-in.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULTS_FILE: &str = "platemap.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Proximity search radius in meters
    pub radius_m: f64,

    /// Grid cell size in degrees (~1.1 km at 0.01)
    pub cell_size_deg: f64,

    /// Minimum records per cell for gap detection
    pub gap_min_count: u32,

    /// Mean rating threshold for gap detection
    pub gap_max_rating: f64,

    /// Size of the citywide top-cuisine ranking
    pub top_cuisines: usize,

    /// Bin edges for the price distribution
    pub price_bins: Vec<f64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            radius_m: 300.0,
            cell_size_deg: 0.01,
            gap_min_count: 3,
            gap_max_rating: 3.5,
            top_cuisines: 10,
            price_bins: vec![0.0, 500.0, 1000.0, 1500.0, 2000.0, 5000.0],
        }
    }
}

impl Defaults {
    /// Load defaults, applying `platemap.toml` from the working directory
    /// when present
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULTS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid defaults file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_defaults_match_the_dashboard() {
        let defaults = Defaults::default();
        assert_eq!(defaults.radius_m, 300.0);
        assert_eq!(defaults.cell_size_deg, 0.01);
        assert_eq!(defaults.gap_min_count, 3);
        assert_eq!(defaults.gap_max_rating, 3.5);
    }

    #[test]
    fn file_overrides_only_the_keys_it_sets() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "radius_m = 500.0\ngap_min_count = 5").unwrap();

        let defaults = Defaults::load_from(file.path()).unwrap();
        assert_eq!(defaults.radius_m, 500.0);
        assert_eq!(defaults.gap_min_count, 5);
        assert_eq!(defaults.cell_size_deg, 0.01);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "radius = 500.0").unwrap();
        assert!(Defaults::load_from(file.path()).is_err());
    }
}
