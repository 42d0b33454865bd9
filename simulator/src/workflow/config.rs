use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use lidarcore::prelude::FilterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Rotation speed used until a scan reports its own, in degrees per second.
    pub speed_deg_s: f64,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .filter
            .validate()
            .with_context(|| format!("validating filter section of {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(speed_deg_s: f64, seed: u64, filter_enabled: bool) -> Self {
        Self {
            speed_deg_s,
            filter: FilterConfig {
                enabled: filter_enabled,
                ..Default::default()
            },
            generator: GeneratorConfig {
                speed_deg_s,
                seed,
                ..Default::default()
            },
        }
    }

    pub fn to_filter_config(&self) -> FilterConfig {
        self.filter.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_speed_and_seed() {
        let cfg = WorkflowConfig::from_args(3000.0, 9, true);
        assert_eq!(cfg.generator.speed_deg_s, 3000.0);
        assert_eq!(cfg.generator.seed, 9);
        assert_eq!(cfg.to_filter_config(), FilterConfig::default());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"speed_deg_s: 2400\nfilter:\n  confidence_low: 30\ngenerator:\n  noise_specks: 4\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.speed_deg_s, 2400.0);
        assert_eq!(cfg.filter.confidence_low, 30);
        assert_eq!(cfg.filter.confidence_single, 220);
        assert_eq!(cfg.generator.noise_specks, 4);
    }

    #[test]
    fn config_load_rejects_zero_scan_frequency() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"speed_deg_s: 3600\nfilter:\n  scan_frequency: 0\n")
            .unwrap();
        let path = temp.into_temp_path();
        assert!(WorkflowConfig::load(&path).is_err());
    }
}
