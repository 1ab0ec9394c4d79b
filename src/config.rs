use anyhow::{Context, Result};
use demand_response::{GeneratorConfig, ShiftPolicy};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub generator: GeneratorConfig,
    pub policy: ShiftPolicy,
}

impl DemoConfig {
    /// Load from an optional JSON file, then apply the command line seed.
    pub fn load(path: Option<&Path>, seed: Option<u64>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Some(seed) = seed {
            config.generator.seed = seed;
        }

        config.generator.validate()?;
        config.policy.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = DemoConfig::load(None, None).unwrap();
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.policy, ShiftPolicy::default());
    }

    #[test]
    fn test_seed_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"generator": {{"seed": 7}}, "policy": {{"peak_threshold": 95.0}}}}"#).unwrap();

        let from_file = DemoConfig::load(Some(file.path()), None).unwrap();
        assert_eq!(from_file.generator.seed, 7);
        assert_eq!(from_file.policy.peak_threshold, 95.0);
        assert_eq!(from_file.policy.shift_fraction, 0.1);

        let overridden = DemoConfig::load(Some(file.path()), Some(99)).unwrap();
        assert_eq!(overridden.generator.seed, 99);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"generator": {{"boost_start_hour": 30}}}}"#).unwrap();
        assert!(DemoConfig::load(Some(file.path()), None).is_err());

        assert!(DemoConfig::load(Some(Path::new("/nonexistent/dr_demo.json")), None).is_err());
    }
}
