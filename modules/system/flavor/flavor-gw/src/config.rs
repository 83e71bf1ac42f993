//! Configuration for the flavor gateway.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for gateway settings, e.g. `FLAVOR_GW__HEALTHY_TIMEOUT_MS`.
pub const ENV_PREFIX: &str = "FLAVOR_GW__";

/// Flavor gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlavorGwConfig {
    /// Ceiling for `validate` and `prepare` calls.
    pub call_timeout_ms: u64,

    /// Ceiling for `healthy` calls. Exceeding it yields `Unknown`.
    pub healthy_timeout_ms: u64,

    /// Ceiling for `drain` calls. Exceeding it yields a drain failure.
    pub drain_timeout_ms: u64,
}

impl Default for FlavorGwConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 30_000,
            healthy_timeout_ms: 5_000,
            drain_timeout_ms: 60_000,
        }
    }
}

impl FlavorGwConfig {
    /// Loads configuration from defaults, an optional YAML file, then the environment.
    ///
    /// Later sources override earlier ones.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but missing, the file cannot be
    /// parsed, or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        Self::from_figment(&figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts configuration from an existing figment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong type or an unknown key is present.
    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("call_timeout_ms", self.call_timeout_ms),
            ("healthy_timeout_ms", self.healthy_timeout_ms),
            ("drain_timeout_ms", self.drain_timeout_ms),
        ] {
            if value == 0 {
                anyhow::bail!("{name} must be greater than zero");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    #[must_use]
    pub fn healthy_timeout(&self) -> Duration {
        Duration::from_millis(self.healthy_timeout_ms)
    }

    #[must_use]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_sources() {
        let figment = Figment::from(Serialized::defaults(FlavorGwConfig::default()));
        let cfg = FlavorGwConfig::from_figment(&figment).unwrap();

        assert_eq!(cfg, FlavorGwConfig::default());
        assert_eq!(cfg.healthy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn yaml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(FlavorGwConfig::default()))
            .merge(Yaml::string("healthy_timeout_ms: 250\ndrain_timeout_ms: 1000\n"));
        let cfg = FlavorGwConfig::from_figment(&figment).unwrap();

        assert_eq!(cfg.healthy_timeout_ms, 250);
        assert_eq!(cfg.drain_timeout_ms, 1000);
        assert_eq!(cfg.call_timeout_ms, 30_000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let figment = Figment::from(Serialized::defaults(FlavorGwConfig::default()))
            .merge(Yaml::string("healthy_timeout: 250\n"));
        assert!(FlavorGwConfig::from_figment(&figment).is_err());
    }

    #[test]
    fn zero_ceilings_are_rejected() {
        let figment = Figment::from(Serialized::defaults(FlavorGwConfig::default()))
            .merge(Yaml::string("call_timeout_ms: 0\n"));
        let err = FlavorGwConfig::from_figment(&figment).unwrap_err();
        assert!(err.to_string().contains("call_timeout_ms"));
    }

    #[test]
    fn load_layers_file_then_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"healthy_timeout_ms: 250\ndrain_timeout_ms: 1000\n")
            .unwrap();

        let cfg = temp_env::with_var("FLAVOR_GW__DRAIN_TIMEOUT_MS", Some("1234"), || {
            FlavorGwConfig::load(Some(file.path())).unwrap()
        });

        assert_eq!(cfg.healthy_timeout_ms, 250);
        assert_eq!(cfg.drain_timeout_ms, 1234);
        assert_eq!(cfg.call_timeout_ms, 30_000);
    }

    #[test]
    fn load_with_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("flavor-gw.yaml");
        assert!(FlavorGwConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let cfg = FlavorGwConfig::load(None).unwrap();
        assert!(cfg.drain_timeout_ms > 0);
    }
}
