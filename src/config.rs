use std::{collections::BTreeMap, path::Path, time::Duration};

use serde::Deserialize;

use crate::{core::band::TimeBand, prelude::*};

/// TOML configuration file.
///
/// Re-read at the top of every cycle so that band and interval edits take
/// effect without a restart.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub evcc: EvccConfig,
    pub global: GlobalConfig,

    /// Named time bands, e.g. `[bands.morning]` and `[bands.afternoon]`.
    /// Any number of them is fine as long as they do not overlap.
    #[serde(default)]
    pub bands: BTreeMap<String, TimeBand>,
}

#[derive(Debug, Deserialize)]
pub struct EvccConfig {
    /// Host and port of the EVCC gateway, e.g. `evcc.local:7070`.
    pub host: String,
}

#[derive(Debug, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default)]
    pub debug: bool,
}

impl GlobalConfig {
    const fn default_interval_secs() -> u64 {
        300
    }
}

impl Config {
    pub fn read_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse `{}`", path.display()))
    }

    /// The band covering the given wall-clock hour, if any. `None` means
    /// off shift: the controller idles until the next cycle.
    pub fn band_for_hour(&self, hour: u32) -> Option<(&str, &TimeBand)> {
        self.bands
            .iter()
            .find(|(_, band)| band.contains_hour(hour))
            .map(|(name, band)| (name.as_str(), band))
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.global.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::percent::Percent;

    #[test]
    fn test_parse() -> Result {
        let config: Config = toml::from_str(
            // language=toml
            r#"
            [evcc]
            host = "evcc.local:7070"

            [global]
            interval_secs = 120
            debug = true

            [bands.morning]
            start_hour = 6
            end_hour = 9
            soc_limit = 80.0

            [bands.afternoon]
            start_hour = 13
            end_hour = 16
            soc_limit = 95.0
            "#,
        )?;
        assert_eq!(config.evcc.host, "evcc.local:7070");
        assert_eq!(config.interval(), Duration::from_secs(120));
        assert!(config.global.debug);
        assert_eq!(config.bands.len(), 2);
        assert_eq!(
            config.bands["morning"],
            TimeBand { start_hour: 6, end_hour: 9, soc_limit: Percent(80.0) },
        );
        Ok(())
    }

    #[test]
    fn test_band_for_hour() -> Result {
        let config: Config = toml::from_str(
            // language=toml
            r#"
            [evcc]
            host = "localhost:7070"

            [global]

            [bands.morning]
            start_hour = 6
            end_hour = 9
            soc_limit = 80.0
            "#,
        )?;
        assert_eq!(config.global.interval_secs, 300);
        assert_eq!(config.band_for_hour(7).map(|(name, _)| name), Some("morning"));
        assert_eq!(config.band_for_hour(23), None);
        Ok(())
    }
}
