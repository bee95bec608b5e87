//! Configuration for the `pwf` binary.
//!
//! Values are layered from defaults, then an optional TOML file, then
//! environment variables of the form `PWF_<SECTION>__<KEY>`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The complete configuration of the binary
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// Defaults for the `sample` subcommand
    #[serde(default)]
    pub sample: SampleConfig,
}

/// The grid used by `sample` when its flags are omitted
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SampleConfig {
    /// The first argument of the grid
    pub x_min: f64,
    /// The last argument of the grid
    pub x_max: f64,
    /// The number of evenly spaced arguments
    pub num_points: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            num_points: 1000,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The config file, if one is given
    /// 3. Default values (lowest priority)
    ///
    /// ```bash
    /// export PWF_SAMPLE__NUM_POINTS=50
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // PWF_SAMPLE__X_MIN maps to sample.x_min
        config = config.add_source(
            config::Environment::with_prefix("PWF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config.build()?.try_deserialize().map_err(Into::into)
    }
}
