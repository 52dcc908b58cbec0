use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// Name of the optional configuration file, looked up in the working directory
/// with any extension the `config` crate understands (`task-cli.toml`, ...).
pub const CONFIG_FILE: &str = "task-cli";
/// Prefix of the environment variables that override the configuration file.
pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the JSON file holding the tasks.
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from `task-cli.*` in the working directory, if present,
    /// then from `TASK_CLI_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX));
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.level()?;
        Ok(config)
    }

    /// The configured maximum log level.
    pub fn level(&self) -> anyhow::Result<Level> {
        Level::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("invalid log level '{}'", self.log_level))
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}
