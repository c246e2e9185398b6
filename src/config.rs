use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::policy::DuplicatePolicy;

/// Prefix for environment overrides, e.g. `REEL_DUPER_POLICY=ignore-4k-1080`.
pub const ENV_PREFIX: &str = "REEL_DUPER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Count parts the server could not find or read as ghosts.
    pub verify: bool,
    /// Drop versions whose files look like trailers, featurettes, etc.
    pub ignore_extras: bool,
    /// Duplicate policy name; see [`DuplicatePolicy::parse`].
    pub policy: String,
    /// Section keys to reconcile. Empty means every movie section.
    pub sections: Vec<String>,
    pub include_shows: bool,
    /// Also list titles that fell below two versions in the ignored list.
    pub audit_variant_exclusions: bool,
    pub input_path: String,
    pub output_path: Option<String>,
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verify: true,
            ignore_extras: false,
            policy: DuplicatePolicy::KEEP_ALL_NAME.to_string(),
            sections: Vec::new(),
            include_shows: false,
            audit_variant_exclusions: false,
            input_path: "library.json".to_string(),
            output_path: None,
            pretty: true,
        }
    }
}

impl AppConfig {
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::parse(&self.policy)
    }
}

/// Loads `Config.toml` (optional) and `REEL_DUPER_*` environment overrides on
/// top of the defaults.
pub fn load_configuration() -> Result<AppConfig, Error> {
    load_from("Config")
}

/// Same as [`load_configuration`] with an explicit config file name (no
/// extension required).
pub fn load_from(file_name: &str) -> Result<AppConfig, Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(file_name).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("sections"),
        )
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}
