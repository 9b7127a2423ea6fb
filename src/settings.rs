use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://dify.b3med.ru/v1/workflows/run";
const DEFAULT_USER_ID: &str = "emc-cli";
const DEFAULT_TIMEOUT_SECS: i64 = 180;

/// Runtime settings: optional `emc.toml` in the working directory, then `EMC_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    /// Key of the risk/general recommendations workflow.
    #[serde(default)]
    pub risk_app_key: Option<String>,
    /// Key of the clinical-guideline (МКБ-10) workflow.
    #[serde(default)]
    pub kr_app_key: Option<String>,
    pub user_id: String,
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
    #[serde(default)]
    pub access_codes: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name("emc").required(false))
            .add_source(
                Environment::with_prefix("EMC")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("access_codes"),
            )
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("user_id", DEFAULT_USER_ID)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("accept_invalid_certs", false)?
        .set_default("access_codes", Vec::<String>::new())
}
