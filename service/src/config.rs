use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default Anthropic API base URL used when `ANTHROPIC_BASE_URL` is not set.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Model used for transcript analysis unless overridden.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Value sent in the `anthropic-version` header.
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The API key to use when calling the Anthropic Messages API. When absent,
    /// transcripts are still accepted but stored with a placeholder analysis.
    #[arg(long, env, hide_env_values = true)]
    anthropic_api_key: Option<String>,

    /// The base URL of the Anthropic API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ANTHROPIC_BASE_URL)]
    anthropic_base_url: String,

    /// The model identifier sent with every analysis request.
    #[arg(long, env, default_value = DEFAULT_ANTHROPIC_MODEL)]
    anthropic_model: String,

    /// The Anthropic API protocol version header value.
    #[arg(long, env, default_value = DEFAULT_ANTHROPIC_VERSION)]
    anthropic_version: String,

    /// Upper bound on the number of tokens the model may generate per analysis.
    #[arg(long, env, default_value_t = 2000)]
    pub anthropic_max_tokens: u32,

    /// Timeout in seconds for a single analysis request, including reading the response.
    #[arg(long, env, default_value_t = 60)]
    pub llm_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

/// Loads a `.env` file into the process environment, if one exists, so the `env`
/// fallbacks above can see it. Call before parsing.
pub fn load_dotenv() {
    dotenv().ok();
}

impl Config {
    /// Returns the Anthropic API key, if configured and not blank.
    pub fn anthropic_api_key(&self) -> Option<String> {
        self.anthropic_api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .cloned()
    }

    pub fn set_anthropic_api_key(mut self, api_key: Option<String>) -> Self {
        self.anthropic_api_key = api_key;
        self
    }

    /// Returns the Anthropic API base URL without a trailing slash.
    pub fn anthropic_base_url(&self) -> &str {
        self.anthropic_base_url.trim_end_matches('/')
    }

    pub fn set_anthropic_base_url(mut self, base_url: String) -> Self {
        self.anthropic_base_url = base_url;
        self
    }

    pub fn anthropic_model(&self) -> &str {
        &self.anthropic_model
    }

    pub fn anthropic_version(&self) -> &str {
        &self.anthropic_version
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }
}
