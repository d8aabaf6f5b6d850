use std::env;
use std::path::PathBuf;

use anyhow::bail;

const DEFAULT_DIRECTORY_API_BASE: &str = "https://qyapi.weixin.qq.com/cgi-bin";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3001,http://localhost:3000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some("development") | Some("dev") => Environment::Development,
            _ => Environment::Production,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    // Directory provider credentials
    pub corp_id: String,
    pub corp_secret: String,
    pub directory_api_base: String,

    pub allowed_origins: Vec<String>,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub public_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> anyhow::Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => bail!("{} must be set (environment or .env file)", key),
            }
        };

        let corp_id = required("CORP_ID")?;
        let corp_secret = required("CORP_SECRET")?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            corp_id,
            corp_secret,
            directory_api_base: lookup("DIRECTORY_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_DIRECTORY_API_BASE.to_string()),
            allowed_origins,
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(lookup("PORT"), 3001),
            environment: Environment::parse(lookup("APP_ENV").or_else(|| lookup("NODE_ENV"))),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            http_timeout_secs: parse_or(lookup("HTTP_TIMEOUT_SECS"), 10),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
