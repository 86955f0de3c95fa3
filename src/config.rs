//! Configuration for the generation endpoint and local media

use std::env;
use std::path::PathBuf;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://localhost:5140";
pub const DEFAULT_GENERATE_PATH: &str = "/test/generateVideo";
pub const HEALTH_PATH: &str = "/health";

/// How the endpoint answers a successful generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseContract
{   /// Body is the raw video
    Binary
  , /// Body is `{ "url": "..." }`
    Linked
}

impl Default for ResponseContract
{   fn default() -> Self
    {   ResponseContract::Binary
    }
}

impl std::str::FromStr for ResponseContract
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s.trim().to_ascii_lowercase().as_str()
        {   "binary" => Ok(ResponseContract::Binary)
          , "linked" => Ok(ResponseContract::Linked)
          , other => Err(crate::error::Error::InvalidConfiguration(
              format!("unknown response contract: {}", other)
            ))
        }
    }
}

/// Endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig
{   /// API base URL, without trailing path
    pub api_base: String
  , /// Path of the generate route
    #[serde(default = "default_generate_path")]
    pub generate_path: String
  , /// Response contract of the generate route
    #[serde(default)]
    pub response_contract: ResponseContract
}

fn default_generate_path() -> String
{   DEFAULT_GENERATE_PATH.to_string()
}

impl Default for EndpointConfig
{   fn default() -> Self
    {   EndpointConfig
        {   api_base: DEFAULT_API_BASE.to_string()
          , generate_path: default_generate_path()
          , response_contract: ResponseContract::default()
        }
    }
}

impl EndpointConfig
{   /// Endpoint pointing at `api_base` with default path and contract
    pub fn with_base(api_base: impl Into<String>) -> Self
    {   EndpointConfig
        {   api_base: api_base.into()
          , ..EndpointConfig::default()
        }
    }

    pub fn with_contract(mut self, contract: ResponseContract) -> Self
    {   self.response_contract = contract;
        self
    }

    /// Full URL of the generate route
    pub fn generate_url(&self) -> Result<reqwest::Url, crate::error::Error>
    {   self.join(&self.generate_path)
    }

    /// Full URL of the health route
    pub fn health_url(&self) -> Result<reqwest::Url, crate::error::Error>
    {   self.join(HEALTH_PATH)
    }

    fn join(&self, path: &str)
      -> Result<reqwest::Url, crate::error::Error>
    {   let joined = format!(
          "{}/{}"
        , self.api_base.trim_end_matches('/')
        , path.trim_start_matches('/')
        );
        reqwest::Url::parse(&joined).map_err(|e| {
          crate::error::Error::InvalidConfiguration(
            format!("bad endpoint url {}: {}", joined, e)
          )
        })
    }
}

/// reincarnate configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReincarnateConfig
{   /// Generation endpoint
    #[serde(default)]
    pub endpoint: EndpointConfig
  , /// Where received videos are written; system temp dir if unset
    #[serde(default)]
    pub media_dir: Option<PathBuf>
}

impl ReincarnateConfig
{   pub fn new(endpoint: EndpointConfig) -> Self
    {   ReincarnateConfig
        {   endpoint
          , media_dir: None
        }
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(json: &str)
      -> Result<Self, crate::error::Error>
    {   let config: ReincarnateConfig = serde_json::from_str(json)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from `REINCARNATE_*` environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   let mut config = ReincarnateConfig::default();

        if let Ok(base) = env::var("REINCARNATE_API_BASE")
        {   config.endpoint.api_base = base;
        }
        if let Ok(path) = env::var("REINCARNATE_GENERATE_PATH")
        {   config.endpoint.generate_path = path;
        }
        if let Ok(contract) = env::var("REINCARNATE_RESPONSE_CONTRACT")
        {   config.endpoint.response_contract = contract.parse()?;
        }
        if let Ok(dir) = env::var("REINCARNATE_MEDIA_DIR")
        {   config.media_dir = Some(PathBuf::from(dir));
        }

        debug!("Configuration from env: {:?}", config);
        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint URLs can be built
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   let url = self.endpoint.generate_url()?;
        if !matches!(url.scheme(), "http" | "https")
        {   warn!("Unsupported scheme in {}", url);
            return Err(crate::error::Error::InvalidConfiguration(
              format!("unsupported scheme: {}", url.scheme())
            ));
        }
        Ok(())
    }
}
