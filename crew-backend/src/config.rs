use crate::ai::ollama::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::tools::ToolProfile;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONFIG_DIR: &str = "./config";

#[derive(Clone, Debug)]
pub struct Config {
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub config_dir: PathBuf,
    pub workspace_dir: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
    pub tool_profile: ToolProfile,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ollama_base_url = get("OLLAMA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = url::Url::parse(&ollama_base_url)
            .map_err(|e| format!("OLLAMA_BASE_URL '{}' is not a valid URL: {}", ollama_base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "OLLAMA_BASE_URL must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        let request_timeout = match get("CREW_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| format!("CREW_REQUEST_TIMEOUT_SECS must be a number of seconds, got '{}'", raw))?;
                if secs == 0 {
                    None
                } else {
                    Some(Duration::from_secs(secs))
                }
            }
            None => None,
        };

        let tool_profile = match get("CREW_TOOL_PROFILE") {
            Some(raw) => ToolProfile::from_str(&raw)
                .ok_or_else(|| format!("CREW_TOOL_PROFILE must be 'full' or 'tasks', got '{}'", raw))?,
            None => ToolProfile::default(),
        };

        Ok(Self {
            ollama_base_url: ollama_base_url.trim_end_matches('/').to_string(),
            ollama_model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            config_dir: get("CREW_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            workspace_dir: get("CREW_WORKSPACE_DIR").map(PathBuf::from),
            request_timeout,
            tool_profile,
        })
    }
}
