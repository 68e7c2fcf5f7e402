//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Which LLM backend answers the council's prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Local `claude --print` subprocess
    #[default]
    #[serde(rename = "claude-cli")]
    ClaudeCli,
    /// OpenAI chat completions API
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::ClaudeCli => "claude-cli",
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "claude-cli" | "claude" => Ok(ProviderKind::ClaudeCli),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!(
                "unknown provider '{}', expected claude-cli or openai",
                other
            )),
        }
    }
}

/// Raw provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub kind: ProviderKind,
    /// Claude CLI executable (name on PATH or absolute path)
    pub claude_command: String,
    pub openai_model: String,
    /// Direct API key (prefer the environment variable)
    pub openai_api_key: Option<String>,
    /// Environment variable consulted when `openai_api_key` is unset
    pub openai_api_key_env: String,
    /// Base URL for the OpenAI API (override for compatible gateways)
    pub openai_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            claude_command: "claude".to_string(),
            openai_model: "gpt-4o".to_string(),
            openai_api_key: None,
            openai_api_key_env: "OPENAI_API_KEY".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            timeout_seconds: 120,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

impl FileProviderConfig {
    /// API key from the config file, else from the configured env var
    pub fn resolve_openai_api_key(&self) -> Option<String> {
        self.openai_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.openai_api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
