use std::path::PathBuf;
use std::time::Duration;

/// File name of the task store inside the user's home directory.
pub const DEFAULT_DB_FILE: &str = ".ai_todo_db.json";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a command needs to know about its environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub ai: AiConfig,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AiConfig {
    /// Configuration that never calls out.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Keep the key only if it has content; a blank key counts as missing.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
        self
    }
}

impl Config {
    pub fn new(store_path: Option<PathBuf>, ai: AiConfig) -> Self {
        Self {
            store_path: store_path.unwrap_or_else(default_store_path),
            ai,
        }
    }
}

/// `~/.ai_todo_db.json`, or the current directory when no home can be found.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}
