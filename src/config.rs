use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Files probed in the working directory when `CONFIG_PATH` is unset.
const DEFAULT_CONFIG_PATHS: &[&str] = &["conf.yaml", "conf.json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub gloss_config: GlossConfig,
    #[serde(default)]
    pub transcription_config: TranscriptionConfig,
    /// File the config was loaded from, if any
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Directory for staged uploads; the system temp dir when unset.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossConfig {
    #[serde(default = "default_gloss_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_transcription_model")]
    pub model: String,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_gloss_endpoint() -> String {
    "https://isl2gloss.justinbenito.com/convert".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_transcription_model() -> String {
    "gpt-4o-transcribe".to_string()
}

fn default_file_extension() -> String {
    "webm".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            temp_dir: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl SystemConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for GlossConfig {
    fn default() -> Self {
        Self {
            endpoint: default_gloss_endpoint(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_transcription_model(),
            file_extension: default_file_extension(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            let mut config: Config = serde_json::from_str(&content)?;
            config.source_path = Some(PathBuf::from(path));
            Ok(config)
        } else {
            let mut config: Config = serde_yaml::from_str(&content)?;
            config.source_path = Some(PathBuf::from(path));
            Ok(config)
        }
    }

    /// File names that must never be served as static assets.
    pub fn private_file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = DEFAULT_CONFIG_PATHS.iter().map(|p| p.to_string()).collect();
        if let Some(name) = self
            .source_path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
        {
            names.push(name.to_string());
        }
        names
    }

    /// Defaults, then an optional config file, then environment overrides.
    pub fn resolve() -> Result<Self> {
        let mut config = match env_var("CONFIG_PATH") {
            Some(path) => Self::load(&path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            None => match DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
                Some(path) => Self::load(path)
                    .with_context(|| format!("Failed to load config from {}", path))?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(env_var);
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = get("HOST") {
            self.system_config.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => self.system_config.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(dir) = get("STATIC_DIR") {
            self.system_config.static_dir = dir;
        }
        if let Some(endpoint) = get("GLOSS_API_URL") {
            self.gloss_config.endpoint = endpoint;
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.transcription_config.api_key = Some(key);
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            self.transcription_config.base_url = base_url;
        }
        if let Some(model) = get("TRANSCRIPTION_MODEL") {
            self.transcription_config.model = model;
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_the_public_services() {
        let config = Config::default();
        assert_eq!(config.system_config.port, 3000);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(
            config.gloss_config.endpoint,
            "https://isl2gloss.justinbenito.com/convert"
        );
        assert_eq!(config.transcription_config.model, "gpt-4o-transcribe");
        assert_eq!(config.transcription_config.file_extension, "webm");
        assert!(config.transcription_config.api_key.is_none());
        assert_eq!(config.system_config.temp_dir(), std::env::temp_dir());
        assert_eq!(config.system_config.static_dir, "public");
    }

    #[test]
    fn environment_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "8080"),
            ("OPENAI_API_KEY", "sk-test"),
            ("GLOSS_API_URL", "http://localhost:9000/convert"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.system_config.port, 8080);
        assert_eq!(config.transcription_config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.gloss_config.endpoint, "http://localhost:9000/convert");
        assert_eq!(config.transcription_config.model, "gpt-4o-transcribe");
    }

    #[test]
    fn invalid_port_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.system_config.port, 3000);
    }

    #[test]
    fn partial_yaml_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "system_config:\n  port: 4000\ntranscription_config:\n  model: whisper-1"
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.system_config.port, 4000);
        assert_eq!(config.system_config.static_dir, "public");
        assert_eq!(config.transcription_config.model, "whisper-1");
        assert_eq!(
            config.gloss_config.endpoint,
            "https://isl2gloss.justinbenito.com/convert"
        );
    }

    #[test]
    fn json_file_is_parsed_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"gloss_config": {{"endpoint": "http://gloss.local/convert"}}}}"#).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.gloss_config.endpoint, "http://gloss.local/convert");
        assert_eq!(config.system_config.port, 3000);
    }

    #[test]
    fn loaded_file_is_listed_as_private() {
        let file = tempfile::Builder::new()
            .prefix("relay-settings")
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        std::fs::write(file.path(), "system_config:\n  port: 4000\n").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        let names = config.private_file_names();

        let own_name = file.path().file_name().unwrap().to_str().unwrap();
        assert!(names.iter().any(|n| n == own_name));
        assert!(names.iter().any(|n| n == "conf.yaml"));
        assert!(Config::default().private_file_names().iter().all(|n| n != own_name));
    }
}
