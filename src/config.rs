use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub provider: String,
    pub model: String,
    pub vision_model: String,
    pub api_url: String,
    pub api_key: String,
}

impl AiConfig {
    /// The configured key, falling back to the provider's conventional
    /// environment variable when the config file leaves it blank.
    pub fn resolved_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.clone());
        }
        let env_var = match self.provider.to_lowercase().as_str() {
            "gemini" | "google" => "GEMINI_API_KEY",
            "groq" => "GROQ_API_KEY",
            _ => return None,
        };
        std::env::var(env_var).ok().filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".springforge").join("config.yaml")
    }

    pub fn load_or_default() -> Config {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(config) = Self::load_from_file(&config_path) {
                return config;
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_file(Self::config_path())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                provider: "groq".to_string(),
                model: "llama-3.3-70b-versatile".to_string(),
                vision_model: "meta-llama/llama-4-maverick-17b-128e-instruct".to_string(),
                api_url: "https://api.groq.com/openai/v1".to_string(),
                api_key: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.ai.api_key = "secret".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.ai.provider, "groq");
        assert_eq!(loaded.ai.api_key, "secret");
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let config = AiConfig {
            provider: "groq".to_string(),
            model: String::new(),
            vision_model: String::new(),
            api_url: String::new(),
            api_key: "from-file".to_string(),
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn unknown_provider_has_no_env_fallback() {
        let config = AiConfig {
            provider: "mystery".to_string(),
            model: String::new(),
            vision_model: String::new(),
            api_url: String::new(),
            api_key: String::new(),
        };
        assert_eq!(config.resolved_api_key(), None);
    }
}
