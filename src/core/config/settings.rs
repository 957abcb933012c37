use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use super::paths::AppPaths;
use crate::rag::DEFAULT_SCORE_THRESHOLD;

/// Typed application settings, merged from `config.yml` over built-in
/// defaults. API keys fall back to environment variables so secrets can
/// stay out of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub rag: RagSettings,
    pub embedding: EmbeddingSettings,
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Chunk size in characters.
    pub chunk_size: usize,
    /// Number of chunks handed to the answer generator.
    pub top_k: usize,
    /// Minimum cosine score a retrieved chunk must reach.
    pub score_threshold: f32,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            top_k: 5,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090".to_string(),
            model: "all-MiniLM-L6-v2".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "openrouter/free".to_string(),
            api_key: None,
        }
    }
}

impl Settings {
    pub fn load(paths: &AppPaths) -> Self {
        let path = config_path(paths);
        let mut settings = match fs::read_to_string(&path) {
            Ok(contents) => match serde_yaml::from_str::<Settings>(&contents) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::warn!(
                        "Failed to parse config at {:?}: {}; using defaults",
                        path,
                        err
                    );
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };

        if is_unset(&settings.llm.api_key) {
            settings.llm.api_key = env::var("OPENROUTER_API_KEY").ok();
        }
        if is_unset(&settings.embedding.api_key) {
            settings.embedding.api_key = env::var("COGNIA_EMBEDDING_API_KEY").ok();
        }

        settings
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn config_path(paths: &AppPaths) -> PathBuf {
    if let Ok(path) = env::var("COGNIA_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    let user_config = paths.user_data_dir.join("config.yml");
    if user_config.exists() {
        return user_config;
    }

    paths.project_root.join("config.yml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_constants() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.rag.chunk_size, 500);
        assert_eq!(settings.rag.top_k, 5);
        assert!((settings.rag.score_threshold - 0.25).abs() < f32::EPSILON);
        assert!(settings.llm.base_url.contains("openrouter.ai"));
    }

    #[test]
    fn partial_yaml_overrides_keep_other_defaults() {
        let yaml = "rag:\n  chunk_size: 200\nserver:\n  port: 9001\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.rag.chunk_size, 200);
        assert_eq!(settings.rag.top_k, 5);
        assert_eq!(settings.server.port, 9001);
        assert_eq!(settings.embedding.model, "all-MiniLM-L6-v2");
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        assert!(is_unset(&None));
        assert!(is_unset(&Some("   ".to_string())));
        assert!(!is_unset(&Some("sk-abc".to_string())));
    }
}
