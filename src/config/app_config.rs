use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub seed: SeedConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file every video record is persisted to.
    pub data_file: String,
    pub images_dir: String,
    pub videos_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// How many canned comments a freshly uploaded video starts with.
    pub comments_per_video: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// When unset the server answers any origin.
    pub allowed_origin: Option<String>,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("storage.data_file", "data/videos.json")?
            .set_default("storage.images_dir", "public/images")?
            .set_default("storage.videos_dir", "public/videos")?
            .set_default("seed.comments_per_video", 3)?
            // Layer on the environment-specific values
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in settings from the environment
            // E.g. `APP__SERVER__PORT=5001 ./target/app` would set `server.port`
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        // Deserialize the configuration
        s.try_deserialize()
    }
}

// Add default implementation for configs
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: "data/videos.json".to_string(),
            images_dir: "public/images".to_string(),
            videos_dir: "public/videos".to_string(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            comments_per_video: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_defaults_match_the_shipped_layout() {
        let storage = StorageConfig::default();
        assert_eq!(storage.data_file, "data/videos.json");
        assert_eq!(storage.images_dir, "public/images");
        assert_eq!(storage.videos_dir, "public/videos");
        assert_eq!(ServerConfig::default().port, 8080);
        assert_eq!(SeedConfig::default().comments_per_video, 3);
        assert!(CorsConfig::default().allowed_origin.is_none());
    }

    #[test]
    fn loading_without_a_cors_section_leaves_it_open() {
        let config = AppConfig::new().expect("config should load from defaults");
        assert!(!config.server.host.is_empty());
        assert!(config.seed.comments_per_video >= 1);
    }
}
