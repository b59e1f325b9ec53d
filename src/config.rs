use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::services::image_uploader::UploaderConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,

    /// Upload endpoint of the image host, e.g.
    /// `https://api.cloudinary.com/v1_1/<cloud>/image/upload`.
    pub cloudinary_url: String,
    pub upload_preset: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    cloudinary_url: Option<String>,
    upload_preset: Option<String>,
    listen_addr: Option<String>,
    log_dir: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl ServerConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        let file_config = match config_path {
            Some(path_str) => read_config_file(Path::new(path_str))?,
            None => PartialServerConfig::default(),
        };

        let env_config: PartialServerConfig = envy::from_env::<PartialServerConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        Self::merge(env_config, file_config)
    }

    /// Environment values win over file values.
    fn merge(env: PartialServerConfig, file: PartialServerConfig) -> Result<Self, String> {
        Ok(ServerConfig {
            database_url: env
                .database_url
                .or(file.database_url)
                .ok_or("DATABASE_URL is required")?,
            jwt_secret: env
                .jwt_secret
                .or(file.jwt_secret)
                .ok_or("JWT_SECRET is required")?,
            cloudinary_url: env
                .cloudinary_url
                .or(file.cloudinary_url)
                .ok_or("CLOUDINARY_URL is required")?,
            upload_preset: env
                .upload_preset
                .or(file.upload_preset)
                .ok_or("UPLOAD_PRESET is required")?,
            listen_addr: env
                .listen_addr
                .or(file.listen_addr)
                .unwrap_or_else(default_listen_addr),
            log_dir: env.log_dir.or(file.log_dir).unwrap_or_else(default_log_dir),
        })
    }

    pub fn uploader_config(&self) -> UploaderConfig {
        UploaderConfig {
            endpoint_url: self.cloudinary_url.clone(),
            upload_preset: self.upload_preset.clone(),
        }
    }
}

fn read_config_file(path: &Path) -> Result<PartialServerConfig, String> {
    if !path.exists() {
        return Ok(PartialServerConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
    toml::from_str(&contents)
        .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))
}
