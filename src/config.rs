// src/config.rs
use std::{env, fs, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_CATALOG_FILE: &str = "movie_data.csv";
pub const DEFAULT_ANNOTATIONS_FILE: &str = "user_data.json";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

pub const ENV_CONFIG_PATH: &str = "DIRCUT_CONFIG";
pub const ENV_API_KEY: &str = "DIRCUT_TMDB_API_KEY";
pub const ENV_DATA_DIR: &str = "DIRCUT_DATA_DIR";

const DEFAULT_FETCH_WORKERS: usize = 4;
pub const MAX_FETCH_WORKERS: usize = 32;
const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub catalog_file: String,
    pub annotations_file: String,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base: String,
    pub language: String,
    pub region: String,
    pub fetch_workers: usize,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            catalog_file: DEFAULT_CATALOG_FILE.into(),
            annotations_file: DEFAULT_ANNOTATIONS_FILE.into(),
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.into(),
            tmdb_image_base: DEFAULT_TMDB_IMAGE_BASE.into(),
            language: "en-US".into(),
            region: "US".into(),
            fetch_workers: DEFAULT_FETCH_WORKERS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.data_dir.join(&self.annotations_file)
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    data_dir: Option<String>,
    catalog_file: Option<String>,
    #[serde(alias = "user_data_file")]
    annotations_file: Option<String>,
    #[serde(alias = "api_key")]
    tmdb_api_key: Option<String>,
    tmdb_base_url: Option<String>,
    tmdb_image_base: Option<String>,
    language: Option<String>,
    region: Option<String>,
    fetch_workers: Option<usize>,
    request_timeout_secs: Option<u64>,
}

pub fn config_path() -> PathBuf {
    env::var_os(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Read `config.json` (or `$DIRCUT_CONFIG`), then apply env overrides.
pub fn load_config() -> AppConfig {
    let cfg_path = config_path();
    let mut cfg = AppConfig::default();

    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                merge_raw(&mut cfg, parsed);
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    apply_env_overrides(&mut cfg);
    cfg
}

fn merge_raw(cfg: &mut AppConfig, parsed: RawConfig) {
    if let Some(dir) = parsed.data_dir.filter(|d| !d.trim().is_empty()) {
        cfg.data_dir = PathBuf::from(dir);
    }
    if let Some(file) = parsed.catalog_file.filter(|f| !f.trim().is_empty()) {
        cfg.catalog_file = file;
    }
    if let Some(file) = parsed.annotations_file.filter(|f| !f.trim().is_empty()) {
        cfg.annotations_file = file;
    }
    if parsed.tmdb_api_key.is_some() {
        cfg.tmdb_api_key = parsed.tmdb_api_key;
    }
    if let Some(url) = parsed.tmdb_base_url {
        cfg.tmdb_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(url) = parsed.tmdb_image_base {
        cfg.tmdb_image_base = url;
    }
    if let Some(lang) = parsed.language {
        cfg.language = lang;
    }
    if let Some(region) = parsed.region {
        cfg.region = region;
    }
    if let Some(n) = parsed.fetch_workers {
        if n == 0 || n > MAX_FETCH_WORKERS {
            warn!("fetch_workers={n} out of range; clamping to 1..={MAX_FETCH_WORKERS}");
        }
        cfg.fetch_workers = n.clamp(1, MAX_FETCH_WORKERS);
    }
    if let Some(secs) = parsed.request_timeout_secs {
        cfg.request_timeout_secs = secs.max(1);
    }
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(key) = env::var(ENV_API_KEY) {
        if !key.trim().is_empty() {
            cfg.tmdb_api_key = Some(key.trim().to_string());
        }
    }
    if let Some(dir) = env::var_os(ENV_DATA_DIR) {
        cfg.data_dir = PathBuf::from(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AppConfig {
        let mut cfg = AppConfig::default();
        merge_raw(&mut cfg, serde_json::from_str(raw).unwrap());
        cfg
    }

    #[test]
    fn empty_object_keeps_defaults() {
        let cfg = parse("{}");
        assert_eq!(cfg.catalog_path(), PathBuf::from("./movie_data.csv"));
        assert_eq!(cfg.annotations_path(), PathBuf::from("./user_data.json"));
        assert_eq!(cfg.tmdb_base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(cfg.fetch_workers, 4);
        assert!(cfg.tmdb_api_key.is_none());
    }

    #[test]
    fn fields_override_and_workers_clamp() {
        let cfg = parse(
            r#"{
                "data_dir": "/tmp/movies",
                "api_key": "abc",
                "tmdb_base_url": "http://127.0.0.1:9000/3/",
                "fetch_workers": 100,
                "request_timeout_secs": 0
            }"#,
        );
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/movies"));
        assert_eq!(cfg.tmdb_api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.tmdb_base_url, "http://127.0.0.1:9000/3");
        assert_eq!(cfg.fetch_workers, 32);
        assert_eq!(cfg.request_timeout_secs, 1);
    }

    #[test]
    fn legacy_user_data_alias() {
        let cfg = parse(r#"{"user_data_file": "notes.json", "fetch_workers": 0}"#);
        assert_eq!(cfg.annotations_file, "notes.json");
        assert_eq!(cfg.fetch_workers, 1);
    }
}
