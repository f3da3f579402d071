use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/oam/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OamConfig {
    /// Maximum concurrent in-flight remote requests across the whole run.
    pub max_concurrent_requests: usize,
    /// First term (inclusive) to archive.
    pub term_start: u32,
    /// Last term (inclusive) to archive.
    pub term_end: u32,
    /// Root directory of the materialized case tree.
    pub output_root: PathBuf,
    /// Base URL of the case API.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// If true, transcript text files accumulate across runs instead of
    /// being truncated (the historical behavior).
    #[serde(default)]
    pub append_transcripts: bool,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for OamConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 20,
            term_start: 1990,
            term_end: 2025,
            output_root: PathBuf::from("Cases"),
            api_base_url: "https://api.oyez.org".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            append_transcripts: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oam")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OamConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OamConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: OamConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = OamConfig::default();
        assert_eq!(cfg.max_concurrent_requests, 20);
        assert_eq!(cfg.term_start, 1990);
        assert_eq!(cfg.term_end, 2025);
        assert_eq!(cfg.output_root, PathBuf::from("Cases"));
        assert_eq!(cfg.api_base_url, "https://api.oyez.org");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(!cfg.append_transcripts);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = OamConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: OamConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_concurrent_requests, cfg.max_concurrent_requests);
        assert_eq!(parsed.term_start, cfg.term_start);
        assert_eq!(parsed.term_end, cfg.term_end);
        assert_eq!(parsed.output_root, cfg.output_root);
        assert_eq!(parsed.api_base_url, cfg.api_base_url);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            max_concurrent_requests = 8
            term_start = 2000
            term_end = 2003
            output_root = "/srv/archive"
            api_base_url = "http://127.0.0.1:9000"
            append_transcripts = true
        "#;
        let cfg: OamConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_concurrent_requests, 8);
        assert_eq!(cfg.term_start, 2000);
        assert_eq!(cfg.term_end, 2003);
        assert_eq!(cfg.output_root, PathBuf::from("/srv/archive"));
        assert!(cfg.append_transcripts);
        // Omitted optional field falls back to its named default.
        assert_eq!(cfg.request_timeout_secs, 30);
    }
}
