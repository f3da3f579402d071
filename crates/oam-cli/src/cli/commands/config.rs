//! `oam config` – print the config path and effective values.

use anyhow::Result;
use oam_core::config::{self, OamConfig};

pub fn run_show_config(cfg: &OamConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
