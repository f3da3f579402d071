//! CLI for the OAM case-archive manager.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use oam_core::config;
use std::path::PathBuf;

use commands::{run_archive_cmd, run_show_config};

/// Top-level CLI for the OAM case-archive manager.
#[derive(Debug, Parser)]
#[command(name = "oam")]
#[command(about = "OAM: concurrent case-archive manager for the Oyez API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch and materialize every case in the configured term range.
    Run {
        /// First term to archive (overrides config).
        #[arg(long, value_name = "YEAR")]
        from_term: Option<u32>,

        /// Last term to archive (overrides config).
        #[arg(long, value_name = "YEAR")]
        to_term: Option<u32>,

        /// Output root directory (overrides config).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Maximum concurrent in-flight requests (overrides config).
        #[arg(long, value_name = "N")]
        max_requests: Option<usize>,

        /// Base URL of the case API (overrides config).
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,

        /// Accumulate transcript files across runs instead of truncating.
        #[arg(long)]
        append_transcripts: bool,
    },

    /// Show the effective configuration and where it was loaded from.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                from_term,
                to_term,
                out,
                max_requests,
                api_base_url,
                append_transcripts,
            } => {
                run_archive_cmd(
                    cfg,
                    from_term,
                    to_term,
                    out,
                    max_requests,
                    api_base_url,
                    append_transcripts,
                )
                .await?;
            }
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}
