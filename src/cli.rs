//! CLI command definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for mushaf-tui
#[derive(Parser, Debug)]
#[command(name = "mushaf-tui")]
#[command(author, version, about = "Read, listen to and study a verse of the Quran in the terminal")]
#[command(long_about = r#"
Pick a reciter, a chapter and a verse number; the verse text, its recitation
and the Tafsir al-Muyassar commentary are fetched from api.alquran.cloud.

Without a subcommand the interactive terminal UI starts.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./mushaf.toml       Project-level config
3. ~/.config/mushaf-tui/config.toml   Global config

Example:
  mushaf-tui
  mushaf-tui chapters
  mushaf-tui verse 1 1 --reciter ar.husary
  mushaf-tui verse al-baqara 255
"#)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Override the content API base URL
    #[arg(long, value_name = "URL", global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the chapter list and exit
    Chapters,
    /// Print one verse with its audio URL and commentary
    Verse {
        /// Chapter number (1-114), menu label or English name
        chapter: String,
        /// Verse number, clamped to the chapter's verse count
        verse: u32,
        /// Reciter edition id (e.g. ar.alafasy)
        #[arg(short, long, value_name = "ID")]
        reciter: Option<String>,
    },
}
