use crate::display::Theme;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brickdash")]
#[command(about = "Terminal dashboard for a LEGO inventory and catalog API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Directory holding config.toml
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// API origin, e.g. http://127.0.0.1:8000
    #[arg(long, global = true, env = "BRICKDASH_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub theme: Option<Theme>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Cards)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Framed cards with the navigation shell
    Cards,
    /// Raw JSON of each section
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Statistics, recent inventory and recent LEGO sets
    Dashboard,
    /// List inventory items
    Inventory {
        #[arg(long)]
        skip: Option<u32>,
        /// Page size (1-1000)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        limit: Option<u32>,
        /// Only LEGO items
        #[arg(long, conflicts_with = "non_lego")]
        lego: bool,
        /// Only non-LEGO items
        #[arg(long)]
        non_lego: bool,
    },
    /// List LEGO sets
    Sets {
        #[arg(long)]
        skip: Option<u32>,
        /// Page size (1-1000)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        limit: Option<u32>,
    },
    /// Show aggregate statistics
    Stats,
    /// Show one inventory item and its images
    Item {
        /// Inventory item ID
        id: u64,
    },
    /// Show the images of an inventory item
    Images {
        /// Inventory item ID
        id: u64,
    },
    /// Show one LEGO set
    Set {
        /// Set number, e.g. 7140-1
        set_number: String,
    },
    /// Check that the API answers
    Ping,
    /// Navigate pages interactively from stdin
    Browse {
        /// Starting page: dashboard, inventory, lego-sets or stats
        #[arg(long, default_value = "dashboard")]
        route: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key: base_url, timeout_seconds or theme
        key: String,
        /// Configuration value
        value: String,
    },
}
