use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::vault::generator::GenOptions;

const PWA_VAULT_LONG_VERSION: &str = concat!(
"version: ", env!("CARGO_PKG_VERSION"), "\n",
"git sha: ", env!("PWA_VAULT_GIT_SHA"), "\n",
"build time (UTC): ", env!("PWA_VAULT_BUILD_TIME"), "\n",
"target: ", env!("PWA_VAULT_TARGET")
);

#[derive(Parser)]
#[command(
    name = "pwa-vault",
    version = env!("CARGO_PKG_VERSION"),
    long_version = PWA_VAULT_LONG_VERSION,
    about = " 🔐 PWA Vault: offline credential table"
)]
pub struct Cli {
    /// Data directory override (holds the record store)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct GenArgs {
    /// Password length (clamped to 4..=64)
    #[arg(long)]
    pub length: Option<usize>,
    /// Include A-Z
    #[arg(long)]
    pub uppercase: bool,
    /// Include 0-9
    #[arg(long)]
    pub numbers: bool,
    /// Include !@#$%^&*()_+
    #[arg(long)]
    pub symbols: bool,
}

impl GenArgs {
    /// Flags layered over configured defaults; a set flag always wins.
    pub fn options(&self, defaults: GenOptions) -> GenOptions {
        GenOptions {
            length: self.length.unwrap_or(defaults.length),
            include_uppercase: self.uppercase || defaults.include_uppercase,
            include_numbers: self.numbers || defaults.include_numbers,
            include_symbols: self.symbols || defaults.include_symbols,
        }
    }
}

/// Generator flags on `add`; each one needs `--generate`.
#[derive(Args, Debug, Clone, Copy)]
pub struct AddGenArgs {
    /// Password length (clamped to 4..=64)
    #[arg(long, requires = "generate")]
    pub length: Option<usize>,
    /// Include A-Z
    #[arg(long, requires = "generate")]
    pub uppercase: bool,
    /// Include 0-9
    #[arg(long, requires = "generate")]
    pub numbers: bool,
    /// Include !@#$%^&*()_+
    #[arg(long, requires = "generate")]
    pub symbols: bool,
}

impl From<AddGenArgs> for GenArgs {
    fn from(a: AddGenArgs) -> Self {
        GenArgs {
            length: a.length,
            uppercase: a.uppercase,
            numbers: a.numbers,
            symbols: a.symbols,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive Terminal UI
    Tui,

    /// Add a record
    Add {
        /// Title (defaults to "Untitled")
        #[arg(long, default_value = "")]
        title: String,
        /// Login (required)
        #[arg(long, default_value = "")]
        user: String,
        /// Site URL
        #[arg(long, default_value = "")]
        url: String,
        /// Password value (visible in shell history; prefer --prompt-secret)
        #[arg(long, conflicts_with_all = ["prompt_secret", "generate"])]
        secret: Option<String>,
        /// Prompt for the password without echo
        #[arg(long, conflicts_with = "generate")]
        prompt_secret: bool,
        /// Generate the password
        #[arg(long)]
        generate: bool,
        #[command(flatten)]
        generator: AddGenArgs,
    },

    /// List records (passwords stay masked unless revealed)
    List {
        /// Output JSON array as stored
        #[arg(long)]
        json: bool,
    },

    /// Remove a record by id
    Rm {
        id: String,
    },

    /// Flip a record between masked and revealed
    Toggle {
        id: String,
    },

    /// Print a generated password
    Generate {
        #[command(flatten)]
        generator: GenArgs,
    },

    /// Manage the offline asset cache
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Cache every manifest asset under the current version
    Install,
    /// Delete cache generations other than the current version
    Activate,
    /// Show cache generations and their entries
    List,
    /// Serve one asset: cache first, then origin
    Fetch {
        path: String,
        /// Write the body here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
