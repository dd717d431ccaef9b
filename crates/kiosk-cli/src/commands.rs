//! CLI command definitions.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Select the next image(s) for a device
    Next {
        /// Only select images showing this person
        #[arg(short, long)]
        person: Option<String>,

        /// Device the selection is made for
        #[arg(short, long, default_value = "cli")]
        device: String,

        /// Number of consecutive selections
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },

    /// Show how many assets a person appears in
    PersonStats {
        /// Person ID
        person: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}
