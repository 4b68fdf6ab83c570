pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{CliCommand, CliConfig};

#[cfg(feature = "cli")]
mod args {
    use crate::core::commands::{parse_payload, Command, OutputFormat};
    use crate::core::{ConfigProvider, LocationId};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_connection, Validate};
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5050";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "pos-tracker")]
    #[command(about = "Command-line client for the POS deployment tracker server")]
    pub struct CliConfig {
        #[arg(long, env = "POS_TRACKER_URL", default_value = DEFAULT_BASE_URL, global = true)]
        pub base_url: String,

        #[arg(long, default_value = "./downloads", global = true)]
        pub download_dir: String,

        #[arg(long, global = true, help = "Request timeout in seconds (none by default)")]
        pub timeout: Option<u64>,

        #[arg(short, long, global = true, help = "Load connection settings from a TOML file")]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: CliCommand,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum CliCommand {
        /// List all locations
        List {
            #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
            format: OutputFormat,
        },
        /// Show one location
        Get { id: LocationId },
        /// Create a location from a JSON object
        Create {
            #[arg(long)]
            data: String,
        },
        /// Update a location with a JSON object
        Update {
            id: LocationId,
            #[arg(long)]
            data: String,
        },
        /// Delete a location
        Delete { id: LocationId },
        /// Upload a spreadsheet that replaces all locations
        Import { file: PathBuf },
        /// Download all locations as a spreadsheet
        Export,
        /// Download a JSON backup
        Backup,
        /// Upload a JSON backup that replaces all locations
        Restore { file: PathBuf },
        /// Check that the server is up
        Health,
    }

    impl CliCommand {
        pub fn into_command(self) -> Result<Command> {
            Ok(match self {
                CliCommand::List { format } => Command::List { format },
                CliCommand::Get { id } => Command::Get { id },
                CliCommand::Create { data } => Command::Create {
                    payload: parse_payload(&data)?,
                },
                CliCommand::Update { id, data } => Command::Update {
                    id,
                    payload: parse_payload(&data)?,
                },
                CliCommand::Delete { id } => Command::Delete { id },
                CliCommand::Import { file } => Command::Import { path: file },
                CliCommand::Export => Command::Export,
                CliCommand::Backup => Command::Backup,
                CliCommand::Restore { file } => Command::Restore { path: file },
                CliCommand::Health => Command::Health,
            })
        }
    }

    impl ConfigProvider for CliConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn download_dir(&self) -> &str {
            &self.download_dir
        }

        fn timeout_seconds(&self) -> Option<u64> {
            self.timeout
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_connection(
                "--base-url",
                &self.base_url,
                "--download-dir",
                &self.download_dir,
                "--timeout",
                self.timeout,
            )
        }
    }

}
