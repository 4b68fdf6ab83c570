pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliCommand, CliConfig};

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    client::LocationsClient,
    commands::{run_with_config, Command, CommandRunner, OutputFormat},
};
pub use crate::domain::model::{Location, LocationId, UploadFile};
pub use crate::domain::ports::LocationsApi;
pub use crate::utils::error::{ClientError, Result};
