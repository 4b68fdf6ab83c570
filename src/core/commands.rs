use crate::config::cli::LocalStorage;
use crate::core::client::LocationsClient;
use crate::core::render::{render_csv, render_json, render_table};
use crate::core::{ConfigProvider, Location, LocationId, LocationsApi, UploadFile};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One user action, mapped 1:1 onto a server operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List { format: OutputFormat },
    Get { id: LocationId },
    Create { payload: Value },
    Update { id: LocationId, payload: Value },
    Delete { id: LocationId },
    Import { path: PathBuf },
    Export,
    Backup,
    Restore { path: PathBuf },
    Health,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List { .. } => "list",
            Command::Get { .. } => "get",
            Command::Create { .. } => "create",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Import { .. } => "import",
            Command::Export => "export",
            Command::Backup => "backup",
            Command::Restore { .. } => "restore",
            Command::Health => "health",
        }
    }
}

/// 解析使用者提供的 JSON payload；格式錯誤時不送出任何請求
pub fn parse_payload(raw: &str) -> Result<Value> {
    Ok(serde_json::from_str(raw)?)
}

pub struct CommandRunner<A: LocationsApi> {
    api: A,
}

impl<A: LocationsApi> CommandRunner<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs one command and returns the text to show the user.
    pub async fn run(&self, command: Command) -> Result<String> {
        tracing::debug!("▶️ Running command: {}", command.name());

        match command {
            Command::List { format } => {
                let value = self.api.get_locations().await?;
                match format {
                    OutputFormat::Json => render_json(&value),
                    OutputFormat::Table => Ok(render_table(&Location::list_from_value(&value)?)),
                    OutputFormat::Csv => render_csv(&Location::list_from_value(&value)?),
                }
            }
            Command::Get { id } => render_json(&self.api.get_location(id).await?),
            Command::Create { payload } => render_json(&self.api.create_location(&payload).await?),
            Command::Update { id, payload } => {
                render_json(&self.api.update_location(id, &payload).await?)
            }
            Command::Delete { id } => render_json(&self.api.delete_location(id).await?),
            Command::Import { path } => {
                let file = UploadFile::from_path(&path).await?;
                render_json(&self.api.import_excel(file).await?)
            }
            Command::Restore { path } => {
                let file = UploadFile::from_path(&path).await?;
                render_json(&self.api.restore_backup(file).await?)
            }
            Command::Export => Ok(describe_download(
                "Export",
                self.api.export_excel().await?,
            )),
            Command::Backup => Ok(describe_download(
                "Backup",
                self.api.backup_download().await?,
            )),
            Command::Health => render_json(&self.api.health().await?),
        }
    }
}

/// Validates `config`, builds an HTTP client that saves downloads under the
/// configured directory, and runs `command` against it.
pub async fn run_with_config<C>(config: &C, command: Command) -> Result<String>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let storage = LocalStorage::new(config.download_dir().to_string());
    let client = LocationsClient::from_config(config, storage)?;
    tracing::debug!("🔗 Using server at {}", client.base_url());

    CommandRunner::new(client).run(command).await
}

fn describe_download(label: &str, saved: Option<String>) -> String {
    match saved {
        Some(path) => format!("{} saved to: {}", label, path),
        None => format!("{} not downloaded: the server did not return a file", label),
    }
}
