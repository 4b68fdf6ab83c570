use crate::domain::model::{LocationId, UploadFile};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Download sink for export/backup files.
pub trait Storage: Send + Sync {
    /// Returns the full path the data was written to.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn download_dir(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Server operations on the locations resource. Every method is one HTTP
/// round trip; implementations hold no state between calls.
#[async_trait]
pub trait LocationsApi: Send + Sync {
    async fn get_locations(&self) -> Result<Value>;
    async fn get_location(&self, id: LocationId) -> Result<Value>;
    async fn create_location(&self, payload: &Value) -> Result<Value>;
    async fn update_location(&self, id: LocationId, payload: &Value) -> Result<Value>;
    async fn delete_location(&self, id: LocationId) -> Result<Value>;
    async fn import_excel(&self, file: UploadFile) -> Result<Value>;
    /// `None` when the server did not hand back a file.
    async fn export_excel(&self) -> Result<Option<String>>;
    /// `None` when the server did not hand back a file.
    async fn backup_download(&self) -> Result<Option<String>>;
    async fn restore_backup(&self, file: UploadFile) -> Result<Value>;
    async fn health(&self) -> Result<Value>;
}
