use crate::core::{ConfigProvider, DownloadKind, LocationId, LocationsApi, Storage, UploadFile};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

const LOCATIONS_PATH: &str = "/api/locations";
const IMPORT_PATH: &str = "/api/import";
const RESTORE_PATH: &str = "/api/restore";
const HEALTH_PATH: &str = "/api/health";

/// multipart 上傳固定使用的欄位名稱
pub const UPLOAD_FIELD: &str = "file";

/// HTTP adapter for the locations server.
///
/// CRUD calls check the status before parsing and fail with a fixed message.
/// Import/restore skip the status check and always parse the body. Export and
/// backup write the downloaded file to `storage`.
pub struct LocationsClient<S: Storage> {
    client: Client,
    base_url: String,
    storage: S,
}

impl<S: Storage> LocationsClient<S> {
    pub fn new(base_url: &str, storage: S) -> Result<Self> {
        Self::with_client(Client::new(), base_url, storage)
    }

    pub fn from_config<C: ConfigProvider>(config: &C, storage: S) -> Result<Self> {
        let mut builder = Client::builder();
        // 預設不設逾時，與瀏覽器 fetch 的行為一致
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        Self::with_client(builder.build()?, config.base_url(), storage)
    }

    pub fn with_client(client: Client, base_url: &str, storage: S) -> Result<Self> {
        // 先確認 base URL 本身可解析
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins by concatenation so a path prefix on the base URL survives.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    fn location_path(id: LocationId) -> String {
        format!("{}/{}", LOCATIONS_PATH, id)
    }

    pub(crate) fn json_request(
        &self,
        method: Method,
        path: &str,
        payload: &Value,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self.client.request(method, url).json(payload))
    }

    /// DELETE 不帶 body
    pub(crate) fn delete_request(&self, id: LocationId) -> Result<RequestBuilder> {
        let url = self.endpoint(&Self::location_path(id))?;
        Ok(self.client.delete(url))
    }

    pub(crate) fn upload_request(&self, path: &str, file: UploadFile) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part(UPLOAD_FIELD, part);
        Ok(self.client.post(url).multipart(form))
    }

    /// 送出請求並檢查狀態碼；非 2xx 一律回傳固定訊息
    async fn send_checked(&self, request: RequestBuilder, failure: &'static str) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} -> {}", response.url(), status);

        if !status.is_success() {
            tracing::debug!("❌ {} (status {})", failure, status);
            return Err(ClientError::operation_failed(failure));
        }

        parse_json(response).await
    }

    /// Upload endpoints: the status is logged but never checked.
    async fn send_upload(&self, path: &str, file: UploadFile) -> Result<Value> {
        let file_name = file.file_name.clone();
        let size = file.bytes.len();
        let response = self.upload_request(path, file)?.send().await?;
        tracing::debug!("📡 {} -> {}", response.url(), response.status());
        tracing::info!("📤 Uploaded {} ({} bytes) to {}", file_name, size, path);
        parse_json(response).await
    }

    async fn download(&self, kind: DownloadKind) -> Result<Option<String>> {
        let url = self.endpoint(kind.endpoint())?;
        tracing::debug!("📡 Downloading from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "⚠️ {} returned {}, no file was downloaded",
                kind.endpoint(),
                status
            );
            return Ok(None);
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| kind.default_file_name(chrono::Utc::now().date_naive()));

        let data = response.bytes().await?;
        let saved = self.storage.write_file(&file_name, &data).await?;
        tracing::info!("📥 Saved {} ({} bytes)", saved, data.len());
        Ok(Some(saved))
    }
}

async fn parse_json(response: Response) -> Result<Value> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Extracts the file name from a `Content-Disposition` header, keeping only
/// the final path component. `filename*` wins over `filename` (RFC 6266).
pub fn attachment_file_name(header: &str) -> Option<String> {
    static EXTENDED: OnceLock<Regex> = OnceLock::new();
    static PLAIN: OnceLock<Regex> = OnceLock::new();
    let extended = EXTENDED.get_or_init(|| {
        Regex::new(r"(?i)filename\*\s*=\s*([\w!#$&+.^`|~-]+)'[\w-]*'([^;\s]+)")
            .expect("filename* pattern is valid")
    });
    let plain = PLAIN.get_or_init(|| {
        Regex::new(r#"(?i)filename\s*=\s*"?([^";]+)"?"#).expect("filename pattern is valid")
    });

    let raw = match extended.captures(header) {
        Some(caps) => decode_ext_value(&caps[1], &caps[2])?,
        None => plain.captures(header)?.get(1)?.as_str().trim().to_string(),
    };

    let name = Path::new(&raw).file_name()?.to_str()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

/// RFC 5987 的 ext-value：百分比解碼後依字元集轉成字串
fn decode_ext_value(charset: &str, encoded: &str) -> Option<String> {
    let input = encoded.as_bytes();
    let mut bytes = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            let hex = std::str::from_utf8(input.get(i + 1..i + 3)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            bytes.push(input[i]);
            i += 1;
        }
    }

    if charset.eq_ignore_ascii_case("iso-8859-1") {
        Some(bytes.into_iter().map(char::from).collect())
    } else {
        String::from_utf8(bytes).ok()
    }
}

#[async_trait]
impl<S: Storage> LocationsApi for LocationsClient<S> {
    async fn get_locations(&self) -> Result<Value> {
        let url = self.endpoint(LOCATIONS_PATH)?;
        self.send_checked(self.client.get(url), "Failed to fetch locations")
            .await
    }

    async fn get_location(&self, id: LocationId) -> Result<Value> {
        let url = self.endpoint(&Self::location_path(id))?;
        self.send_checked(self.client.get(url), "Failed to fetch location")
            .await
    }

    async fn create_location(&self, payload: &Value) -> Result<Value> {
        let request = self.json_request(Method::POST, LOCATIONS_PATH, payload)?;
        self.send_checked(request, "Create failed").await
    }

    async fn update_location(&self, id: LocationId, payload: &Value) -> Result<Value> {
        let request = self.json_request(Method::PUT, &Self::location_path(id), payload)?;
        self.send_checked(request, "Update failed").await
    }

    async fn delete_location(&self, id: LocationId) -> Result<Value> {
        self.send_checked(self.delete_request(id)?, "Delete failed")
            .await
    }

    async fn import_excel(&self, file: UploadFile) -> Result<Value> {
        self.send_upload(IMPORT_PATH, file).await
    }

    async fn export_excel(&self) -> Result<Option<String>> {
        self.download(DownloadKind::Export).await
    }

    async fn backup_download(&self) -> Result<Option<String>> {
        self.download(DownloadKind::Backup).await
    }

    async fn restore_backup(&self, file: UploadFile) -> Result<Value> {
        self.send_upload(RESTORE_PATH, file).await
    }

    async fn health(&self) -> Result<Value> {
        let url = self.endpoint(HEALTH_PATH)?;
        self.send_checked(self.client.get(url), "Health check failed")
            .await
    }
}
