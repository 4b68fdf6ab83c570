use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// `/api/locations/{id}` 的路徑參數
pub type LocationId = i64;

/// Typed view of one server-side location row.
///
/// The server owns the shape; every column is optional and unknown columns
/// are kept in `extra`, so deserializing never rejects a record the server
/// considers valid. The client API itself passes raw `serde_json::Value`
/// through untouched; this type is only used for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<LocationId>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sl_no: Option<i64>,
    pub division: Option<String>,
    pub post_office_name: Option<String>,
    pub post_office_id: Option<String>,
    pub office_type: Option<String>,
    pub contact_person_name: Option<String>,
    pub contact_person_no: Option<String>,
    pub alt_contact_no: Option<String>,
    pub contact_email: Option<String>,
    pub location_address: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub number_of_pos_to_be_deployed: Option<i64>,
    pub type_of_pos_terminal: Option<String>,
    pub date_of_receipt_of_device: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub no_of_devices_received: Option<i64>,
    pub serial_no: Option<String>,
    pub installation_status: Option<String>,
    pub functionality_status: Option<String>,
    pub issues_if_any: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Location {
    /// 伺服器 Excel 匯出的欄位順序，前面加上 id，最後附上時間戳記
    pub const CSV_HEADER: [&'static str; 25] = [
        "id",
        "slNo",
        "division",
        "postOfficeName",
        "postOfficeId",
        "officeType",
        "contactPersonName",
        "contactPersonNo",
        "altContactNo",
        "contactEmail",
        "locationAddress",
        "location",
        "city",
        "state",
        "pincode",
        "numberOfPosToBeDeployed",
        "typeOfPosTerminal",
        "dateOfReceiptOfDevice",
        "noOfDevicesReceived",
        "serialNo",
        "installationStatus",
        "functionalityStatus",
        "issuesIfAny",
        "created_at",
        "updated_at",
    ];

    /// Accepts either a JSON array of rows or a single row object.
    pub fn list_from_value(value: &serde_json::Value) -> Result<Vec<Location>> {
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| serde_json::from_value(item.clone()).map_err(ClientError::from))
                .collect(),
            other => Ok(vec![serde_json::from_value(other.clone())?]),
        }
    }

    pub fn csv_record(&self) -> Vec<String> {
        fn text(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        fn num(v: &Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        vec![
            num(&self.id),
            num(&self.sl_no),
            text(&self.division),
            text(&self.post_office_name),
            text(&self.post_office_id),
            text(&self.office_type),
            text(&self.contact_person_name),
            text(&self.contact_person_no),
            text(&self.alt_contact_no),
            text(&self.contact_email),
            text(&self.location_address),
            text(&self.location),
            text(&self.city),
            text(&self.state),
            text(&self.pincode),
            num(&self.number_of_pos_to_be_deployed),
            text(&self.type_of_pos_terminal),
            text(&self.date_of_receipt_of_device),
            num(&self.no_of_devices_received),
            text(&self.serial_no),
            text(&self.installation_status),
            text(&self.functionality_status),
            text(&self.issues_if_any),
            text(&self.created_at),
            text(&self.updated_at),
        ]
    }
}

/// 數字欄位寬鬆解析：整數、整數值的浮點數或數字字串；其他值視為空
fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(integer_from_value))
}

fn integer_from_value(value: &serde_json::Value) -> Option<i64> {
    fn whole(f: f64) -> Option<i64> {
        (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
    }

    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }
}

/// A file to be sent as the `file` part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self { file_name, bytes })
    }
}

/// 匯出/備份的下載端點
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Export,
    Backup,
}

impl DownloadKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            DownloadKind::Export => "/api/export",
            DownloadKind::Backup => "/api/backup",
        }
    }

    /// Same naming the server uses when it sets no `Content-Disposition`.
    pub fn default_file_name(&self, date: chrono::NaiveDate) -> String {
        match self {
            DownloadKind::Export => format!("POS_Data_Export_{}.xlsx", date.format("%Y-%m-%d")),
            DownloadKind::Backup => format!("POS_Backup_{}.json", date.format("%Y-%m-%d")),
        }
    }
}
