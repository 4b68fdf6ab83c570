use crate::core::Location;
use crate::utils::error::{ClientError, Result};
use serde_json::Value;

pub fn render_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// 簡易表格：序號、郵局名稱、城市、州、安裝狀態
pub fn render_table(locations: &[Location]) -> String {
    let mut lines = vec![format!(
        "{:>5}  {:<32} {:<16} {:<16} {}",
        "Sl.No", "Post Office", "City", "State", "Installation"
    )];

    for loc in locations {
        lines.push(format!(
            "{:>5}  {:<32} {:<16} {:<16} {}",
            loc.sl_no.map(|n| n.to_string()).unwrap_or_default(),
            loc.post_office_name.as_deref().unwrap_or("-"),
            loc.city.as_deref().unwrap_or("-"),
            loc.state.as_deref().unwrap_or("-"),
            loc.installation_status.as_deref().unwrap_or("-"),
        ));
    }

    lines.push(format!("{} location(s)", locations.len()));
    lines.join("\n")
}

pub fn render_csv(locations: &[Location]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Location::CSV_HEADER)?;
    for loc in locations {
        writer.write_record(loc.csv_record())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ClientError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
