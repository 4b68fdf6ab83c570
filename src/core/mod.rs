pub mod client;
pub mod commands;
pub mod render;

pub use crate::domain::model::{DownloadKind, Location, LocationId, UploadFile};
pub use crate::domain::ports::{ConfigProvider, LocationsApi, Storage};
pub use crate::utils::error::Result;
