pub mod app_config;
pub mod notion;
pub mod wire;

pub use notion::{ClientError, NotionStore, DEFAULT_BASE_URL, NOTION_VERSION};
