use crate::core::SeriesSource;
use std::sync::Arc;

/// 每個請求共用的唯讀狀態
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SeriesSource>,
    pub default_registration_key: Arc<str>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn SeriesSource>,
        default_registration_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            source,
            default_registration_key: default_registration_key.into(),
        }
    }
}
