use crate::domain::model::{SeriesQuery, SeriesResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// 時間序列資料來源
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self, query: &SeriesQuery) -> Result<Vec<SeriesResult>>;
}
